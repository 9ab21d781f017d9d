//! Route table construction.
//!
//! [`RouteTable::build`] walks the catalog once, in order, and pairs every
//! topic's normalized route with the module path the resolver produces for
//! it. The table records *which* module serves a route; loading happens
//! later, on navigation (see [`crate::loader`]).
//!
//! ## Duplicates
//!
//! Two topics whose routes differ only by a trailing slash normalize to the
//! same path. Under [`DuplicatePolicy::Reject`] the build fails naming both
//! topics. Under [`DuplicatePolicy::LastWins`] the later topic replaces the
//! earlier one in place and a warning is logged for the shadowed topic.
//!
//! ## Empty catalogs
//!
//! An empty catalog yields an empty table. That is a configuration problem
//! for whoever navigates with the table, so it is only logged here.

use crate::catalog::Catalog;
use crate::config::DuplicatePolicy;
use crate::resolve::{self, Category, ModulePath, ResolveError};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Duplicate route {path}: topics {first:?} and {second:?} both normalize to it")]
    DuplicateRoute {
        path: String,
        /// Route of the earlier topic, as declared in the catalog.
        first: String,
        /// Route of the later topic, as declared in the catalog.
        second: String,
    },
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// One routable topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    /// Route with its trailing slash stripped; unique within a table.
    pub path: String,
    /// Module that renders the route.
    pub module: ModulePath,
    /// Topic display name.
    pub title: String,
    /// Catalog category key the topic was declared under.
    pub category: String,
    /// Catalog subcategory title the topic was declared under.
    pub subcategory: String,
    /// True when the route's category was not recognized by the resolver.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

/// Ordered, immutable mapping from normalized route to module.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    index: HashMap<String, usize>,
}

impl RouteTable {
    /// Build the table from a catalog.
    ///
    /// Fails on the first malformed route, and on duplicate paths under
    /// [`DuplicatePolicy::Reject`].
    pub fn build(catalog: &Catalog, duplicates: DuplicatePolicy) -> Result<Self, TableError> {
        let mut table = RouteTable::default();
        // Catalog routes as declared, parallel to `table.entries`.
        let mut raw_routes: Vec<&str> = Vec::new();

        for item in catalog.topics() {
            let path = item.topic.normalized_route().to_string();
            let resolution = resolve::resolve(&path)?;

            if resolution.is_fallback() {
                warn!(
                    route = %path,
                    module = %resolution.module,
                    "unrecognized category, falling back to bare slug"
                );
            } else if item.category.key != path_category(&path) {
                debug!(
                    route = %path,
                    declared = %item.category.key,
                    "topic route category differs from its catalog category"
                );
            }

            let entry = RouteEntry {
                path: path.clone(),
                module: resolution.module,
                title: item.topic.display_name(),
                category: item.category.key.clone(),
                subcategory: item.subcategory.title.clone(),
                fallback: resolution.category.is_none(),
            };
            debug!(route = %entry.path, module = %entry.module, "resolved route");

            match table.index.get(&path) {
                Some(&existing) => match duplicates {
                    DuplicatePolicy::Reject => {
                        return Err(TableError::DuplicateRoute {
                            path,
                            first: raw_routes[existing].to_string(),
                            second: item.topic.route.clone(),
                        });
                    }
                    DuplicatePolicy::LastWins => {
                        warn!(
                            route = %path,
                            shadowed = raw_routes[existing],
                            by = %item.topic.route,
                            "duplicate route, later topic wins"
                        );
                        table.entries[existing] = entry;
                        raw_routes[existing] = item.topic.route.as_str();
                    }
                },
                None => {
                    table.index.insert(path, table.entries.len());
                    table.entries.push(entry);
                    raw_routes.push(item.topic.route.as_str());
                }
            }
        }

        if table.entries.is_empty() {
            warn!("catalog has no topics, route table is empty");
        }

        Ok(table)
    }

    /// Look up a route; a single trailing slash is ignored.
    pub fn get(&self, route: &str) -> Option<&RouteEntry> {
        self.index
            .get(crate::naming::normalize_route(route))
            .map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose category was not recognized by the resolver.
    pub fn fallbacks(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter().filter(|e| e.fallback)
    }
}

/// Category key a resolver would dispatch on, or `""`.
fn path_category(path: &str) -> &str {
    crate::naming::route_segments(path)
        .first()
        .copied()
        .filter(|key| Category::from_key(key).is_some())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn table_size_equals_topic_count() {
        let catalog = sample_catalog();
        let table = RouteTable::build(&catalog, DuplicatePolicy::Reject).unwrap();
        assert_eq!(table.len(), catalog.topic_count());
    }

    #[test]
    fn entries_follow_catalog_order() {
        let catalog = sample_catalog();
        let table = RouteTable::build(&catalog, DuplicatePolicy::Reject).unwrap();
        let expected: Vec<String> = catalog
            .topics()
            .map(|t| t.topic.normalized_route().to_string())
            .collect();
        assert_eq!(table_paths(&table), expected);
    }

    #[test]
    fn entries_carry_resolved_modules() {
        let table = RouteTable::build(&sample_catalog(), DuplicatePolicy::Reject).unwrap();
        assert_eq!(
            find_entry(&table, "/other-languages/laravel/eloquent/query-builder")
                .module
                .as_str(),
            "laravel/eloquent/QueryBuilder"
        );
        assert_eq!(
            find_entry(&table, "/other-languages/php/fundamentals/arrays")
                .module
                .as_str(),
            "php/fundamentals/Arrays"
        );
        assert_eq!(find_entry(&table, "/css/flexbox").module.as_str(), "css/Flexbox");
    }

    #[test]
    fn trailing_slash_is_stripped_from_paths() {
        let catalog = catalog_of(&[("css", "Layout", &["/css/grid/"])]);
        let table = RouteTable::build(&catalog, DuplicatePolicy::Reject).unwrap();
        assert_eq!(table_paths(&table), vec!["/css/grid"]);
        assert!(table.get("/css/grid/").is_some());
        assert!(table.get("/css/grid").is_some());
    }

    #[test]
    fn duplicate_after_normalization_is_rejected() {
        let catalog = catalog_of(&[("css", "Layout", &["/css/flexbox", "/css/flexbox/"])]);
        let err = RouteTable::build(&catalog, DuplicatePolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            TableError::DuplicateRoute {
                path: "/css/flexbox".into(),
                first: "/css/flexbox".into(),
                second: "/css/flexbox/".into(),
            }
        );
        assert_eq!(
            err.to_string(),
            r#"Duplicate route /css/flexbox: topics "/css/flexbox" and "/css/flexbox/" both normalize to it"#
        );
    }

    #[test]
    fn duplicate_across_categories_is_rejected() {
        let catalog = catalog_of(&[
            ("css", "Layout", &["/css/flexbox"]),
            ("html", "Misfiled", &["/css/flexbox"]),
        ]);
        assert!(matches!(
            RouteTable::build(&catalog, DuplicatePolicy::Reject),
            Err(TableError::DuplicateRoute { .. })
        ));
    }

    #[test]
    fn last_wins_keeps_later_topic_in_first_position() {
        let mut catalog = catalog_of(&[(
            "css",
            "Layout",
            &["/css/flexbox", "/css/grid", "/css/flexbox/"],
        )]);
        catalog.categories[0].subcategories[0].topics[2].title = Some("Flexbox v2".into());

        let table = RouteTable::build(&catalog, DuplicatePolicy::LastWins).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table_paths(&table), vec!["/css/flexbox", "/css/grid"]);
        assert_eq!(find_entry(&table, "/css/flexbox").title, "Flexbox v2");
    }

    #[test]
    fn malformed_route_fails_build() {
        let catalog = catalog_of(&[("css", "Layout", &["/css"])]);
        assert_eq!(
            RouteTable::build(&catalog, DuplicatePolicy::Reject).unwrap_err(),
            TableError::Resolve(ResolveError::TooFewSegments("/css".into()))
        );
    }

    #[test]
    fn empty_catalog_gives_empty_table() {
        let table = RouteTable::build(&Catalog::default(), DuplicatePolicy::Reject).unwrap();
        assert!(table.is_empty());
        assert!(table.get("/css/flexbox").is_none());
    }

    #[test]
    fn unknown_category_is_kept_as_fallback_entry() {
        let catalog = catalog_of(&[("git", "Basics", &["/git/rebasing"])]);
        let table = RouteTable::build(&catalog, DuplicatePolicy::Reject).unwrap();
        let entry = find_entry(&table, "/git/rebasing");
        assert!(entry.fallback);
        assert_eq!(entry.module.as_str(), "rebasing");
        assert_eq!(table.fallbacks().count(), 1);
    }

    #[test]
    fn entries_record_catalog_grouping() {
        let table = RouteTable::build(&sample_catalog(), DuplicatePolicy::Reject).unwrap();
        let entry = find_entry(&table, "/other-languages/laravel/eloquent/query-builder");
        assert_eq!(entry.category, "other-languages");
        assert_eq!(entry.subcategory, "Laravel Eloquent");
        assert_eq!(entry.title, "Query Builder");
    }

    #[test]
    fn entry_serializes_without_fallback_flag_when_false() {
        let table = RouteTable::build(&sample_catalog(), DuplicatePolicy::Reject).unwrap();
        let json = serde_json::to_value(find_entry(&table, "/css/flexbox")).unwrap();
        assert_eq!(json["module"], "css/Flexbox");
        assert!(json.get("fallback").is_none());
    }
}

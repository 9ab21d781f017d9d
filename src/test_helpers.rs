//! Shared test utilities for the topic-routes test suite.
//!
//! Provides fixture setup, catalog builders, and route table lookups that
//! panic with a clear message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let table = RouteTable::build(&sample_catalog(), DuplicatePolicy::Reject).unwrap();
//! let entry = find_entry(&table, "/css/flexbox");
//! assert_eq!(entry.module.as_str(), "css/Flexbox");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::catalog::{self, Catalog, Category, Subcategory, Topic};
use crate::table::{RouteEntry, RouteTable};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Catalog builders
// =========================================================================

/// The fixture catalog (`fixtures/content/catalog.toml`).
pub fn sample_catalog() -> Catalog {
    catalog::parse_catalog(include_str!("../fixtures/content/catalog.toml")).unwrap()
}

/// Build a catalog from `(category key, subcategory title, routes)` triples.
///
/// Consecutive triples with the same key share one category.
///
/// ```rust
/// let catalog = catalog_of(&[
///     ("css", "Layout", &["/css/flexbox", "/css/grid"]),
///     ("other-languages", "PHP", &["/other-languages/php/fundamentals/arrays"]),
/// ]);
/// ```
pub fn catalog_of(groups: &[(&str, &str, &[&str])]) -> Catalog {
    let mut catalog = Catalog::default();
    for (key, subcategory, routes) in groups {
        let subcategory = Subcategory {
            title: subcategory.to_string(),
            topics: routes.iter().map(|r| Topic::new(*r)).collect(),
        };
        match catalog.categories.last_mut() {
            Some(category) if category.key == *key => category.subcategories.push(subcategory),
            _ => catalog.categories.push(Category {
                key: key.to_string(),
                title: None,
                subcategories: vec![subcategory],
            }),
        }
    }
    catalog
}

// =========================================================================
// Route table lookups
// =========================================================================

/// Find an entry by route. Panics if not found.
pub fn find_entry<'a>(table: &'a RouteTable, route: &str) -> &'a RouteEntry {
    table.get(route).unwrap_or_else(|| {
        let paths = table_paths(table);
        panic!("route '{route}' not found. Available: {paths:?}")
    })
}

/// All entry paths in table order.
pub fn table_paths(table: &RouteTable) -> Vec<String> {
    table.entries().iter().map(|e| e.path.clone()).collect()
}

//! Topic catalog: the declarative description of all content.
//!
//! The catalog is a three-level hierarchy read once from `catalog.toml` in
//! the content root:
//!
//! ```text
//! Category (key = first route segment, e.g. "other-languages")
//! └── Subcategory (display grouping only, e.g. "Laravel Eloquent")
//!     └── Topic (route = "/other-languages/laravel/eloquent/relationships")
//! ```
//!
//! Subcategories exist for navigation grouping and are never consulted by the
//! resolver. Order is preserved everywhere so that iteration is deterministic.
//!
//! ## File Format
//!
//! ```toml
//! [[categories]]
//! key = "css"
//! title = "CSS"
//!
//! [[categories.subcategories]]
//! title = "Layout"
//!
//! [[categories.subcategories.topics]]
//! route = "/css/flexbox"
//! title = "Flexbox"      # optional, derived from the slug when absent
//! ```
//!
//! Unknown keys are rejected.

use crate::naming;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// The full catalog, in declaration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    /// Dispatch key, matching the first segment of every topic route.
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Subcategory {
    pub title: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Topic {
    /// Canonical route, e.g. `/css/flexbox`.
    pub route: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Topic {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            title: None,
        }
    }

    /// Route with a single trailing slash stripped.
    pub fn normalized_route(&self) -> &str {
        naming::normalize_route(&self.route)
    }

    /// Explicit title, or the last route segment with dashes turned into spaces.
    pub fn display_name(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        naming::route_segments(&self.route)
            .last()
            .map(|slug| naming::display_title(slug))
            .unwrap_or_default()
    }
}

impl Category {
    /// Explicit title, or the key itself.
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.key)
    }
}

/// A topic together with where it sits in the catalog.
#[derive(Debug, Clone, Copy)]
pub struct TopicRef<'a> {
    pub category: &'a Category,
    pub subcategory: &'a Subcategory,
    pub topic: &'a Topic,
}

impl Catalog {
    /// All topics in catalog order: category, then subcategory, then topic.
    pub fn topics(&self) -> impl Iterator<Item = TopicRef<'_>> {
        self.categories.iter().flat_map(|category| {
            category.subcategories.iter().flat_map(move |subcategory| {
                subcategory.topics.iter().map(move |topic| TopicRef {
                    category,
                    subcategory,
                    topic,
                })
            })
        })
    }

    pub fn topic_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| &c.subcategories)
            .map(|s| s.topics.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.topic_count() == 0
    }
}

/// Parse a catalog from TOML text.
pub fn parse_catalog(content: &str) -> Result<Catalog, toml::de::Error> {
    toml::from_str(content)
}

/// Read and parse the catalog file at `path`.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&content).map_err(|source| CatalogError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

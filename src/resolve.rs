//! Route → module path resolution.
//!
//! A route names its category in the first segment and its topic slug in the
//! last. The category picks a module path template from a closed set:
//!
//! | Category | Module path |
//! |----------|-------------|
//! | `html`, `css`, `javascript`, `react`, `typescript`, `nextjs`, `seo`, `miscellaneous`, `performance`, `security`, `testing` | `<category>/<ModuleName>` |
//! | `other-languages` with second segment `php` | `php/<section>/<ModuleName>` |
//! | `other-languages`, any other second segment | `laravel/<section>/<ModuleName>` |
//! | anything else | `<slug>` (fallback) |
//!
//! `<section>` is the third segment and `<ModuleName>` is the slug run
//! through [`naming::module_name`].
//!
//! Resolution is pure: it never touches the filesystem, so a wrong mapping
//! only shows up when the module is loaded.

use crate::naming;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Route {0:?} needs a category and a topic segment")]
    TooFewSegments(String),
    #[error("Route {0:?} is missing the section segment required under other-languages")]
    MissingSection(String),
}

/// Category keys recognized by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Html,
    Css,
    Javascript,
    React,
    Typescript,
    Nextjs,
    Seo,
    OtherLanguages,
    Miscellaneous,
    Performance,
    Security,
    Testing,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Html,
        Category::Css,
        Category::Javascript,
        Category::React,
        Category::Typescript,
        Category::Nextjs,
        Category::Seo,
        Category::OtherLanguages,
        Category::Miscellaneous,
        Category::Performance,
        Category::Security,
        Category::Testing,
    ];

    /// Exact, case-sensitive match on the route key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "html" => Some(Category::Html),
            "css" => Some(Category::Css),
            "javascript" => Some(Category::Javascript),
            "react" => Some(Category::React),
            "typescript" => Some(Category::Typescript),
            "nextjs" => Some(Category::Nextjs),
            "seo" => Some(Category::Seo),
            "other-languages" => Some(Category::OtherLanguages),
            "miscellaneous" => Some(Category::Miscellaneous),
            "performance" => Some(Category::Performance),
            "security" => Some(Category::Security),
            "testing" => Some(Category::Testing),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Category::Html => "html",
            Category::Css => "css",
            Category::Javascript => "javascript",
            Category::React => "react",
            Category::Typescript => "typescript",
            Category::Nextjs => "nextjs",
            Category::Seo => "seo",
            Category::OtherLanguages => "other-languages",
            Category::Miscellaneous => "miscellaneous",
            Category::Performance => "performance",
            Category::Security => "security",
            Category::Testing => "testing",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Key into the module registry, e.g. `laravel/eloquent/QueryBuilder`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ModulePath(pub String);

impl ModulePath {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of resolving one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub module: ModulePath,
    /// `None` when the category key was not recognized and the bare slug was used.
    pub category: Option<Category>,
}

impl Resolution {
    pub fn is_fallback(&self) -> bool {
        self.category.is_none()
    }
}

/// Resolve a route into the module path that renders it.
///
/// Unrecognized categories resolve to the unmodified slug and are flagged via
/// [`Resolution::is_fallback`]. Routes with fewer than two segments, and
/// `other-languages` routes without a section, are errors. Errors carry the
/// route with its trailing slash stripped.
pub fn resolve(route: &str) -> Result<Resolution, ResolveError> {
    let route = naming::normalize_route(route);
    let segments = naming::route_segments(route);
    let (Some(&key), Some(&slug)) = (segments.first(), segments.last()) else {
        return Err(ResolveError::TooFewSegments(route.to_string()));
    };
    if segments.len() < 2 {
        return Err(ResolveError::TooFewSegments(route.to_string()));
    }

    let Some(category) = Category::from_key(key) else {
        return Ok(Resolution {
            module: ModulePath(slug.to_string()),
            category: None,
        });
    };

    let name = naming::module_name(slug);
    let module = match category {
        Category::OtherLanguages => {
            let Some(section) = segments.get(2) else {
                return Err(ResolveError::MissingSection(route.to_string()));
            };
            let domain = if segments[1] == "php" { "php" } else { "laravel" };
            format!("{domain}/{section}/{name}")
        }
        uniform => format!("{}/{name}", uniform.key()),
    };

    Ok(Resolution {
        module: ModulePath(module),
        category: Some(category),
    })
}

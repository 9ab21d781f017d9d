//! Route and slug naming conventions.
//!
//! Routes are slash-delimited (`/other-languages/laravel/eloquent/query-builder`)
//! and their last segment is a hyphenated lowercase slug. This module owns the
//! string rules every other stage relies on:
//!
//! - [`normalize_route`] strips a single trailing slash (table keys).
//! - [`route_segments`] splits a route, discarding empty segments (resolver input).
//! - [`module_name`] turns a slug into a module name: `query-builder` → `QueryBuilder`.
//! - [`display_title`] turns a slug into a title: `query-builder` → `query builder`.
//!
//! All transforms are ASCII-only; no locale rules apply.

/// Strip exactly one trailing slash.
///
/// Internal duplicate slashes are left alone, and the root route `/` keeps
/// its slash.
///
/// - `"/css/flexbox/"` → `"/css/flexbox"`
/// - `"/css/flexbox//"` → `"/css/flexbox/"`
/// - `"/"` → `"/"`
pub fn normalize_route(route: &str) -> &str {
    if route.len() > 1 {
        route.strip_suffix('/').unwrap_or(route)
    } else {
        route
    }
}

/// Split a route on `/`, discarding empty segments.
pub fn route_segments(route: &str) -> Vec<&str> {
    route.split('/').filter(|s| !s.is_empty()).collect()
}

/// Convert a hyphenated slug into a module name.
///
/// Each `-`-separated word has its first ASCII letter uppercased; the rest of
/// the word is kept as written. Empty words (from `--`) contribute nothing.
///
/// - `"query-builder"` → `"QueryBuilder"`
/// - `"arrays"` → `"Arrays"`
/// - `"es6-features"` → `"Es6Features"`
pub fn module_name(slug: &str) -> String {
    let mut out = String::with_capacity(slug.len());
    for word in slug.split('-') {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Display title for a slug: dashes become spaces.
pub fn display_title(slug: &str) -> String {
    slug.replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_single_trailing_slash() {
        assert_eq!(normalize_route("/css/flexbox/"), "/css/flexbox");
        assert_eq!(normalize_route("/css/flexbox"), "/css/flexbox");
    }

    #[test]
    fn normalize_strips_only_one_slash() {
        assert_eq!(normalize_route("/css/flexbox//"), "/css/flexbox/");
    }

    #[test]
    fn normalize_keeps_internal_double_slash() {
        assert_eq!(normalize_route("/css//flexbox/"), "/css//flexbox");
    }

    #[test]
    fn normalize_keeps_root() {
        assert_eq!(normalize_route("/"), "/");
        assert_eq!(normalize_route(""), "");
    }

    #[test]
    fn segments_discard_empty_parts() {
        assert_eq!(
            route_segments("/other-languages//php/fundamentals/arrays/"),
            vec!["other-languages", "php", "fundamentals", "arrays"]
        );
        assert!(route_segments("/").is_empty());
        assert!(route_segments("").is_empty());
    }

    #[test]
    fn module_name_multi_word() {
        assert_eq!(module_name("query-builder"), "QueryBuilder");
        assert_eq!(module_name("api-resources"), "ApiResources");
    }

    #[test]
    fn module_name_single_word() {
        assert_eq!(module_name("arrays"), "Arrays");
    }

    #[test]
    fn module_name_keeps_rest_of_word() {
        assert_eq!(module_name("es6-features"), "Es6Features");
        assert_eq!(module_name("useEffect-hook"), "UseEffectHook");
    }

    #[test]
    fn module_name_skips_empty_words() {
        assert_eq!(module_name("a--b"), "AB");
        assert_eq!(module_name("-lead"), "Lead");
        assert_eq!(module_name(""), "");
    }

    #[test]
    fn module_name_leaves_non_ascii_alone() {
        assert_eq!(module_name("élan-vital"), "élanVital");
    }

    #[test]
    fn display_title_replaces_dashes() {
        assert_eq!(display_title("query-builder"), "query builder");
        assert_eq!(display_title("arrays"), "arrays");
    }
}

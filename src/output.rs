//! CLI output formatting.
//!
//! Each command has a `format_*` function returning `Vec<String>` so the
//! output can be tested without capturing stdout, and a `print_*` wrapper
//! that writes the lines. Diagnostics go through `tracing` on stderr; this
//! module only produces the inventory a user asked for.
//!
//! # Output Format
//!
//! ## Routes
//!
//! ```text
//! css
//! 001 Flexbox
//!     Route: /css/flexbox
//!     Module: css/Flexbox
//! 002 Grid
//!     Route: /css/grid
//!     Module: css/Grid
//!
//! 2 routes
//! ```
//!
//! ## Check
//!
//! ```text
//! Missing modules
//!     /css/grid → css/Grid.md
//! Orphan modules
//!     css/Subgrid.md
//! ```

use crate::check::AuditReport;
use crate::resolve::Resolution;
use crate::table::RouteTable;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Routes
// ============================================================================

/// Route table grouped under category headers, numbered within each category.
pub fn format_route_table(table: &RouteTable) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_category: Option<&str> = None;
    let mut pos = 0;

    for entry in table.entries() {
        if current_category != Some(entry.category.as_str()) {
            if current_category.is_some() {
                lines.push(String::new());
            }
            lines.push(entry.category.clone());
            current_category = Some(entry.category.as_str());
            pos = 0;
        }
        pos += 1;
        lines.push(format!("{} {}", format_index(pos), entry.title));
        lines.push(format!("{}Route: {}", indent(1), entry.path));
        if entry.fallback {
            lines.push(format!("{}Module: {} (fallback)", indent(1), entry.module));
        } else {
            lines.push(format!("{}Module: {}", indent(1), entry.module));
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    let fallbacks = table.fallbacks().count();
    if fallbacks > 0 {
        lines.push(format!(
            "{} ({} unrecognized)",
            plural(table.len(), "route"),
            fallbacks
        ));
    } else {
        lines.push(plural(table.len(), "route"));
    }
    lines
}

pub fn print_route_table(table: &RouteTable) {
    for line in format_route_table(table) {
        println!("{}", line);
    }
}

// ============================================================================
// Resolve
// ============================================================================

/// One line per route: `route → module`, marking fallbacks.
pub fn format_resolution(route: &str, resolution: &Resolution) -> String {
    if resolution.is_fallback() {
        format!("{} → {} (fallback)", route, resolution.module)
    } else {
        format!("{} → {}", route, resolution.module)
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_audit(report: &AuditReport, root: &std::path::Path) -> Vec<String> {
    let mut lines = Vec::new();
    if !report.missing.is_empty() {
        lines.push("Missing modules".to_string());
        for missing in &report.missing {
            let shown = missing
                .expected
                .strip_prefix(root)
                .unwrap_or(&missing.expected);
            lines.push(format!(
                "{}{} → {}",
                indent(1),
                missing.route,
                shown.display()
            ));
        }
    }
    if !report.orphans.is_empty() {
        lines.push("Orphan modules".to_string());
        for orphan in &report.orphans {
            lines.push(format!("{}{}", indent(1), orphan.display()));
        }
    }
    lines
}

pub fn print_audit(report: &AuditReport, root: &std::path::Path) {
    for line in format_audit(report, root) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::MissingModule;
    use crate::config::DuplicatePolicy;
    use crate::resolve;
    use crate::test_helpers::*;
    use std::path::{Path, PathBuf};

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
    }

    #[test]
    fn route_table_grouped_by_category() {
        let catalog = catalog_of(&[
            ("css", "Layout", &["/css/flexbox", "/css/grid"]),
            ("html", "Basics", &["/html/forms"]),
        ]);
        let table = RouteTable::build(&catalog, DuplicatePolicy::Reject).unwrap();
        assert_eq!(
            format_route_table(&table),
            vec![
                "css",
                "001 flexbox",
                "    Route: /css/flexbox",
                "    Module: css/Flexbox",
                "002 grid",
                "    Route: /css/grid",
                "    Module: css/Grid",
                "",
                "html",
                "001 forms",
                "    Route: /html/forms",
                "    Module: html/Forms",
                "",
                "3 routes",
            ]
        );
    }

    #[test]
    fn route_table_marks_fallbacks() {
        let catalog = catalog_of(&[("git", "Basics", &["/git/rebasing"])]);
        let table = RouteTable::build(&catalog, DuplicatePolicy::Reject).unwrap();
        let lines = format_route_table(&table);
        assert!(lines.contains(&"    Module: rebasing (fallback)".to_string()));
        assert_eq!(lines.last().unwrap(), "1 route (1 unrecognized)");
    }

    #[test]
    fn empty_table_prints_count_only() {
        assert_eq!(format_route_table(&RouteTable::default()), vec!["0 routes"]);
    }

    #[test]
    fn resolution_line() {
        let r = resolve::resolve("/css/flexbox").unwrap();
        assert_eq!(format_resolution("/css/flexbox", &r), "/css/flexbox → css/Flexbox");
        let r = resolve::resolve("/git/rebasing").unwrap();
        assert_eq!(
            format_resolution("/git/rebasing", &r),
            "/git/rebasing → rebasing (fallback)"
        );
    }

    #[test]
    fn audit_lists_missing_and_orphans() {
        let root = Path::new("/content");
        let report = AuditReport {
            missing: vec![MissingModule {
                route: "/css/grid".into(),
                module: "css/Grid".into(),
                expected: root.join("css/Grid.md"),
            }],
            orphans: vec![PathBuf::from("css/Subgrid.md")],
        };
        assert_eq!(
            format_audit(&report, root),
            vec![
                "Missing modules",
                "    /css/grid → css/Grid.md",
                "Orphan modules",
                "    css/Subgrid.md",
            ]
        );
    }

    #[test]
    fn clean_audit_has_no_lines() {
        assert!(format_audit(&AuditReport::default(), Path::new("/content")).is_empty());
    }
}

//! Content audit: compare the route table against module files on disk.
//!
//! The resolver never looks at the filesystem, so a route whose module file
//! is missing would only fail when someone navigates to it. [`audit`] finds
//! those ahead of time, along with module files no route points at.
//!
//! - **Missing**: a table entry whose `<root>/<module>.<ext>` does not exist.
//! - **Orphan**: a `*.<ext>` file under the root that no entry resolves to.
//!
//! Hidden files and directories (leading `.`) are skipped.

use crate::loader::module_file;
use crate::table::{RouteEntry, RouteTable};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A routed module with no file behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingModule {
    pub route: String,
    pub module: String,
    pub expected: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    pub missing: Vec<MissingModule>,
    /// Orphan module files, relative to the content root, sorted.
    pub orphans: Vec<PathBuf>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.orphans.is_empty()
    }
}

/// Audit `table` against the module files under `root`.
pub fn audit(root: &Path, table: &RouteTable, extension: &str) -> AuditReport {
    let missing = table
        .entries()
        .iter()
        .filter_map(|entry| missing_module(root, entry, extension))
        .collect();

    let referenced: BTreeSet<PathBuf> = table
        .entries()
        .iter()
        .map(|e| module_file(Path::new(""), &e.module, extension))
        .collect();

    let mut orphans: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext.to_string_lossy() == extension)
        })
        .filter_map(|e| e.path().strip_prefix(root).ok().map(Path::to_path_buf))
        .filter(|rel| !referenced.contains(rel))
        .collect();
    orphans.sort();

    AuditReport { missing, orphans }
}

fn missing_module(root: &Path, entry: &RouteEntry, extension: &str) -> Option<MissingModule> {
    let expected = module_file(root, &entry.module, extension);
    if expected.is_file() {
        return None;
    }
    Some(MissingModule {
        route: entry.path.clone(),
        module: entry.module.to_string(),
        expected,
    })
}

//! # Topic Routes
//!
//! Route resolution and lazy module loading for a static topic reference
//! site (HTML, CSS, JavaScript, PHP, Laravel, Git, ...). A declarative catalog
//! lists every topic; each topic's route maps to the content module that
//! renders it; modules are loaded only when a route is visited.
//!
//! # Architecture: Resolve Eagerly, Load Lazily
//!
//! ```text
//! 1. Catalog   catalog.toml  →  Catalog         (category → subcategory → topic)
//! 2. Table     Catalog       →  RouteTable      (route → module path, once, at startup)
//! 3. Load      RouteTable    →  ModuleRegistry  (route → factory, run on navigation)
//! ```
//!
//! Stages 1 and 2 are pure and synchronous: they read static data and build
//! an immutable table. Stage 3 is the only asynchronous boundary; each load
//! is an independent, cancellable future.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Catalog types and `catalog.toml` loading |
//! | [`naming`] | Route normalization and `query-builder` → `QueryBuilder` conversion |
//! | [`resolve`] | Route → module path, dispatched on a closed set of categories |
//! | [`table`] | Ordered route table with duplicate detection |
//! | [`loader`] | Lazy module registry, cancellable loads, markdown source |
//! | [`render`] | Shared page layout and not-found page (maud) |
//! | [`check`] | Missing and orphan module detection |
//! | [`config`] | `config.toml` loading, validation, and stock defaults |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup for the binary |
//!
//! # Design Decisions
//!
//! ## Closed Category Dispatch
//!
//! Categories are an enum, not a lookup table loaded from config. Every
//! recognized category maps to `<category>/<ModuleName>`, except
//! `other-languages`, which hosts both PHP and Laravel content and picks
//! between them on the second route segment (`php`, or anything else for
//! Laravel). Unrecognized categories resolve to the bare slug so that a new
//! category degrades to a not-found page rather than a startup failure.
//!
//! ## Duplicates Fail By Default
//!
//! Two topics whose routes differ only by a trailing slash would silently
//! shadow each other. The table rejects that unless `routes.duplicates =
//! "last-wins"` is configured, in which case every shadowed topic is logged.
//!
//! ## Resolution Never Touches The Filesystem
//!
//! A wrong mapping surfaces when a module is loaded, or earlier through
//! `topic-routes check`, which compares the table with the files on disk.

pub mod catalog;
pub mod check;
pub mod config;
pub mod loader;
pub mod logging;
pub mod naming;
pub mod output;
pub mod render;
pub mod resolve;
pub mod table;

#[cfg(test)]
pub(crate) mod test_helpers;

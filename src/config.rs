//! Router configuration module.
//!
//! Handles loading, validating, and merging the content root's `config.toml`.
//! Stock defaults form the base layer; the user file overrides only the keys
//! it names.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml              # Router config (optional)
//! ├── catalog.toml             # Topic catalog
//! ├── css/
//! │   └── Flexbox.md           # Module for /css/flexbox
//! └── laravel/
//!     └── eloquent/
//!         └── QueryBuilder.md  # Module for /other-languages/laravel/eloquent/query-builder
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! catalog = "catalog.toml"   # Catalog file, relative to the content root
//! module_extension = "md"    # Extension of content module files
//!
//! [routes]
//! duplicates = "reject"      # "reject" or "last-wins"
//!
//! [log]
//! level = "info"             # Default log filter when RUST_LOG is unset
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Router configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// Catalog file name, resolved against the content root.
    pub catalog: String,
    /// File extension of content modules (without the dot).
    pub module_extension: String,
    /// Route table construction settings.
    pub routes: RoutesConfig,
    /// Logging defaults.
    pub log: LogConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            catalog: "catalog.toml".to_string(),
            module_extension: "md".to_string(),
            routes: RoutesConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl RouterConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.trim().is_empty() {
            return Err(ConfigError::Validation("catalog must not be empty".into()));
        }
        if self.module_extension.is_empty() || self.module_extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "module_extension must be non-empty and given without a leading dot".into(),
            ));
        }
        if self.log.level.trim().is_empty() {
            return Err(ConfigError::Validation("log.level must not be empty".into()));
        }
        Ok(())
    }
}

/// What the route table builder does when two topics normalize to the same path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Fail the build, naming both topics.
    #[default]
    Reject,
    /// Keep the later topic and log every shadowed one.
    LastWins,
}

/// Route table construction settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutesConfig {
    pub duplicates: DuplicatePolicy,
}

/// Logging defaults. `RUST_LOG` takes precedence when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// [`RouterConfig::default`] as a TOML table, the base every `config.toml`
/// is merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(RouterConfig::default()).expect("default config must serialize")
}

/// Overlay user values onto `base`, table by table.
///
/// Setting `[routes] duplicates` keeps the stock `[log]` and top-level keys.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read `<root>/config.toml` without interpreting it. A content root
/// without one is `Ok(None)`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge `overlay` onto `base`, deserialize with unknown keys rejected, and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<RouterConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: RouterConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Router config for a content root: stock defaults plus its `config.toml`.
pub fn load_config(root: &Path) -> Result<RouterConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# topic-routes configuration
# ==========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Catalog file describing categories, subcategories and topics,
# relative to the content root.
catalog = "catalog.toml"

# Extension of content module files. A route resolving to
# `laravel/eloquent/QueryBuilder` loads `laravel/eloquent/QueryBuilder.md`.
module_extension = "md"

# ---------------------------------------------------------------------------
# Route table
# ---------------------------------------------------------------------------
[routes]
# What to do when two topics share a route after trailing-slash stripping:
#   "reject"    - fail with an error naming both topics
#   "last-wins" - keep the later topic, warn about the shadowed one
duplicates = "reject"

# ---------------------------------------------------------------------------
# Logging
# ---------------------------------------------------------------------------
[log]
# Default filter when RUST_LOG is not set (e.g. "warn", "debug",
# "topic_routes=debug").
level = "info"
"##
}

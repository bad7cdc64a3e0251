//! Scanner configuration module.
//!
//! Handles loading, validating, and merging the optional `assets.toml` file.
//! The category list and the asset-type extension table are static data: the
//! scanner never discovers new categories or types from the filesystem.
//!
//! ## Config File Location
//!
//! Place `assets.toml` in the asset root, next to the category directories:
//!
//! ```text
//! portfolio-assets/
//! ├── assets.toml              # Optional (overrides stock defaults)
//! ├── manifest.json            # Generated
//! ├── projects/
//! │   └── quick_care/
//! │       ├── logo.png
//! │       ├── screenshots/
//! │       └── videos/
//! └── education/
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! categories = ["projects", "education", "experience", "certifications"]
//!
//! [logo]
//! stem = "logo"
//! extensions = ["png", "jpg", "jpeg", "svg", "webp"]
//!
//! [[asset_types]]
//! name = "screenshots"
//! extensions = ["png", "jpg", "jpeg", "gif", "webp"]
//!
//! [[asset_types]]
//! name = "videos"
//! extensions = ["mp4", "mkv", "avi", "mov", "webm"]
//!
//! [[asset_types]]
//! name = "pdfs"
//! extensions = ["pdf"]
//!
//! [[asset_types]]
//! name = "installers"
//! extensions = ["apk", "exe", "dmg", "msi", "deb", "rpm"]
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: top-level keys replace their stock value, tables
//! are merged key by key. Arrays (including `asset_types`) replace the stock
//! array wholesale, so a file that redefines `asset_types` must list every
//! type it wants.
//!
//! Unknown keys are rejected to catch typos early.

use crate::naming;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config filename, looked up in the asset root.
pub const CONFIG_FILENAME: &str = "assets.toml";

/// Key reserved in each slug object for the logo filename.
pub const LOGO_KEY: &str = "logo";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Config file not found: {0}")]
    Missing(PathBuf),
}

/// Scanner configuration loaded from `assets.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Top-level category directories, in manifest order.
    pub categories: Vec<String>,
    /// Slug-level logo detection.
    pub logo: LogoConfig,
    /// Asset-type directories and their extensions, in manifest order.
    pub asset_types: Vec<AssetType>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            categories: ["projects", "education", "experience", "certifications"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            logo: LogoConfig::default(),
            asset_types: vec![
                AssetType::new("screenshots", &["png", "jpg", "jpeg", "gif", "webp"]),
                AssetType::new("videos", &["mp4", "mkv", "avi", "mov", "webm"]),
                AssetType::new("pdfs", &["pdf"]),
                AssetType::new("installers", &["apk", "exe", "dmg", "msi", "deb", "rpm"]),
            ],
        }
    }
}

/// One asset-type directory name and the extensions it accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetType {
    pub name: String,
    /// Lowercase extensions without the leading dot.
    pub extensions: Vec<String>,
}

impl AssetType {
    pub fn new(name: &str, extensions: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Whether a file with this name belongs in this type's directory.
    pub fn accepts(&self, filename: &str) -> bool {
        naming::extension_of(filename).is_some_and(|ext| self.extensions.contains(&ext))
    }
}

/// Logo file rule: `<stem>.<ext>` directly inside a slug directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogoConfig {
    /// Case-insensitive file stem. Empty disables logo detection.
    pub stem: String,
    pub extensions: Vec<String>,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            stem: "logo".to_string(),
            extensions: ["png", "jpg", "jpeg", "svg", "webp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl LogoConfig {
    pub fn matches(&self, filename: &str) -> bool {
        !self.stem.is_empty()
            && naming::stem_of(filename) == self.stem.to_lowercase()
            && naming::extension_of(filename).is_some_and(|ext| self.extensions.contains(&ext))
    }
}

fn normalize_extensions(extensions: &mut Vec<String>) {
    for ext in extensions.iter_mut() {
        *ext = ext.trim_start_matches('.').to_lowercase();
    }
    let mut seen = HashSet::new();
    extensions.retain(|e| seen.insert(e.clone()));
}

impl ManifestConfig {
    /// Lowercase extensions and strip leading dots so `".PNG"` and `"png"`
    /// configure the same thing.
    pub fn normalize(&mut self) {
        for asset_type in &mut self.asset_types {
            normalize_extensions(&mut asset_type.extensions);
        }
        normalize_extensions(&mut self.logo.extensions);
    }

    /// Validate the category and asset-type tables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.is_empty() {
            return Err(ConfigError::Validation(
                "categories must not be empty".into(),
            ));
        }
        if self.asset_types.is_empty() {
            return Err(ConfigError::Validation(
                "asset_types must not be empty".into(),
            ));
        }

        check_names("category", self.categories.iter().map(String::as_str))?;
        check_names(
            "asset type",
            self.asset_types.iter().map(|t| t.name.as_str()),
        )?;

        for asset_type in &self.asset_types {
            if asset_type.name == LOGO_KEY {
                return Err(ConfigError::Validation(format!(
                    "asset type may not be named '{LOGO_KEY}' (reserved for slug logos)"
                )));
            }
            if asset_type.extensions.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "asset type '{}' has no extensions",
                    asset_type.name
                )));
            }
            if asset_type.extensions.iter().any(|e| e.is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "asset type '{}' has an empty extension",
                    asset_type.name
                )));
            }
        }
        Ok(())
    }

    /// Look up an asset type by directory name.
    pub fn asset_type(&self, name: &str) -> Option<&AssetType> {
        self.asset_types.iter().find(|t| t.name == name)
    }
}

/// Names become directory names and JSON keys: non-empty, single path
/// component, not hidden, unique.
fn check_names<'a>(kind: &str, names: impl Iterator<Item = &'a str>) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() {
            return Err(ConfigError::Validation(format!("{kind} name must not be empty")));
        }
        if name.contains(['/', '\\']) || name == ".." || naming::is_hidden(name) {
            return Err(ConfigError::Validation(format!(
                "{kind} name '{name}' must be a plain directory name"
            )));
        }
        if !seen.insert(name) {
            return Err(ConfigError::Validation(format!("duplicate {kind} '{name}'")));
        }
    }
    Ok(())
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ManifestConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
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

/// Load a config file as a raw TOML value. `Ok(None)` if it doesn't exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize, normalize
/// and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ManifestConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let mut config: ManifestConfig = merged.try_into()?;
    config.normalize();
    config.validate()?;
    Ok(config)
}

/// Load the scanner config.
///
/// With `explicit` set, that file must exist. Otherwise `<root>/assets.toml`
/// is used when present and stock defaults when not.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<ManifestConfig, ConfigError> {
    let overlay = match explicit {
        Some(path) => {
            Some(load_raw_config(path)?.ok_or_else(|| ConfigError::Missing(path.to_path_buf()))?)
        }
        None => load_raw_config(&root.join(CONFIG_FILENAME))?,
    };
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `assets.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Asset Manifest Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the asset root as assets.toml, or pass --config.
# Unknown keys will cause an error.

# Top-level category directories, in the order they appear in manifest.json.
# Categories missing on disk are skipped.
categories = ["projects", "education", "experience", "certifications"]

# ---------------------------------------------------------------------------
# Logo
# ---------------------------------------------------------------------------
# A file named <stem>.<ext> directly inside a slug directory is listed under
# the "logo" key. Set stem = "" to disable.
[logo]
stem = "logo"
extensions = ["png", "jpg", "jpeg", "svg", "webp"]

# ---------------------------------------------------------------------------
# Asset types
# ---------------------------------------------------------------------------
# Each entry is a directory name under a slug and the file extensions it
# accepts (case-insensitive, no leading dot). Files with other extensions are
# left out of the manifest. Redefining asset_types replaces the whole list.
[[asset_types]]
name = "screenshots"
extensions = ["png", "jpg", "jpeg", "gif", "webp"]

[[asset_types]]
name = "videos"
extensions = ["mp4", "mkv", "avi", "mov", "webm"]

[[asset_types]]
name = "pdfs"
extensions = ["pdf"]

[[asset_types]]
name = "installers"
extensions = ["apk", "exe", "dmg", "msi", "deb", "rpm"]
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn type_names(config: &ManifestConfig) -> Vec<&str> {
        config.asset_types.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn default_config_has_categories() {
        let config = ManifestConfig::default();
        assert_eq!(
            config.categories,
            vec!["projects", "education", "experience", "certifications"]
        );
    }

    #[test]
    fn default_config_has_asset_types_in_order() {
        let config = ManifestConfig::default();
        assert_eq!(
            type_names(&config),
            vec!["screenshots", "videos", "pdfs", "installers"]
        );
    }

    #[test]
    fn default_config_is_valid() {
        ManifestConfig::default().validate().unwrap();
    }

    #[test]
    fn stock_toml_matches_defaults() {
        let value: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        let config = resolve_config(stock_defaults_value(), Some(value)).unwrap();
        assert_eq!(config, ManifestConfig::default());
    }

    #[test]
    fn accepts_is_case_insensitive() {
        let screenshots = AssetType::new("screenshots", &["png", "jpg"]);
        assert!(screenshots.accepts("1.PNG"));
        assert!(screenshots.accepts("cover.Jpg"));
        assert!(!screenshots.accepts("notes.txt"));
        assert!(!screenshots.accepts("README"));
    }

    #[test]
    fn logo_matches_stem_and_extension() {
        let logo = LogoConfig::default();
        assert!(logo.matches("logo.png"));
        assert!(logo.matches("Logo.SVG"));
        assert!(!logo.matches("logo.pdf"));
        assert!(!logo.matches("logo-dark.png"));
    }

    #[test]
    fn empty_logo_stem_disables_detection() {
        let logo = LogoConfig {
            stem: String::new(),
            ..LogoConfig::default()
        };
        assert!(!logo.matches("logo.png"));
    }

    #[test]
    fn parse_partial_config() {
        let overlay: toml::Value = toml::from_str(r#"categories = ["projects"]"#).unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.categories, vec!["projects"]);
        // Asset types untouched
        assert_eq!(config.asset_types.len(), 4);
    }

    #[test]
    fn asset_types_replaced_wholesale() {
        let overlay: toml::Value = toml::from_str(
            r#"
[[asset_types]]
name = "audio"
extensions = ["mp3", "ogg"]
"#,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(type_names(&config), vec!["audio"]);
    }

    #[test]
    fn extensions_are_normalized() {
        let overlay: toml::Value = toml::from_str(
            r#"
[[asset_types]]
name = "screenshots"
extensions = [".PNG", "png", "Jpg"]
"#,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.asset_types[0].extensions, vec!["png", "jpg"]);
    }

    #[test]
    fn logo_table_merged_key_by_key() {
        let overlay: toml::Value = toml::from_str(
            r#"
[logo]
stem = "icon"
"#,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.logo.stem, "icon");
        assert_eq!(config.logo.extensions.len(), 5);
    }

    #[test]
    fn unknown_key_rejected() {
        let overlay: toml::Value = toml::from_str(r#"categoriez = ["projects"]"#).unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn empty_categories_rejected() {
        let overlay: toml::Value = toml::from_str("categories = []").unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn duplicate_category_rejected() {
        let overlay: toml::Value =
            toml::from_str(r#"categories = ["projects", "projects"]"#).unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(msg)) if msg.contains("duplicate")));
    }

    #[test]
    fn nested_category_path_rejected() {
        let overlay: toml::Value = toml::from_str(r#"categories = ["projects/old"]"#).unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn asset_type_named_logo_rejected() {
        let overlay: toml::Value = toml::from_str(
            r#"
[[asset_types]]
name = "logo"
extensions = ["png"]
"#,
        )
        .unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(msg)) if msg.contains("reserved")));
    }

    #[test]
    fn asset_type_without_extensions_rejected() {
        let overlay: toml::Value = toml::from_str(
            r#"
[[asset_types]]
name = "videos"
extensions = []
"#,
        )
        .unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path(), None).unwrap();
        assert_eq!(config, ManifestConfig::default());
    }

    #[test]
    fn load_config_reads_root_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"categories = ["projects", "talks"]"#,
        )
        .unwrap();

        let config = load_config(tmp.path(), None).unwrap();
        assert_eq!(config.categories, vec!["projects", "talks"]);
    }

    #[test]
    fn load_config_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");
        fs::write(&path, r#"categories = ["education"]"#).unwrap();

        let config = load_config(tmp.path(), Some(&path)).unwrap();
        assert_eq!(config.categories, vec!["education"]);
    }

    #[test]
    fn load_config_explicit_missing_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.toml");
        let result = load_config(tmp.path(), Some(&path));
        assert!(matches!(result, Err(ConfigError::Missing(_))));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path(), None);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }
}

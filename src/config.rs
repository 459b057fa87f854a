//! Category configuration loading and validation.
//!
//! Custom category tables are supplied as a JSON object mapping category
//! names to ordered lists of extension strings:
//!
//! ```json
//! {
//!     "Pictures": [".png", ".jpg"],
//!     "Text": [".txt", ".md"]
//! }
//! ```
//!
//! The mapping order in the file is preserved, because resolution is
//! first-match over the table order. All schema problems are rejected here,
//! at load time, before any traversal starts: every value must be an array
//! of strings and every extension must be non-empty and carry its leading
//! dot. Extensions are lowercased on load.

use crate::category::CategoryTable;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while loading a category configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// IO error while reading the configuration file.
    IoError(String),
    /// The file is not valid JSON.
    InvalidJson(String),
    /// The JSON is well-formed but does not match the expected schema.
    InvalidSchema {
        /// Description of what was wrong and where.
        reason: String,
    },
    /// The configuration parsed to an empty table.
    EmptyTable,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
            ConfigError::InvalidJson(msg) => write!(f, "Invalid JSON in configuration: {}", msg),
            ConfigError::InvalidSchema { reason } => {
                write!(f, "Invalid category configuration: {}", reason)
            }
            ConfigError::EmptyTable => {
                write!(f, "Category configuration defines no categories")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Loads a category table, falling back to the built-in default.
///
/// With `None`, returns [`CategoryTable::default`]. With a path, reads and
/// validates the JSON mapping described in the module docs.
///
/// # Errors
///
/// Returns `ConfigError::ConfigNotFound` if the file does not exist,
/// `ConfigError::InvalidJson` on parse failure, and
/// `ConfigError::InvalidSchema` on any shape or content violation.
pub fn load_categories(config_path: Option<&Path>) -> Result<CategoryTable, ConfigError> {
    match config_path {
        None => Ok(CategoryTable::default()),
        Some(path) => load_from_file(path),
    }
}

fn load_from_file(path: &Path) -> Result<CategoryTable, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let value: Value =
        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidJson(e.to_string()))?;

    // serde_json's preserve_order feature keeps the object's key order, so
    // the table iterates in the same order the user wrote it.
    let object = value.as_object().ok_or_else(|| ConfigError::InvalidSchema {
        reason: "top-level value must be an object mapping category names to extension lists"
            .to_string(),
    })?;

    let mut entries = Vec::with_capacity(object.len());
    for (name, extensions) in object {
        if name.trim().is_empty() {
            return Err(ConfigError::InvalidSchema {
                reason: "category names must be non-empty".to_string(),
            });
        }

        let list = extensions
            .as_array()
            .ok_or_else(|| ConfigError::InvalidSchema {
                reason: format!("category '{}' must map to an array of extensions", name),
            })?;

        let mut validated = Vec::with_capacity(list.len());
        for item in list {
            let ext = item.as_str().ok_or_else(|| ConfigError::InvalidSchema {
                reason: format!("category '{}' contains a non-string extension", name),
            })?;

            if ext.len() < 2 || !ext.starts_with('.') {
                return Err(ConfigError::InvalidSchema {
                    reason: format!(
                        "category '{}' has invalid extension '{}': expected '.ext'",
                        name, ext
                    ),
                });
            }

            validated.push(ext.to_lowercase());
        }

        entries.push((name.clone(), validated));
    }

    if entries.is_empty() {
        return Err(ConfigError::EmptyTable);
    }

    Ok(CategoryTable::new(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp config");
        file.write_all(content.as_bytes())
            .expect("Failed to write temp config");
        file
    }

    #[test]
    fn test_load_none_returns_default_table() {
        let table = load_categories(None).expect("default table should load");
        assert_eq!(table.resolve(".pdf"), "Documents");
    }

    #[test]
    fn test_load_valid_config() {
        let file = config_file(r#"{"Pictures": [".png", ".JPG"], "Text": [".txt"]}"#);
        let table = load_categories(Some(file.path())).expect("config should load");

        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve(".png"), "Pictures");
        assert_eq!(table.resolve(".jpg"), "Pictures");
        assert_eq!(table.resolve(".txt"), "Text");
        assert_eq!(table.resolve(".pdf"), "Others");
    }

    #[test]
    fn test_load_preserves_declaration_order() {
        // ".x" appears in both categories; the one declared first wins.
        let file = config_file(r#"{"Second": [".x"], "First": [".x", ".y"]}"#);
        let table = load_categories(Some(file.path())).expect("config should load");
        assert_eq!(table.resolve(".x"), "Second");
        assert_eq!(table.resolve(".y"), "First");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_categories(Some(Path::new("/nonexistent/categories.json")));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let file = config_file("{not json");
        let result = load_categories(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::InvalidJson(_))));
    }

    #[test]
    fn test_non_object_root_rejected() {
        let file = config_file(r#"[".png"]"#);
        let result = load_categories(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::InvalidSchema { .. })));
    }

    #[test]
    fn test_non_array_category_rejected() {
        let file = config_file(r#"{"Pictures": ".png"}"#);
        let result = load_categories(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::InvalidSchema { .. })));
    }

    #[test]
    fn test_extension_without_dot_rejected() {
        let file = config_file(r#"{"Pictures": ["png"]}"#);
        let result = load_categories(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::InvalidSchema { .. })));
    }

    #[test]
    fn test_bare_dot_extension_rejected() {
        let file = config_file(r#"{"Pictures": ["."]}"#);
        let result = load_categories(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::InvalidSchema { .. })));
    }

    #[test]
    fn test_empty_object_rejected() {
        let file = config_file("{}");
        let result = load_categories(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::EmptyTable)));
    }
}

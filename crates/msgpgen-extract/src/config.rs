//! Extraction options.
//!
//! Options can be built in code or loaded from TOML. A project may carry a
//! `.msgpgen.toml` at its root:
//!
//! ```toml
//! tag_key = "msg"
//! exported_only = false
//! duplicate_keys = "error"   # or "last-wins"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up by [`ExtractOptions::discover`].
pub const CONFIG_FILE_NAME: &str = ".msgpgen.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// What to do when two fields of one aggregate resolve to the same output key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateKeys {
    /// Abort the file with [`ExtractError::DuplicateKey`](crate::ExtractError::DuplicateKey).
    #[default]
    Error,
    /// Keep the later field, drop the earlier one with a warning.
    LastWins,
}

/// Options controlling field policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Struct-tag key whose value overrides the output key.
    pub tag_key: String,
    /// Only extract declarations with exported names.
    pub exported_only: bool,
    /// Duplicate output key policy.
    pub duplicate_keys: DuplicateKeys,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            tag_key: "msg".to_string(),
            exported_only: false,
            duplicate_keys: DuplicateKeys::Error,
        }
    }
}

impl ExtractOptions {
    /// Parse options from TOML text. Missing keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load options from an explicit file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load `<root>/.msgpgen.toml` if present, defaults otherwise.
    pub fn discover(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let options = ExtractOptions::default();
        assert_eq!(options.tag_key, "msg");
        assert!(!options.exported_only);
        assert_eq!(options.duplicate_keys, DuplicateKeys::Error);
    }

    #[test]
    fn test_partial_toml() {
        let options = ExtractOptions::from_toml("duplicate_keys = \"last-wins\"").unwrap();
        assert_eq!(options.duplicate_keys, DuplicateKeys::LastWins);
        assert_eq!(options.tag_key, "msg");
    }

    #[test]
    fn test_invalid_toml() {
        let err = ExtractOptions::from_toml("duplicate_keys = \"sometimes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_discover() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            ExtractOptions::discover(dir.path()).unwrap(),
            ExtractOptions::default()
        );

        let mut file = std::fs::File::create(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        writeln!(
            file,
            r#"
tag_key = "codec"
exported_only = true
"#
        )
        .unwrap();

        let options = ExtractOptions::discover(dir.path()).unwrap();
        assert_eq!(options.tag_key, "codec");
        assert!(options.exported_only);
        assert_eq!(options.duplicate_keys, DuplicateKeys::Error); // default
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = ExtractOptions::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

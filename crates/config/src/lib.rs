//! Build configuration for the ENG toolchain.
//!
//! A project may place an `eng.json` next to its `.heng` sources. Every
//! field is optional; missing fields take the defaults of
//! [`Config::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name looked up beside the input when no explicit config is given.
pub const CONFIG_FILE_NAME: &str = "eng.json";

/// Largest accepted `indent_width`.
pub const MAX_INDENT_WIDTH: usize = 8;

/// Errors that can occur when loading or validating a [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// JSON deserialization failed.
    #[error("invalid config JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A field value is out of its valid range.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// The name of the field that failed validation.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Options shared by the compiler library and the CLI.
///
/// # Example
/// ```
/// let config = eng_toolchain_config::Config::from_json(r#"{"indent_width": 4}"#).unwrap();
/// assert_eq!(config.indent_width, 4);
/// assert_eq!(config.default_title, "ENG Page");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `<title>` used when no `setup*` function declares one.
    pub default_title: String,
    /// Spaces per nesting level in the generated HTML.
    pub indent_width: usize,
    /// Compile `.seng`/`.ceng` imports and inline the result. When false,
    /// every import is emitted as an external reference.
    pub inline_imports: bool,
    /// Write the compiled `.js`/`.css` of each import next to its source.
    pub emit_sidecars: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_title: "ENG Page".into(),
            indent_width: 2,
            inline_imports: true,
            emit_sidecars: true,
        }
    }
}

impl Config {
    /// Parse and validate a config from JSON text.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Load `eng.json` from `dir` if it exists, otherwise return defaults.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Check field invariants.
    ///
    /// - `default_title` must not be blank
    /// - `indent_width` must be at most [`MAX_INDENT_WIDTH`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_title.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                field: "default_title".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.indent_width > MAX_INDENT_WIDTH {
            return Err(ConfigError::InvalidField {
                field: "indent_width".into(),
                reason: format!(
                    "{} exceeds maximum indent width ({MAX_INDENT_WIDTH})",
                    self.indent_width
                ),
            });
        }
        Ok(())
    }

    /// One level of indentation as a string.
    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.indent_unit(), "  ");
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = Config::from_json(r#"{"inline_imports": false}"#).unwrap();
        assert!(!config.inline_imports);
        assert!(config.emit_sidecars);
        assert_eq!(config.default_title, "ENG Page");
    }

    #[test]
    fn blank_title_rejected() {
        let err = Config::from_json(r#"{"default_title": "   "}"#).unwrap_err();
        match err {
            ConfigError::InvalidField { field, .. } => assert_eq!(field, "default_title"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn indent_too_wide_rejected() {
        let err = Config::from_json(r#"{"indent_width": 12}"#).unwrap_err();
        assert!(err.to_string().contains("indent_width"), "{err}");
    }

    #[test]
    fn zero_indent_accepted() {
        let config = Config::from_json(r#"{"indent_width": 0}"#).unwrap();
        assert_eq!(config.indent_unit(), "");
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(matches!(
            Config::from_json(r#"{"indent": 2}"#),
            Err(ConfigError::InvalidJson(_))
        ));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            Config::from_json("{not json"),
            Err(ConfigError::InvalidJson(_))
        ));
    }

    #[test]
    fn discover_without_file_gives_defaults() {
        let dir = std::env::temp_dir().join("eng-config-discover-missing");
        let config = Config::discover(&dir).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Config::load(Path::new("/definitely/not/here/eng.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("failed to read config"));
    }

    #[test]
    fn serde_round_trip() {
        let config = Config {
            default_title: "Docs".into(),
            indent_width: 4,
            inline_imports: false,
            emit_sidecars: false,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(Config::from_json(&json).unwrap(), config);
    }
}

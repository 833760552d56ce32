// Copyright 2026 the Accrete Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Demo configuration file loading.

use std::path::{Path, PathBuf};

use accrete_repeater::{GridConfig, ListConfig};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading the demo configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read the file (missing files are not an error).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// The file is not valid TOML or has unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// Contents of a demo configuration file.
///
/// ```toml
/// [list]
/// items_per_page = 10
/// reuse_items = true
///
/// [grid]
/// rows = 3
/// columns = 5
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// Settings for the list page.
    pub list: ListConfig,
    /// Settings for the grid page.
    pub grid: GridConfig,
}

impl DemoConfig {
    /// Three rows of five, the layout the example pages use.
    #[must_use]
    pub fn example() -> Self {
        Self {
            list: ListConfig::default(),
            grid: GridConfig {
                rows: 3,
                columns: 5,
                ..GridConfig::default()
            },
        }
    }
}

/// Parses a configuration from TOML text. `path` is only used for errors.
pub fn parse_config(contents: &str, path: &Path) -> Result<DemoConfig, ConfigError> {
    toml::from_str(contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Loads the configuration at `path`.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_config(path: impl Into<PathBuf>) -> Result<Option<DemoConfig>, ConfigError> {
    let path = path.into();
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    parse_config(&contents, &path).map(Some)
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DemoConfig, load_config, parse_config};
    use std::path::Path;

    #[test]
    fn missing_file_is_not_an_error() {
        assert_eq!(load_config("/nonexistent/accrete/demo.toml"), Ok(None));
    }

    #[test]
    fn tables_override_only_what_they_name() {
        let config = parse_config(
            "[list]\nitems_per_page = 4\n\n[grid]\ncolumns = 5\nrow_tag = \"div\"\n",
            Path::new("demo.toml"),
        )
        .unwrap();

        assert_eq!(config.list.items_per_page, 4);
        assert!(!config.list.reuse_items);
        assert_eq!(config.grid.columns, 5);
        assert_eq!(config.grid.rows, usize::MAX);
        assert_eq!(config.grid.row_tag, "div");
        assert_eq!(config.grid.item_tag, "td");
    }

    #[test]
    fn empty_file_is_the_default() {
        let config = parse_config("", Path::new("demo.toml")).unwrap();
        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_config("[grid]\ncolumsn = 5\n", Path::new("demo.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }), "got {err:?}");
    }
}

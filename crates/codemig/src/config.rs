//! `codemig.toml` configuration.

use std::path::{Path, PathBuf};

use codemig_extract::ExtractOptions;
use serde::Deserialize;

use crate::runner::RunOptions;

/// Errors loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML.
    #[error("invalid config")]
    Parse(#[from] toml::de::Error),
}

/// The `[run]` section: file discovery knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunSection {
    /// Directory names skipped during the walk.
    pub ignore_dirs: Vec<String>,
    /// File names skipped during the walk.
    pub ignore_files: Vec<String>,
    /// Extension allow-list.
    pub extensions: Vec<String>,
    /// Files larger than this are recorded as `Skipped`.
    pub max_file_bytes: usize,
}

impl Default for RunSection {
    fn default() -> Self {
        let defaults = RunOptions::default();
        Self {
            ignore_dirs: defaults.ignore_dirs,
            ignore_files: defaults.ignore_files,
            extensions: defaults.extensions,
            max_file_bytes: defaults.max_file_bytes,
        }
    }
}

/// The `[api]` section: fact-recognition knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    /// Base-URL prefixes stripped during canonicalization.
    pub base_url_prefixes: Vec<String>,
    /// Identifiers recognized as base-URL template interpolations.
    pub base_url_idents: Vec<String>,
    /// Object names treated as HTTP client helpers.
    pub client_objects: Vec<String>,
    /// Object names treated as route registrars.
    pub route_objects: Vec<String>,
}

impl Default for ApiSection {
    fn default() -> Self {
        let defaults = ExtractOptions::default();
        Self {
            base_url_prefixes: defaults.base_url_prefixes,
            base_url_idents: defaults.base_url_idents,
            client_objects: defaults.client_objects,
            route_objects: defaults.route_objects,
        }
    }
}

/// A parsed `codemig.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// File discovery settings.
    pub run: RunSection,
    /// Fact-recognition settings.
    pub api: ApiSection,
}

impl RunConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, plus any
    /// error [`Self::parse`] produces.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Converts the parsed sections into runner options.
    #[must_use]
    pub fn into_options(self) -> RunOptions {
        RunOptions {
            ignore_dirs: self.run.ignore_dirs,
            ignore_files: self.run.ignore_files,
            extensions: self.run.extensions,
            max_file_bytes: self.run.max_file_bytes,
            extract: ExtractOptions {
                base_url_prefixes: self.api.base_url_prefixes,
                base_url_idents: self.api.base_url_idents,
                client_objects: self.api.client_objects,
                route_objects: self.api.route_objects,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_yields_defaults() {
        let options = RunConfig::parse("").expect("parse").into_options();
        let defaults = RunOptions::default();
        assert_eq!(options.ignore_dirs, defaults.ignore_dirs);
        assert_eq!(options.extensions, defaults.extensions);
        assert_eq!(options.max_file_bytes, defaults.max_file_bytes);
    }

    #[test]
    fn sections_override_defaults() {
        let text = r#"
[run]
ignore_dirs = ["vendor"]
max_file_bytes = 2048

[api]
base_url_prefixes = ["http://localhost:3000"]
client_objects = ["restClient"]
"#;
        let options = RunConfig::parse(text).expect("parse").into_options();
        assert_eq!(options.ignore_dirs, vec!["vendor"]);
        assert_eq!(options.max_file_bytes, 2048);
        assert_eq!(
            options.extract.base_url_prefixes,
            vec!["http://localhost:3000"]
        );
        assert_eq!(options.extract.client_objects, vec!["restClient"]);
        // Untouched sections keep their defaults.
        assert!(options.extract.route_objects.iter().any(|r| r == "app"));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(RunConfig::parse("[run\nignore_dirs = 1").is_err());
    }
}

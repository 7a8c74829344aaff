//! Error types for the command line

use std::path::PathBuf;
use thiserror::Error;

/// Problems that prevent a validation run from starting
#[derive(Debug, Error)]
pub enum CliError {
    /// The configuration file exists but could not be read
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for `ConfigFile`
    #[error("Failed to parse YAML config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("Invalid ignore pattern '{pattern}': {source}")]
    IgnorePattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

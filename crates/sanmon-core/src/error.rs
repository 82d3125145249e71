//! Fatal configuration errors.

use thiserror::Error;

/// Errors raised while loading or validating the configuration.
///
/// All of these are fatal: the run aborts before any network call and
/// the plugin reports `UNKNOWN` with exit code 3.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

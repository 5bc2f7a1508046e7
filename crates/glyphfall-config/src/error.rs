//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No home or config directory could be determined.
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`Config`](crate::Config).
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("could not serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

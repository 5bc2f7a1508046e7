//! Log file setup.
//!
//! The terminal is taken over by the rain, so logs go to a file.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::eyre::eyre;
use glyphfall_config::Config;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber, returning the log file path.
///
/// `RUST_LOG` takes precedence over the configured level. Logging stays off
/// when no log location can be determined.
pub fn init(config: &Config) -> color_eyre::Result<Option<PathBuf>> {
    let Some(path) = config.log_file.clone().or_else(Config::default_log_path) else {
        return Ok(None);
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::options().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!(e))?;

    Ok(Some(path))
}

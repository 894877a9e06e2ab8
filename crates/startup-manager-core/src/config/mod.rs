mod loader;
pub mod template;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;

pub use loader::{config_dir, config_path, load, try_load};

const MIN_LOG_FILE_MB: u64 = 1;
const MAX_LOG_FILE_MB: u64 = 100;

/// Top-level configuration for Startup Manager.
///
/// Loaded from `~/.config/startup-manager/config.toml`. The file is
/// optional and missing sections fall back to defaults thanks to
/// `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File logging settings.
    pub logging: LogConfig,
}

impl Config {
    /// Clamps values to the ranges the program can use.
    pub fn validate(&mut self) {
        self.logging.max_file_mb = self
            .logging
            .max_file_mb
            .clamp(MIN_LOG_FILE_MB, MAX_LOG_FILE_MB);
        self.logging.level = self.logging.level.trim().to_ascii_lowercase();
    }
}

//! Platform-specific directory management
//!
//! Locates the directory holding the default profile. Follows the XDG Base
//! Directory Specification on Linux and standard locations on macOS and
//! Windows.
//!
//! The `WINSTRAP_CONFIG_DIR` environment variable overrides the default.

use std::env;
use std::path::PathBuf;

/// Environment variable overriding the config directory
pub const ENV_CONFIG_DIR: &str = "WINSTRAP_CONFIG_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "winstrap";

/// Default profile file name
const PROFILE_FILE: &str = "profile.toml";

/// Platform-specific directory provider for winstrap
#[derive(Debug, Clone)]
pub struct WinstrapDirs {
    config_dir: PathBuf,
}

impl WinstrapDirs {
    /// Create a new `WinstrapDirs` instance
    ///
    /// Checks the environment variable first, then falls back to the platform default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    /// Get the config directory path
    ///
    /// - Linux: `$XDG_CONFIG_HOME/winstrap` or `~/.config/winstrap`
    /// - macOS: `~/Library/Application Support/winstrap`
    /// - Windows: `%APPDATA%\winstrap`
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Get the default profile path
    #[must_use]
    pub fn profile_path(&self) -> PathBuf {
        self.config_dir.join(PROFILE_FILE)
    }

    fn resolve_config_dir() -> PathBuf {
        if let Ok(path) = env::var(ENV_CONFIG_DIR) {
            return PathBuf::from(path);
        }

        Self::platform_config_dir()
    }

    fn platform_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                // Fallback to home directory
                dirs::home_dir()
                    .map(|h| h.join(".config").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            })
    }
}

impl Default for WinstrapDirs {
    fn default() -> Self {
        Self::new()
    }
}

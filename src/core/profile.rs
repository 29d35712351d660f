//! Server profile management
//!
//! A profile describes the server a node is bootstrapped against and the
//! workstation-level defaults for certificate verification and proxies. It is
//! read from `profile.toml` in the config directory or from an explicit path.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ProfileError;
use crate::infra::dirs::WinstrapDirs;

/// SSL peer verification mode understood by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SslVerifyMode {
    /// Verify the server certificate
    VerifyPeer,
    /// Skip verification
    VerifyNone,
}

impl SslVerifyMode {
    /// Map a command-line override to a mode
    ///
    /// Only `peer` and `none` are accepted; anything else yields `None`.
    pub fn from_override(value: &str) -> Option<Self> {
        match value {
            "peer" => Some(Self::VerifyPeer),
            "none" => Some(Self::VerifyNone),
            _ => None,
        }
    }

    /// Symbol name as written into the client configuration
    pub fn as_symbol(self) -> &'static str {
        match self {
            Self::VerifyPeer => "verify_peer",
            Self::VerifyNone => "verify_none",
        }
    }
}

/// Server-side settings for a bootstrap
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// URL of the server the client registers with
    #[serde(default)]
    pub chef_server_url: String,

    /// Client name used with the validation key
    #[serde(default)]
    pub validation_client_name: String,

    /// Local path of the validation key
    pub validation_key: Option<PathBuf>,

    /// Local directory holding certificates to trust on the node
    pub trusted_certs_dir: Option<PathBuf>,

    /// Profile default for `verify_api_cert`
    pub verify_api_cert: Option<bool>,

    /// Profile default for `ssl_verify_mode`
    pub ssl_verify_mode: Option<SslVerifyMode>,

    /// HTTP(S) proxy the node should use
    pub bootstrap_proxy: Option<String>,

    /// Hosts excluded from the proxy
    pub bootstrap_no_proxy: Option<String>,
}

impl ServerConfig {
    /// Load the default profile from the config directory
    ///
    /// A missing file yields the default profile.
    pub fn load(dirs: &WinstrapDirs) -> Result<Self, ProfileError> {
        Self::load_from_path(&dirs.profile_path())
    }

    /// Load a profile from a specific path
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::ParseError` if the file exists but contains
    /// invalid TOML.
    pub fn load_from_path(path: &Path) -> Result<Self, ProfileError> {
        if !path.exists() {
            tracing::debug!("No profile at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ProfileError::ReadError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        let profile: Self = toml::from_str(&content).map_err(|e| ProfileError::ParseError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        tracing::info!("Loaded profile from {}", path.display());
        Ok(profile)
    }
}

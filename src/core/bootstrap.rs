//! Per-node bootstrap options
//!
//! [`BootstrapConfig`] carries everything specific to the node being
//! bootstrapped. It is assembled once by the caller and never mutated during
//! generation.

use serde_json::{Map, Value};

use crate::config::defaults::DEFAULT_ENVIRONMENT;
use crate::error::PayloadError;

/// Remote scripting engine used to run the download helper
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DownloadEngine {
    /// `cscript` running `wget.vbs`
    #[default]
    Vbscript,
    /// `powershell` running `wget.ps1`
    Powershell,
}

/// Capabilities of the client version being installed
///
/// Supplied by the caller instead of being inferred from any version number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetCapabilities {
    /// Client understands `trusted_certs_dir`
    pub trusted_certs_dir: bool,
}

impl Default for TargetCapabilities {
    fn default() -> Self {
        Self {
            trusted_certs_dir: true,
        }
    }
}

/// Node-specific bootstrap options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BootstrapConfig {
    /// Node name; the client falls back to the FQDN when absent
    pub node_name: Option<String>,

    /// Override for `verify_api_cert`
    pub node_verify_api_cert: Option<bool>,

    /// Override for `ssl_verify_mode`, accepted values are `peer` and `none`
    pub node_ssl_verify_mode: Option<String>,

    /// Legacy switch that repeats the profile `ssl_verify_mode` directive
    pub ssl_verify_mode: bool,

    /// Encrypted data bag secret content
    pub encrypted_data_bag_secret: Option<String>,

    /// Attributes merged into the first-boot document
    pub first_boot_attributes: Map<String, Value>,

    /// Run list for the first client run
    pub run_list: Vec<String>,

    /// Environment for the first client run
    pub environment: Option<String>,

    /// Installer URL overriding the default download location
    pub msi_url: Option<String>,

    /// Engine used to run the download helper
    pub download_engine: DownloadEngine,
}

impl BootstrapConfig {
    /// Effective environment name
    pub fn environment(&self) -> &str {
        self.environment.as_deref().unwrap_or(DEFAULT_ENVIRONMENT)
    }
}

/// Parse first-boot attributes from JSON text
///
/// The document must be a JSON object.
pub fn parse_attributes(json: &str) -> Result<Map<String, Value>, PayloadError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| PayloadError::InvalidAttributes {
            error: e.to_string(),
        })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(PayloadError::AttributesNotObject {
            kind: json_kind(&other).to_string(),
        }),
    }
}

/// Split a comma separated run list, dropping empty items
pub fn parse_run_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

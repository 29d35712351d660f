//! Client configuration assembly
//!
//! Builds the text of `client.rb` for the node. Each optional directive is
//! emitted only when its precondition holds; an unmet precondition simply
//! leaves the directive out. Output depends on nothing but the inputs.

use crate::config::paths::{
    CHECKSUM_CACHE_PATH, CLIENT_KEY, ENCRYPTED_SECRET, FILE_BACKUP_PATH, FILE_CACHE_PATH,
    TRUSTED_CERTS_DIR, VALIDATION_KEY,
};
use crate::core::bootstrap::{BootstrapConfig, TargetCapabilities};
use crate::core::profile::{ServerConfig, SslVerifyMode};
use crate::core::trusted_certs::TrustCertBundle;

/// Placeholder written when no node name is configured
pub const DEFAULT_NODE_NAME_COMMENT: &str = "# Using default node name (fqdn)";

/// Resolve `verify_api_cert`: the override wins, then the profile default
pub fn resolve_verify_api_cert(config: &BootstrapConfig, server: &ServerConfig) -> Option<bool> {
    config.node_verify_api_cert.or(server.verify_api_cert)
}

/// Resolve `ssl_verify_mode`
///
/// A recognised override wins; no override falls back to the profile. An
/// unrecognised override yields no directive at all, even if the profile
/// has a value.
pub fn resolve_ssl_verify_mode(
    config: &BootstrapConfig,
    server: &ServerConfig,
) -> Option<SslVerifyMode> {
    match config.node_ssl_verify_mode.as_deref() {
        Some(value) => {
            let mode = SslVerifyMode::from_override(value);
            if mode.is_none() {
                tracing::warn!("Ignoring unrecognised ssl_verify_mode override '{value}'");
            }
            mode
        }
        None => server.ssl_verify_mode,
    }
}

/// Render `client.rb` as plain text
pub fn render(
    config: &BootstrapConfig,
    server: &ServerConfig,
    trusted_certs: &TrustCertBundle,
    capabilities: TargetCapabilities,
) -> String {
    let mut client_rb = preamble(server);
    for line in directives(config, server, trusted_certs, capabilities) {
        client_rb.push_str(&line);
        client_rb.push('\n');
    }
    client_rb
}

fn preamble(server: &ServerConfig) -> String {
    format!(
        r#"log_level        :info
log_location     STDOUT

chef_server_url  "{server_url}"
validation_client_name "{client_name}"
client_key        "{CLIENT_KEY}"
validation_key    "{VALIDATION_KEY}"

file_cache_path   "{FILE_CACHE_PATH}"
file_backup_path  "{FILE_BACKUP_PATH}"
cache_options     ({{:path => "{CHECKSUM_CACHE_PATH}", :skip_expires => true}})

"#,
        server_url = server.chef_server_url,
        client_name = server.validation_client_name,
    )
}

/// Directive lines following the preamble, in output order
fn directives(
    config: &BootstrapConfig,
    server: &ServerConfig,
    trusted_certs: &TrustCertBundle,
    capabilities: TargetCapabilities,
) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(match &config.node_name {
        Some(name) => format!("node_name \"{name}\""),
        None => DEFAULT_NODE_NAME_COMMENT.to_string(),
    });

    if let Some(verify) = resolve_verify_api_cert(config, server) {
        lines.push(format!("verify_api_cert {verify}"));
    }

    if config.node_ssl_verify_mode.is_some() || server.ssl_verify_mode.is_some() {
        if let Some(mode) = resolve_ssl_verify_mode(config, server) {
            lines.push(format!("ssl_verify_mode :{}", mode.as_symbol()));
        }
    }

    // Legacy switch: repeats the profile value and may duplicate the line above.
    if config.ssl_verify_mode {
        if let Some(mode) = server.ssl_verify_mode {
            lines.push(format!("ssl_verify_mode :{}", mode.as_symbol()));
        }
    }

    if let Some(proxy) = &server.bootstrap_proxy {
        lines.push(String::new());
        lines.push(format!("http_proxy        \"{proxy}\""));
        lines.push(format!("https_proxy       \"{proxy}\""));
        if let Some(no_proxy) = &server.bootstrap_no_proxy {
            lines.push(format!("no_proxy          \"{no_proxy}\""));
        }
    }

    // Fires again when a proxy is set as well.
    if let Some(no_proxy) = &server.bootstrap_no_proxy {
        lines.push(format!("no_proxy       \"{no_proxy}\""));
    }

    if config.encrypted_data_bag_secret.is_some() {
        lines.push(format!("encrypted_data_bag_secret \"{ENCRYPTED_SECRET}\""));
    }

    if capabilities.trusted_certs_dir && !trusted_certs.is_empty() {
        lines.push(format!("trusted_certs_dir \"{TRUSTED_CERTS_DIR}\""));
    }

    lines
}

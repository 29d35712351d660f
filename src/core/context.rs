//! Bootstrap context
//!
//! Owns the inputs of one generation pass and hands out every payload in its
//! encoded, ready-to-embed form. The trusted certificate bundle is collected
//! when the context is built and never re-read.

use crate::config::paths::{BOOTSTRAP_DIR, LOCAL_DOWNLOAD_PATH};
use crate::core::bootstrap::{BootstrapConfig, TargetCapabilities};
use crate::core::encoder::escape_and_echo;
use crate::core::payloads::{self, PayloadKind};
use crate::core::profile::ServerConfig;
use crate::core::trusted_certs::TrustCertBundle;
use crate::core::{client_config, install};
use crate::error::CertError;

/// Inputs of a single bootstrap script generation
#[derive(Debug, Clone)]
pub struct BootstrapContext {
    config: BootstrapConfig,
    server: ServerConfig,
    capabilities: TargetCapabilities,
    trusted_certs: TrustCertBundle,
    validation_key: Option<String>,
}

impl BootstrapContext {
    /// Build a context, collecting trusted certificates from the profile
    pub fn new(
        config: BootstrapConfig,
        server: ServerConfig,
        capabilities: TargetCapabilities,
    ) -> Result<Self, CertError> {
        let trusted_certs = TrustCertBundle::collect(&server, capabilities)?;
        Ok(Self::with_trusted_certs(
            config,
            server,
            capabilities,
            trusted_certs,
        ))
    }

    /// Build a context from an already collected bundle
    pub fn with_trusted_certs(
        config: BootstrapConfig,
        server: ServerConfig,
        capabilities: TargetCapabilities,
        trusted_certs: TrustCertBundle,
    ) -> Self {
        Self {
            config,
            server,
            capabilities,
            trusted_certs,
            validation_key: None,
        }
    }

    /// Attach the validation key content
    #[must_use]
    pub fn with_validation_key(mut self, key: impl Into<String>) -> Self {
        self.validation_key = Some(key.into());
        self
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    pub fn trusted_certs(&self) -> &TrustCertBundle {
        &self.trusted_certs
    }

    /// Whether a validation key was attached
    pub fn has_validation_key(&self) -> bool {
        self.validation_key.is_some()
    }

    /// Whether an encrypted data bag secret was configured
    pub fn has_secret(&self) -> bool {
        self.config.encrypted_data_bag_secret.is_some()
    }

    /// Encoded validation key, empty when none was attached
    pub fn validation_key(&self) -> String {
        escape_and_echo(self.validation_key.as_deref().unwrap_or_default())
    }

    /// Encoded encrypted data bag secret, empty when none was configured
    pub fn encrypted_data_bag_secret(&self) -> String {
        escape_and_echo(
            self.config
                .encrypted_data_bag_secret
                .as_deref()
                .unwrap_or_default(),
        )
    }

    /// Plain `client.rb` text
    pub fn client_rb(&self) -> String {
        client_config::render(
            &self.config,
            &self.server,
            &self.trusted_certs,
            self.capabilities,
        )
    }

    /// Encoded `client.rb`
    pub fn config_content(&self) -> String {
        escape_and_echo(&self.client_rb())
    }

    /// Inline certificate write blocks, not encoded
    pub fn trusted_certs_content(&self) -> String {
        self.trusted_certs.render()
    }

    /// Encoded VBScript download helper
    pub fn win_wget(&self) -> String {
        escape_and_echo(payloads::WGET_VBS)
    }

    /// Encoded PowerShell download helper
    pub fn win_wget_ps(&self) -> String {
        escape_and_echo(payloads::WGET_PS)
    }

    /// Encoded first-boot document
    pub fn first_boot(&self) -> String {
        escape_and_echo(&payloads::first_boot_json(
            &self.config.first_boot_attributes,
            &self.config.run_list,
        ))
    }

    /// Installer invocation with fallback, plain batch
    pub fn install_chef(&self) -> String {
        install::render_install_sequence()
    }

    /// Client start commands, plain batch
    pub fn start_chef(&self) -> String {
        payloads::start_client(self.config.environment())
    }

    pub fn bootstrap_directory(&self) -> &'static str {
        BOOTSTRAP_DIR
    }

    pub fn local_download_path(&self) -> &'static str {
        LOCAL_DOWNLOAD_PATH
    }

    /// Text of a single named payload
    pub fn payload(&self, kind: PayloadKind) -> String {
        match kind {
            PayloadKind::ClientConfig => self.config_content(),
            PayloadKind::ValidationKey => self.validation_key(),
            PayloadKind::Secret => self.encrypted_data_bag_secret(),
            PayloadKind::WgetVbs => self.win_wget(),
            PayloadKind::WgetPs => self.win_wget_ps(),
            PayloadKind::FirstBoot => self.first_boot(),
            PayloadKind::Install => self.install_chef(),
            PayloadKind::StartClient => self.start_chef(),
            PayloadKind::TrustedCerts => self.trusted_certs_content(),
        }
    }
}

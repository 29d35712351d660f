//! Trusted certificate bundle
//!
//! Collects the certificates the node should trust and renders each one as an
//! inline heredoc write to the remote trusted certificates directory. The
//! bundle is computed once, when the bootstrap context is built, and shared by
//! the configuration payload and the certificate write blocks.

use std::path::Path;

use crate::config::paths::TRUSTED_CERTS_WRITE_DIR;
use crate::core::bootstrap::TargetCapabilities;
use crate::core::profile::ServerConfig;
use crate::error::CertError;
use crate::infra::filesystem;

/// Heredoc terminator used for certificate writes
pub const HEREDOC_MARKER: &str = "EOP";

/// A certificate as it will be written on the node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedCert {
    /// Base file name, reused on the remote side
    pub file_name: String,
    /// File content, unmodified
    pub content: String,
}

impl TrustedCert {
    /// Render the inline write block for this certificate
    pub fn write_block(&self) -> String {
        format!(
            "cat > {TRUSTED_CERTS_WRITE_DIR}/{name} <<'{HEREDOC_MARKER}'\n{content}\n{HEREDOC_MARKER}\n",
            name = self.file_name,
            content = self.content,
        )
    }
}

/// Immutable set of collected certificates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustCertBundle {
    certs: Vec<TrustedCert>,
}

impl TrustCertBundle {
    /// Build a bundle from already collected certificates
    pub fn new(certs: Vec<TrustedCert>) -> Self {
        Self { certs }
    }

    /// Collect certificates from the profile's trusted certificates directory
    ///
    /// Returns an empty bundle when no directory is configured or the target
    /// cannot use one. Any read failure aborts collection.
    pub fn collect(
        server: &ServerConfig,
        capabilities: TargetCapabilities,
    ) -> Result<Self, CertError> {
        let Some(dir) = server.trusted_certs_dir.as_deref() else {
            return Ok(Self::default());
        };
        if !capabilities.trusted_certs_dir {
            tracing::debug!(
                "Target does not support trusted_certs_dir, skipping {}",
                dir.display()
            );
            return Ok(Self::default());
        }
        Self::collect_from_dir(dir)
    }

    /// Collect every certificate directly inside `dir`
    pub fn collect_from_dir(dir: &Path) -> Result<Self, CertError> {
        let mut certs = Vec::new();
        for path in filesystem::list_certificates(dir)? {
            let content = filesystem::read_certificate(&path)?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            tracing::debug!("Collected trusted certificate {file_name}");
            certs.push(TrustedCert { file_name, content });
        }
        tracing::info!(
            "Collected {} trusted certificate(s) from {}",
            certs.len(),
            dir.display()
        );
        Ok(Self { certs })
    }

    /// Whether no certificate was collected
    pub fn is_empty(&self) -> bool {
        self.certs.is_empty()
    }

    /// Number of collected certificates
    pub fn len(&self) -> usize {
        self.certs.len()
    }

    /// Collected certificates in write order
    pub fn certs(&self) -> &[TrustedCert] {
        &self.certs
    }

    /// Concatenated write blocks for every certificate
    pub fn render(&self) -> String {
        self.certs.iter().map(TrustedCert::write_block).collect()
    }
}

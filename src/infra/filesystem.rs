//! Filesystem operations
//!
//! Reads the local inputs of a bootstrap: keys, secrets, attribute files and
//! trusted certificates.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::defaults::CERT_EXTENSIONS;
use crate::error::{CertError, PayloadError};

/// Read a key, secret or attribute file
pub fn read_file(path: &Path) -> Result<String, PayloadError> {
    std::fs::read_to_string(path).map_err(|e| PayloadError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Whether a path carries one of the certificate extensions
pub fn is_certificate(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CERT_EXTENSIONS.contains(&ext))
}

/// List certificate files directly inside `dir`, sorted by file name
///
/// Subdirectories are not descended into. A missing or unreadable directory
/// is an error.
pub fn list_certificates(dir: &Path) -> Result<Vec<PathBuf>, CertError> {
    let mut certs = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| CertError::ReadDir {
            path: dir.to_path_buf(),
            error: e.to_string(),
        })?;
        if entry.file_type().is_file() && is_certificate(entry.path()) {
            certs.push(entry.into_path());
        }
    }
    Ok(certs)
}

/// Read a certificate file verbatim
///
/// Certificates are embedded as text, so anything that is not UTF-8 (a DER
/// encoded certificate, typically) is rejected with [`CertError::NotText`].
pub fn read_certificate(path: &Path) -> Result<String, CertError> {
    let bytes = std::fs::read(path).map_err(|e| CertError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|_| CertError::NotText {
        path: path.to_path_buf(),
    })
}

//! Error types for winstrap
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Trusted certificate collection errors
///
/// Any of these aborts the whole generation pass; there is no partial bundle.
#[derive(Error, Debug)]
pub enum CertError {
    /// Certificate directory could not be enumerated
    #[error("Failed to read certificate directory '{path}': {error}")]
    ReadDir { path: PathBuf, error: String },

    /// Certificate file could not be read
    #[error("Failed to read certificate '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    /// Certificate file is not PEM text
    #[error("Certificate '{path}' is not PEM text; binary (DER) certificates are not supported")]
    NotText { path: PathBuf },
}

/// Profile (server configuration) errors
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Failed to read profile file
    #[error("Failed to read profile '{path}': {error}")]
    ReadError { path: String, error: String },

    /// Failed to parse profile file
    #[error("Failed to parse profile '{path}': {error}")]
    ParseError { path: String, error: String },
}

/// Errors while gathering payload inputs
#[derive(Error, Debug)]
pub enum PayloadError {
    /// Key, secret or attribute file could not be read
    #[error("Failed to read '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    /// First-boot attributes are not valid JSON
    #[error("Invalid first-boot attributes: {error}")]
    InvalidAttributes { error: String },

    /// First-boot attributes parsed but are not a JSON object
    #[error("First-boot attributes must be a JSON object, got {kind}")]
    AttributesNotObject { kind: String },
}

/// Top-level winstrap error type
#[derive(Error, Debug)]
pub enum WinstrapError {
    /// Certificate error
    #[error("Certificate error: {0}")]
    Cert(#[from] CertError),

    /// Profile error
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Payload error
    #[error("Payload error: {0}")]
    Payload(#[from] PayloadError),
}

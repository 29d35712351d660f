//! Core business logic module
//!
//! Pure generation logic. File reads go through [`crate::infra`].
//!
//! # Submodules
//!
//! - [`encoder`] - Text to `echo.` command encoding
//! - [`bootstrap`] - Per-node bootstrap options
//! - [`profile`] - Server profile loading
//! - [`trusted_certs`] - Trusted certificate bundle
//! - [`client_config`] - `client.rb` assembly
//! - [`payloads`] - Download helpers, first-boot document, client start
//! - [`install`] - Installer invocation and fallback protocol
//! - [`context`] - Per-generation context handing out encoded payloads
//! - [`script`] - Full bootstrap script assembly

pub mod bootstrap;
pub mod client_config;
pub mod context;
pub mod encoder;
pub mod install;
pub mod payloads;
pub mod profile;
pub mod script;
pub mod trusted_certs;

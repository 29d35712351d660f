//! Winstrap - Windows bootstrap script generator
//!
//! Produces batch scripts that prepare a Windows node for an unattended
//! client install when the only remote channel is a line-oriented command
//! interpreter.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Payload encoding, configuration assembly, install protocol
//! - [`infra`] - Infrastructure layer (filesystem, platform directories)
//! - [`config`] - Constants: remote paths, task names, defaults
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;

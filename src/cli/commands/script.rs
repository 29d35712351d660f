//! CLI command for `winstrap script`
//!
//! Renders the complete bootstrap batch script.

use std::path::Path;

use anyhow::Result;

use super::{build_context, BootstrapArgs};
use crate::cli::output::{emit, print_detail};
use crate::core::script;

/// Execute the script command
pub fn execute(args: &BootstrapArgs, profile: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let ctx = build_context(args, profile)?;
    tracing::info!("Generating bootstrap script for {}", ctx.server().chef_server_url);

    let text = script::render(&ctx);
    emit(&text, output)?;

    if output.is_some() {
        for cert in ctx.trusted_certs().certs() {
            print_detail(&format!("Embedded trusted certificate {}", cert.file_name));
        }
        if !ctx.has_validation_key() {
            print_detail("No validation key configured");
        }
    }
    Ok(())
}

//! CLI command for `winstrap payload`
//!
//! Emits one encoded payload for embedding into a hand-written script.

use std::path::Path;

use anyhow::Result;

use super::{build_context, BootstrapArgs};
use crate::cli::output::emit;
use crate::core::payloads::PayloadKind;

/// Execute the payload command
pub fn execute(
    kind: PayloadKind,
    args: &BootstrapArgs,
    profile: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let ctx = build_context(args, profile)?;
    tracing::debug!("Generating payload {kind:?}");
    emit(&ctx.payload(kind), output)
}

//! Output formatting
//!
//! Generated script text goes to stdout or a file; everything meant for the
//! user goes to stderr so it never ends up inside a script.

use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};

static QUIET: AtomicBool = AtomicBool::new(false);

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}

/// Output preferences taken from global flags
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Suppress everything but errors
    pub quiet: bool,
    /// Verbosity level (`-v` count)
    pub verbose: u8,
}

impl OutputConfig {
    pub fn new(quiet: bool, verbose: u8) -> Self {
        Self { quiet, verbose }
    }

    /// Make these preferences visible to the print helpers
    pub fn apply_global(self) {
        QUIET.store(self.quiet, Ordering::Relaxed);
    }

    /// Log level implied by the flags
    pub fn log_level(self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }
}

fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Print a success line
pub fn print_success(message: &str) {
    if !is_quiet() {
        eprintln!("{} {message}", status::SUCCESS);
    }
}

/// Print an indented detail line
pub fn print_detail(message: &str) {
    if !is_quiet() {
        eprintln!("  {} {message}", status::INFO);
    }
}

/// Print an error with its cause chain
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}

/// Write generated text to `output`, or stdout when `None`
pub fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            print_success(&format!("Wrote {}", path.display()));
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("Failed to write to stdout")?;
            if !text.is_empty() && !text.ends_with('\n') {
                stdout.write_all(b"\n").context("Failed to write to stdout")?;
            }
        }
    }
    Ok(())
}

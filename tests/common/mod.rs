//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;
use winstrap::core::encoder::{ECHO_PREFIX, ESCAPE_CHAR, SPECIAL_CHARS};

/// Test project context
///
/// Creates a temporary directory holding a profile, certificates and keys,
/// and runs the winstrap binary against it.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Write `profile.toml`, pointing `trusted_certs_dir` at `certs/` when asked
    pub fn write_profile(&self, with_certs: bool) -> PathBuf {
        let mut content = SAMPLE_PROFILE.to_string();
        if with_certs {
            self.create_dir("certs");
            content.push_str(&format!(
                "trusted_certs_dir = {:?}\n",
                self.path().join("certs").display().to_string()
            ));
        }
        self.create_file("profile.toml", &content);
        self.path().join("profile.toml")
    }

    /// Run winstrap with the project as working and config directory
    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_winstrap"));
        cmd.current_dir(self.path());
        cmd.env("WINSTRAP_CONFIG_DIR", self.path());
        cmd.env_remove("WINSTRAP_PROFILE");
        cmd.env_remove("WINSTRAP_SECRET");
        cmd.env_remove("RUST_LOG");
        for arg in args {
            cmd.arg(arg);
        }
        cmd.output().expect("Failed to execute winstrap")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Replay `echo.` commands the way `cmd.exe` prints them
///
/// Panics on any character that would split or redirect the command.
pub fn replay_echo(encoded: &str) -> String {
    encoded
        .lines()
        .map(|line| {
            let body = line
                .strip_prefix(ECHO_PREFIX)
                .unwrap_or_else(|| panic!("not an echo command: {line}"));
            let mut out = String::new();
            let mut quoted = false;
            let mut chars = body.chars();
            while let Some(c) = chars.next() {
                if c == '"' {
                    quoted = !quoted;
                    out.push(c);
                } else if quoted {
                    out.push(c);
                } else if c == ESCAPE_CHAR {
                    let escaped = chars
                        .next()
                        .unwrap_or_else(|| panic!("dangling escape in: {line}"));
                    out.push(escaped);
                } else if SPECIAL_CHARS.contains(&c) {
                    panic!("unescaped {c:?} in: {line}");
                } else {
                    out.push(c);
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sample profile TOML for testing
pub const SAMPLE_PROFILE: &str = r#"
chef_server_url = "https://chef.example.com/organizations/acme"
validation_client_name = "acme-validator"
"#;

/// Sample certificate for testing
pub const SAMPLE_CERT: &str = "-----BEGIN CERTIFICATE-----
MIIBszCCAVmgAwIBAgIUQ0VSVElGSUNBVEVGT1JURVNUSU5HMAoGCCqGSM49BAMC
-----END CERTIFICATE-----";

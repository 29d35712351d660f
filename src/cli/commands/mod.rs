//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod payload;
pub mod script;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};

use crate::core::bootstrap::{
    parse_attributes, parse_run_list, BootstrapConfig, DownloadEngine, TargetCapabilities,
};
use crate::core::context::BootstrapContext;
use crate::core::payloads::PayloadKind;
use crate::core::profile::ServerConfig;
use crate::error::{PayloadError, ProfileError, WinstrapError};
use crate::infra::dirs::WinstrapDirs;
use crate::infra::filesystem;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the complete bootstrap script
    Script {
        #[command(flatten)]
        bootstrap: BootstrapArgs,

        /// Write the script to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Generate a single encoded payload
    Payload {
        /// Payload to generate
        #[arg(value_enum)]
        name: PayloadArg,

        #[command(flatten)]
        bootstrap: BootstrapArgs,

        /// Write the payload to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Payload names accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadArg {
    /// client.rb
    ClientConfig,
    /// Validation key
    ValidationKey,
    /// Encrypted data bag secret
    Secret,
    /// VBScript download helper
    WgetVbs,
    /// PowerShell download helper
    WgetPs,
    /// First-boot attributes document
    FirstBoot,
    /// Installer invocation with fallback
    Install,
    /// Client start commands
    StartClient,
    /// Inline trusted certificate writes
    TrustedCerts,
}

impl From<PayloadArg> for PayloadKind {
    fn from(arg: PayloadArg) -> Self {
        match arg {
            PayloadArg::ClientConfig => Self::ClientConfig,
            PayloadArg::ValidationKey => Self::ValidationKey,
            PayloadArg::Secret => Self::Secret,
            PayloadArg::WgetVbs => Self::WgetVbs,
            PayloadArg::WgetPs => Self::WgetPs,
            PayloadArg::FirstBoot => Self::FirstBoot,
            PayloadArg::Install => Self::Install,
            PayloadArg::StartClient => Self::StartClient,
            PayloadArg::TrustedCerts => Self::TrustedCerts,
        }
    }
}

/// Download engine names accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EngineArg {
    /// cscript + wget.vbs
    #[default]
    Vbscript,
    /// powershell + wget.ps1
    Powershell,
}

impl From<EngineArg> for DownloadEngine {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Vbscript => Self::Vbscript,
            EngineArg::Powershell => Self::Powershell,
        }
    }
}

/// Node options shared by every generating command
#[derive(Args, Debug, Clone, Default)]
pub struct BootstrapArgs {
    /// Node name (defaults to the node's FQDN)
    #[arg(short = 'N', long)]
    pub node_name: Option<String>,

    /// Override verify_api_cert for the node
    #[arg(long, value_name = "BOOL")]
    pub node_verify_api_cert: Option<bool>,

    /// Override ssl_verify_mode for the node: peer or none
    #[arg(long, value_name = "MODE")]
    pub node_ssl_verify_mode: Option<String>,

    /// Repeat the profile ssl_verify_mode directive
    #[arg(long)]
    pub ssl_verify_mode: bool,

    /// Encrypted data bag secret
    #[arg(long, env = "WINSTRAP_SECRET", hide_env_values = true, conflicts_with = "secret_file")]
    pub secret: Option<String>,

    /// File holding the encrypted data bag secret
    #[arg(long, value_name = "PATH")]
    pub secret_file: Option<PathBuf>,

    /// First-boot attributes as a JSON object
    #[arg(short = 'j', long, value_name = "JSON", conflicts_with = "json_attribute_file")]
    pub json_attributes: Option<String>,

    /// File holding first-boot attributes as a JSON object
    #[arg(long, value_name = "PATH")]
    pub json_attribute_file: Option<PathBuf>,

    /// Comma separated run list
    #[arg(short, long, value_name = "LIST")]
    pub run_list: Option<String>,

    /// Environment for the first client run
    #[arg(short = 'E', long)]
    pub environment: Option<String>,

    /// Installer URL (defaults to the public download endpoint)
    #[arg(long, value_name = "URL")]
    pub msi_url: Option<String>,

    /// Engine running the download helper on the node
    #[arg(long, value_enum, default_value_t = EngineArg::Vbscript)]
    pub download_engine: EngineArg,

    /// Validation key, overriding the profile
    #[arg(long, value_name = "PATH")]
    pub validation_key: Option<PathBuf>,

    /// Server URL, overriding the profile
    #[arg(long, value_name = "URL")]
    pub server_url: Option<String>,

    /// Target client does not support trusted certificate directories
    #[arg(long)]
    pub legacy_client: bool,
}

impl BootstrapArgs {
    /// Build the node configuration, reading any referenced files
    pub fn to_config(&self) -> Result<BootstrapConfig, PayloadError> {
        let secret = match (&self.secret, &self.secret_file) {
            (Some(secret), _) => Some(secret.clone()),
            (None, Some(path)) => Some(filesystem::read_file(path)?),
            (None, None) => None,
        };

        let attributes = match (&self.json_attributes, &self.json_attribute_file) {
            (Some(json), _) => parse_attributes(json)?,
            (None, Some(path)) => parse_attributes(&filesystem::read_file(path)?)?,
            (None, None) => serde_json::Map::new(),
        };

        Ok(BootstrapConfig {
            node_name: self.node_name.clone(),
            node_verify_api_cert: self.node_verify_api_cert,
            node_ssl_verify_mode: self.node_ssl_verify_mode.clone(),
            ssl_verify_mode: self.ssl_verify_mode,
            encrypted_data_bag_secret: secret,
            first_boot_attributes: attributes,
            run_list: self
                .run_list
                .as_deref()
                .map(parse_run_list)
                .unwrap_or_default(),
            environment: self.environment.clone(),
            msi_url: self.msi_url.clone(),
            download_engine: self.download_engine.into(),
        })
    }

    /// Feature gate for the target client
    pub fn capabilities(&self) -> TargetCapabilities {
        TargetCapabilities {
            trusted_certs_dir: !self.legacy_client,
        }
    }
}

/// Load the profile from `profile` or the default location
pub fn load_profile(profile: Option<&Path>) -> Result<ServerConfig, ProfileError> {
    match profile {
        Some(path) => ServerConfig::load_from_path(path),
        None => ServerConfig::load(&WinstrapDirs::new()),
    }
}

/// Build a bootstrap context from command-line arguments and the profile
pub fn build_context(
    args: &BootstrapArgs,
    profile: Option<&Path>,
) -> Result<BootstrapContext, WinstrapError> {
    let mut server = load_profile(profile)?;
    if let Some(url) = &args.server_url {
        server.chef_server_url.clone_from(url);
    }
    if let Some(key) = &args.validation_key {
        server.validation_key = Some(key.clone());
    }

    let config = args.to_config()?;
    let validation_key = server
        .validation_key
        .as_deref()
        .map(filesystem::read_file)
        .transpose()?;

    let mut ctx = BootstrapContext::new(config, server, args.capabilities())?;
    if let Some(key) = validation_key {
        ctx = ctx.with_validation_key(key);
    }
    Ok(ctx)
}

impl Commands {
    /// Execute the command
    pub fn run(self, profile: Option<&Path>) -> Result<()> {
        match self {
            Self::Script { bootstrap, output } => {
                script::execute(&bootstrap, profile, output.as_deref())
            }
            Self::Payload {
                name,
                bootstrap,
                output,
            } => payload::execute(name.into(), &bootstrap, profile, output.as_deref()),
        }
    }
}

//! Full bootstrap script assembly
//!
//! Concatenates every payload of a [`BootstrapContext`] into one batch file
//! for the line interpreter. Block order after the download step is fixed:
//! certificate writes, `client.rb`, secret, validation key, installer with
//! fallback, first-boot document, client start.

use crate::config::defaults::{MSI_LOCAL_PATH_VAR, MSI_LOG_PATH_VAR, MSI_REMOTE_URL_VAR};
use crate::config::paths::{BOOTSTRAP_DIR, MSI_LOG_PATH};
use crate::config::urls::CLIENT_MSI_DOWNLOAD;
use crate::core::bootstrap::DownloadEngine;
use crate::core::context::BootstrapContext;

/// Redirect encoded `echo.` commands into `path`
///
/// Empty content creates an empty file; an empty `( )` block is a syntax
/// error for the interpreter.
pub fn write_block(path: &str, encoded: &str) -> String {
    if encoded.is_empty() {
        format!("type NUL > {path}\n")
    } else {
        format!("> {path} (\n{encoded}\n)\n")
    }
}

/// Render the complete bootstrap script
pub fn render(ctx: &BootstrapContext) -> String {
    let config = ctx.config();
    let mut script = String::new();

    script.push_str(&preamble(ctx));
    script.push_str(&download(ctx));

    if !ctx.trusted_certs().is_empty() {
        script.push_str(&format!(
            "@if NOT EXIST {BOOTSTRAP_DIR}\\trusted_certs (\n    mkdir {BOOTSTRAP_DIR}\\trusted_certs\n)\n"
        ));
        script.push_str(&ctx.trusted_certs_content());
        script.push('\n');
    }

    script.push_str(&write_block(
        &format!("{BOOTSTRAP_DIR}\\client.rb"),
        &ctx.config_content(),
    ));
    script.push('\n');

    if ctx.has_secret() {
        script.push_str(&write_block(
            &format!("{BOOTSTRAP_DIR}\\encrypted_data_bag_secret"),
            &ctx.encrypted_data_bag_secret(),
        ));
        script.push('\n');
    }

    if ctx.has_validation_key() {
        script.push_str("@echo off\necho Writing validation key...\n");
        script.push_str(&write_block(
            &format!("{BOOTSTRAP_DIR}\\validation.pem"),
            &ctx.validation_key(),
        ));
        script.push_str("echo Validation key written.\n@echo on\n\n");
    }

    script.push_str(&ctx.install_chef());
    script.push_str("@endlocal\n\n");

    script.push_str(&write_block(
        &format!("{BOOTSTRAP_DIR}\\first-boot.json"),
        &ctx.first_boot(),
    ));
    script.push('\n');

    script.push_str(&ctx.start_chef());

    tracing::debug!(
        "Rendered bootstrap script: {} lines, {} certificate(s), environment {}",
        script.lines().count(),
        ctx.trusted_certs().len(),
        config.environment()
    );
    script
}

fn preamble(ctx: &BootstrapContext) -> String {
    let msi_url = ctx.config().msi_url.as_deref();
    let mut out = String::from(
        "@rem Delayed expansion evaluates !ERRORLEVEL! when a line runs, not when it is read.\n\
         @setlocal ENABLEDELAYEDEXPANSION\n\n",
    );

    out.push_str(&format!(
        "@set {MSI_LOCAL_PATH_VAR}={}\n@set {MSI_LOG_PATH_VAR}={MSI_LOG_PATH}\n",
        ctx.local_download_path()
    ));

    if msi_url.is_none() {
        out.push_str(
            "@set MACHINE_ARCH=x86_64\n\
             @if /i \"%PROCESSOR_ARCHITECTURE%\"==\"x86\" if not defined PROCESSOR_ARCHITEW6432 @set MACHINE_ARCH=i686\n\
             @FOR /F \"usebackq tokens=4-5 delims=.[] \" %%A IN (`ver`) DO @set WINDOWS_VERSION=%%A.%%B\n",
        );
    }
    out.push_str(&format!(
        "@set \"{MSI_REMOTE_URL_VAR}={}\"\n\n",
        msi_url.unwrap_or(CLIENT_MSI_DOWNLOAD)
    ));

    out.push_str(&format!(
        "@if NOT EXIST {dir} (\n    mkdir {dir}\n)\n\n",
        dir = ctx.bootstrap_directory()
    ));
    out
}

fn download(ctx: &BootstrapContext) -> String {
    let proxy = ctx.server().bootstrap_proxy.as_deref();
    let dir = ctx.bootstrap_directory();

    let (helper, invocation) = match ctx.config().download_engine {
        DownloadEngine::Vbscript => {
            let mut cmd = format!(
                "cscript /nologo {dir}\\wget.vbs /url:\"%{MSI_REMOTE_URL_VAR}%\" /path:\"%{MSI_LOCAL_PATH_VAR}%\""
            );
            if let Some(proxy) = proxy {
                cmd.push_str(&format!(" /proxy:\"{proxy}\""));
            }
            (write_block(&format!("{dir}\\wget.vbs"), &ctx.win_wget()), cmd)
        }
        DownloadEngine::Powershell => {
            let proxy_arg = proxy
                .map(|p| format!(" -proxy '{p}'"))
                .unwrap_or_default();
            let cmd = format!(
                "powershell.exe -ExecutionPolicy Unrestricted -NoLogo -NonInteractive -NoProfile -Command \"& '{dir}\\wget.ps1' -remoteUrl '%{MSI_REMOTE_URL_VAR}%' -localPath '%{MSI_LOCAL_PATH_VAR}%'{proxy_arg}\""
            );
            (write_block(&format!("{dir}\\wget.ps1"), &ctx.win_wget_ps()), cmd)
        }
    };

    format!(
        "{helper}\n@echo Downloading Chef Client package from \"%{MSI_REMOTE_URL_VAR}%\"\n{invocation}\n\n"
    )
}

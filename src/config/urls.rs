//! Installer download locations

/// Omnitruck endpoint serving the Windows client installer.
///
/// `%WINDOWS_VERSION%` and `%MACHINE_ARCH%` are expanded by the remote
/// interpreter after they have been detected on the target.
pub const CLIENT_MSI_DOWNLOAD: &str = "https://www.chef.io/chef/download?p=windows&pv=%WINDOWS_VERSION%&m=%MACHINE_ARCH%&DownloadContext=PowerShell";

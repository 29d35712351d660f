//! Fixed locations on the remote machine
//!
//! Other tooling on the target reads the client configuration and expects the
//! installer log at these paths, so none of them are configurable.

/// Bootstrap working directory (batch notation)
pub const BOOTSTRAP_DIR: &str = "C:\\chef";

/// Where the installer package is downloaded to
pub const LOCAL_DOWNLOAD_PATH: &str = "%TEMP%\\chef-client-latest.msi";

/// Installer log written by `msiexec`
pub const MSI_LOG_PATH: &str = "%TEMP%\\chef-client-msi%RANDOM%.log";

/// Client configuration file
pub const CLIENT_RB: &str = "c:/chef/client.rb";

/// First-boot attributes document
pub const FIRST_BOOT_JSON: &str = "c:/chef/first-boot.json";

/// Client private key
pub const CLIENT_KEY: &str = "c:/chef/client.pem";

/// Validation key
pub const VALIDATION_KEY: &str = "c:/chef/validation.pem";

/// Encrypted data bag secret
pub const ENCRYPTED_SECRET: &str = "c:/chef/encrypted_data_bag_secret";

/// Trusted certificates directory as referenced by the client configuration
pub const TRUSTED_CERTS_DIR: &str = "c:/chef/trusted_certs";

/// Trusted certificates directory as addressed by the inline heredoc writer
pub const TRUSTED_CERTS_WRITE_DIR: &str = "/C:/chef/trusted_certs";

/// Local file cache
pub const FILE_CACHE_PATH: &str = "c:/chef/cache";

/// Local file backups
pub const FILE_BACKUP_PATH: &str = "c:/chef/backup";

/// Checksum cache inside the file cache
pub const CHECKSUM_CACHE_PATH: &str = "c:/chef/cache/checksums";

/// Directories appended to `PATH` before the client is started
pub const CLIENT_BIN_DIRS: &[&str] = &[
    "C:\\ruby\\bin",
    "C:\\opscode\\chef\\bin",
    "C:\\opscode\\chef\\embedded\\bin",
];

//! Default configuration values

/// Environment used when none is given on the command line
pub const DEFAULT_ENVIRONMENT: &str = "_default";

/// Upper bound for the remote `waitfor` on the fallback task, in seconds
pub const FALLBACK_WAIT_SECONDS: u32 = 600;

/// Name of the one-shot scheduled task that re-runs the installer
pub const FALLBACK_TASK_NAME: &str = "chefclientbootstraptask";

/// Signal raised by the scheduled task once the installer exits
pub const FALLBACK_SIGNAL_NAME: &str = "chefclientinstalldone";

/// Remote environment variable holding the installer log path
pub const MSI_LOG_PATH_VAR: &str = "CHEF_CLIENT_MSI_LOG_PATH";

/// Remote environment variable holding the downloaded installer path
pub const MSI_LOCAL_PATH_VAR: &str = "LOCAL_DESTINATION_MSI_PATH";

/// Remote environment variable holding the installer source URL
pub const MSI_REMOTE_URL_VAR: &str = "REMOTE_SOURCE_MSI_URL";

/// File extensions treated as trusted certificates
pub const CERT_EXTENSIONS: &[&str] = &["crt", "pem"];

/// Minimum proptest iterations
pub const MIN_PROPTEST_ITERATIONS: u32 = 100;

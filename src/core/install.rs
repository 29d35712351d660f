//! Installer invocation and fallback protocol
//!
//! Some installer failures only happen inside a remote session and go away
//! when the identical command runs as a locally triggered scheduled task. The
//! generated batch therefore runs `msiexec` once, and on a non-zero exit
//! registers a one-shot SYSTEM task running the same command, triggers it and
//! waits (bounded) for the task to signal completion.
//!
//! [`render_install_sequence`] emits that batch text. [`FallbackState`] models
//! the same protocol so every terminal state can be exercised against a
//! [`RemoteHost`] without a Windows machine. Both share the message constants
//! below.

use crate::config::defaults::{
    FALLBACK_SIGNAL_NAME, FALLBACK_TASK_NAME, FALLBACK_WAIT_SECONDS, MSI_LOCAL_PATH_VAR,
    MSI_LOG_PATH_VAR,
};

/// Reported when the primary attempt succeeds
pub const MSG_INSTALLED: &str = "Successfully installed Chef Client package.";

/// Reported when the scheduled task cannot be registered
pub const MSG_TASK_CREATE_FAILED: &str =
    "ERROR: Failed to create Chef Client installation scheduled task";

/// Reported when the scheduled task cannot be started
pub const MSG_TASK_RUN_FAILED: &str =
    "ERROR: Failed to execute Chef Client installation scheduled task";

/// Reported when the task signals completion within the bound
pub const MSG_TASK_FINISHED: &str = "Finished waiting for Chef Client package to install.";

/// Reported when the wait bound elapses
pub const MSG_WAIT_TIMEOUT: &str = "ERROR: Timed out waiting for Chef Client package to install";

/// Quote used by the primary invocation
pub const PRIMARY_QUOTE: char = '"';

/// Quote used inside the `schtasks /tr` argument; schtasks turns it back into `"`
pub const TASK_QUOTE: char = '\'';

/// `msiexec` invocation quoted with `quote`
pub fn install_command(quote: char) -> String {
    format!(
        "msiexec /qn /log {quote}%{MSI_LOG_PATH_VAR}%{quote} /i {quote}%{MSI_LOCAL_PATH_VAR}%{quote}"
    )
}

/// Primary invocation followed by the fallback block
pub fn render_install_sequence() -> String {
    format!(
        "{}\n{}",
        install_command(PRIMARY_QUOTE),
        render_fallback()
    )
}

/// Fallback block evaluated right after the primary invocation
///
/// Requires delayed expansion (`!ERRORLEVEL!`) to be enabled by the caller.
pub fn render_fallback() -> String {
    let command = install_command(TASK_QUOTE);
    format!(
        r#"@set MSIERRORCODE=!ERRORLEVEL!
@if ERRORLEVEL 1 (
    @echo WARNING: Failed to install Chef Client MSI package in remote context with status code !MSIERRORCODE!.
    @echo WARNING: This may be due to a defect in operating system update KB2918614: http://support.microsoft.com/kb/2918614
    @set OLDLOGLOCATION="%{log}%-fail.log"
    @move "%{log}%" "!OLDLOGLOCATION!" > NUL
    @echo WARNING: Saving installation log of failure at !OLDLOGLOCATION!
    @echo WARNING: Retrying installation with local context...
    @schtasks /create /f /sc once /st 00:00:00 /tn {task} /ru SYSTEM /rl HIGHEST /tr "cmd /c {command} & ping -n 3 127.0.0.1 & waitfor /s %computername% /si {signal}"

    @if ERRORLEVEL 1 (
        @echo {create_failed} with status code !ERRORLEVEL!. 1>&2
    ) else (
        @echo Successfully created scheduled task to install Chef Client.
        @schtasks /run /tn {task}
        @if ERRORLEVEL 1 (
            @echo {run_failed} with status code !ERRORLEVEL!. 1>&2
        ) else (
            @echo Successfully started Chef Client installation scheduled task.
            @echo Waiting for installation to complete -- this may take a few minutes...
            waitfor {signal} /t {wait}
            if ERRORLEVEL 1 (
                @echo {timeout}
            ) else (
                @echo {finished}
            )
        )
        @schtasks /delete /f /tn {task} > NUL
    )
) else (
    @echo {installed}
)
"#,
        log = MSI_LOG_PATH_VAR,
        task = FALLBACK_TASK_NAME,
        signal = FALLBACK_SIGNAL_NAME,
        wait = FALLBACK_WAIT_SECONDS,
        create_failed = MSG_TASK_CREATE_FAILED,
        run_failed = MSG_TASK_RUN_FAILED,
        timeout = MSG_WAIT_TIMEOUT,
        finished = MSG_TASK_FINISHED,
        installed = MSG_INSTALLED,
    )
}

/// Operations the fallback protocol performs on the node
///
/// Exit statuses follow the batch convention: zero is success.
pub trait RemoteHost {
    /// Run the installer in the current session
    fn run_installer(&mut self, command: &str) -> i32;

    /// Move the installer log aside; failures are ignored
    fn preserve_log(&mut self);

    /// Register the one-shot scheduled task
    fn create_task(&mut self, name: &str, command: &str) -> i32;

    /// Trigger the scheduled task
    fn run_task(&mut self, name: &str) -> i32;

    /// Block until `signal` is raised or `timeout_secs` elapse
    fn wait_for_signal(&mut self, signal: &str, timeout_secs: u32) -> bool;

    /// Delete the scheduled task definition
    fn delete_task(&mut self, name: &str);
}

/// Final result of the install sequence as reported on the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Primary attempt succeeded
    Installed,
    /// Scheduled task signalled completion
    InstalledByTask,
    /// Task registration failed
    TaskCreateFailed { status: i32 },
    /// Task trigger failed
    TaskRunFailed { status: i32 },
    /// No completion signal within the bound
    TimedOut,
}

impl InstallOutcome {
    /// Message the generated script prints for this outcome
    pub fn message(self) -> &'static str {
        match self {
            Self::Installed => MSG_INSTALLED,
            Self::InstalledByTask => MSG_TASK_FINISHED,
            Self::TaskCreateFailed { .. } => MSG_TASK_CREATE_FAILED,
            Self::TaskRunFailed { .. } => MSG_TASK_RUN_FAILED,
            Self::TimedOut => MSG_WAIT_TIMEOUT,
        }
    }

    /// Whether the script halts the fallback on this outcome
    ///
    /// A timeout is reported but not fatal.
    pub fn is_fatal(self) -> bool {
        matches!(
            self,
            Self::TaskCreateFailed { .. } | Self::TaskRunFailed { .. }
        )
    }
}

/// States of the install protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackState {
    /// Run the installer in the remote session
    PrimaryAttempt,
    /// Preserve the log and register the task
    ScheduleFallback,
    /// Trigger the task
    RunFallback,
    /// Wait for the completion signal
    Wait,
    /// Delete the task, then finish with the outcome
    Cleanup(InstallOutcome),
    /// Terminal
    Done(InstallOutcome),
}

impl FallbackState {
    /// Advance one transition
    pub fn step<H: RemoteHost + ?Sized>(self, host: &mut H) -> Self {
        match self {
            Self::PrimaryAttempt => {
                if host.run_installer(&install_command(PRIMARY_QUOTE)) == 0 {
                    Self::Done(InstallOutcome::Installed)
                } else {
                    Self::ScheduleFallback
                }
            }
            Self::ScheduleFallback => {
                host.preserve_log();
                let status = host.create_task(FALLBACK_TASK_NAME, &install_command(TASK_QUOTE));
                if status == 0 {
                    Self::RunFallback
                } else {
                    Self::Done(InstallOutcome::TaskCreateFailed { status })
                }
            }
            Self::RunFallback => {
                let status = host.run_task(FALLBACK_TASK_NAME);
                if status == 0 {
                    Self::Wait
                } else {
                    Self::Cleanup(InstallOutcome::TaskRunFailed { status })
                }
            }
            Self::Wait => {
                if host.wait_for_signal(FALLBACK_SIGNAL_NAME, FALLBACK_WAIT_SECONDS) {
                    Self::Cleanup(InstallOutcome::InstalledByTask)
                } else {
                    Self::Cleanup(InstallOutcome::TimedOut)
                }
            }
            Self::Cleanup(outcome) => {
                host.delete_task(FALLBACK_TASK_NAME);
                Self::Done(outcome)
            }
            Self::Done(_) => self,
        }
    }
}

/// Run the protocol to completion
pub fn drive<H: RemoteHost + ?Sized>(host: &mut H) -> InstallOutcome {
    let mut state = FallbackState::PrimaryAttempt;
    loop {
        state = state.step(host);
        if let FallbackState::Done(outcome) = state {
            return outcome;
        }
    }
}

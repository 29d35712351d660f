//! Integration tests for the installer fallback protocol
//!
//! Drives the protocol model through each terminal state and checks the
//! rendered batch carries the same structure:
//! - primary success
//! - primary failure, task registration failure
//! - primary failure, task trigger failure
//! - primary failure, task finishes in time
//! - primary failure, wait times out

use winstrap::config::defaults::{FALLBACK_TASK_NAME, FALLBACK_WAIT_SECONDS};
use winstrap::core::install::{
    drive, install_command, render_fallback, render_install_sequence, FallbackState,
    InstallOutcome, RemoteHost, MSG_INSTALLED, MSG_TASK_CREATE_FAILED, MSG_TASK_FINISHED,
    MSG_TASK_RUN_FAILED, MSG_WAIT_TIMEOUT,
};

/// Remote host answering from a fixed script and recording every call
#[derive(Default)]
struct ScriptedHost {
    installer_status: i32,
    create_status: i32,
    run_status: i32,
    signalled: bool,
    calls: Vec<String>,
}

impl ScriptedHost {
    fn failing_install() -> Self {
        Self {
            installer_status: 1603,
            ..Default::default()
        }
    }

    fn called(&self, name: &str) -> bool {
        self.calls.iter().any(|c| c.starts_with(name))
    }
}

impl RemoteHost for ScriptedHost {
    fn run_installer(&mut self, command: &str) -> i32 {
        self.calls.push(format!("run_installer {command}"));
        self.installer_status
    }

    fn preserve_log(&mut self) {
        self.calls.push("preserve_log".to_string());
    }

    fn create_task(&mut self, name: &str, command: &str) -> i32 {
        self.calls.push(format!("create_task {name} {command}"));
        self.create_status
    }

    fn run_task(&mut self, name: &str) -> i32 {
        self.calls.push(format!("run_task {name}"));
        self.run_status
    }

    fn wait_for_signal(&mut self, signal: &str, timeout_secs: u32) -> bool {
        self.calls.push(format!("wait_for_signal {signal} {timeout_secs}"));
        self.signalled
    }

    fn delete_task(&mut self, name: &str) {
        self.calls.push(format!("delete_task {name}"));
    }
}

// ============================================
// Protocol model
// ============================================

#[test]
fn test_primary_success() {
    let mut host = ScriptedHost::default();
    let outcome = drive(&mut host);

    assert_eq!(outcome, InstallOutcome::Installed);
    assert_eq!(outcome.message(), MSG_INSTALLED);
    assert_eq!(host.calls.len(), 1);
    assert!(!host.called("create_task"));
    assert!(!host.called("delete_task"));
}

#[test]
fn test_task_create_failure_is_fatal() {
    let mut host = ScriptedHost {
        create_status: 1,
        ..ScriptedHost::failing_install()
    };
    let outcome = drive(&mut host);

    assert_eq!(outcome, InstallOutcome::TaskCreateFailed { status: 1 });
    assert!(outcome.is_fatal());
    assert_eq!(outcome.message(), MSG_TASK_CREATE_FAILED);
    assert!(host.called("preserve_log"));
    assert!(!host.called("run_task"));
    assert!(!host.called("delete_task"));
}

#[test]
fn test_task_run_failure_is_fatal_but_cleans_up() {
    let mut host = ScriptedHost {
        run_status: 5,
        ..ScriptedHost::failing_install()
    };
    let outcome = drive(&mut host);

    assert_eq!(outcome, InstallOutcome::TaskRunFailed { status: 5 });
    assert!(outcome.is_fatal());
    assert_eq!(outcome.message(), MSG_TASK_RUN_FAILED);
    assert!(!host.called("wait_for_signal"));
    assert_eq!(
        host.calls.last().map(String::as_str),
        Some(format!("delete_task {FALLBACK_TASK_NAME}").as_str())
    );
}

#[test]
fn test_fallback_success() {
    let mut host = ScriptedHost {
        signalled: true,
        ..ScriptedHost::failing_install()
    };
    let outcome = drive(&mut host);

    assert_eq!(outcome, InstallOutcome::InstalledByTask);
    assert_eq!(outcome.message(), MSG_TASK_FINISHED);
    assert_eq!(
        host.calls,
        vec![
            format!("run_installer {}", install_command('"')),
            "preserve_log".to_string(),
            format!("create_task {FALLBACK_TASK_NAME} {}", install_command('\'')),
            format!("run_task {FALLBACK_TASK_NAME}"),
            format!("wait_for_signal chefclientinstalldone {FALLBACK_WAIT_SECONDS}"),
            format!("delete_task {FALLBACK_TASK_NAME}"),
        ]
    );
}

#[test]
fn test_timeout_is_not_fatal_and_cleans_up() {
    let mut host = ScriptedHost::failing_install();
    let outcome = drive(&mut host);

    assert_eq!(outcome, InstallOutcome::TimedOut);
    assert!(!outcome.is_fatal());
    assert_eq!(outcome.message(), MSG_WAIT_TIMEOUT);
    assert!(host.called("delete_task"));
}

#[test]
fn test_task_deleted_on_every_path_past_creation() {
    let hosts = [
        ScriptedHost {
            run_status: 1,
            ..ScriptedHost::failing_install()
        },
        ScriptedHost {
            signalled: true,
            ..ScriptedHost::failing_install()
        },
        ScriptedHost::failing_install(),
    ];
    for mut host in hosts {
        drive(&mut host);
        assert!(host.called("create_task"));
        assert_eq!(
            host.calls.iter().filter(|c| c.starts_with("delete_task")).count(),
            1
        );
    }
}

#[test]
fn test_step_by_step_transitions() {
    let mut host = ScriptedHost::failing_install();
    let mut state = FallbackState::PrimaryAttempt;
    let mut seen = vec![state];
    while !matches!(state, FallbackState::Done(_)) {
        state = state.step(&mut host);
        seen.push(state);
    }
    assert_eq!(
        seen,
        vec![
            FallbackState::PrimaryAttempt,
            FallbackState::ScheduleFallback,
            FallbackState::RunFallback,
            FallbackState::Wait,
            FallbackState::Cleanup(InstallOutcome::TimedOut),
            FallbackState::Done(InstallOutcome::TimedOut),
        ]
    );
}

// ============================================
// Rendered batch
// ============================================

fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("missing {needle:?}"))
}

#[test]
fn test_rendered_sequence_order() {
    let script = render_install_sequence();

    let primary = position(&script, &install_command('"'));
    let move_log = position(&script, "@move \"%CHEF_CLIENT_MSI_LOG_PATH%\"");
    let create = position(&script, "@schtasks /create");
    let run = position(&script, "@schtasks /run");
    let wait = position(&script, "waitfor chefclientinstalldone /t 600");
    let delete = position(&script, "@schtasks /delete");

    assert!(primary < move_log);
    assert!(move_log < create);
    assert!(create < run);
    assert!(run < wait);
    assert!(wait < delete);
}

#[test]
fn test_rendered_messages_match_model() {
    let fallback = render_fallback();
    for outcome in [
        InstallOutcome::Installed,
        InstallOutcome::InstalledByTask,
        InstallOutcome::TaskCreateFailed { status: 1 },
        InstallOutcome::TaskRunFailed { status: 1 },
        InstallOutcome::TimedOut,
    ] {
        assert!(
            fallback.contains(outcome.message()),
            "missing message for {outcome:?}"
        );
    }
}

#[test]
fn test_fatal_errors_go_to_stderr() {
    let fallback = render_fallback();
    let fatal_lines = fallback
        .lines()
        .filter(|l| l.contains(MSG_TASK_CREATE_FAILED) || l.contains(MSG_TASK_RUN_FAILED));
    for line in fatal_lines {
        assert!(line.trim_end().ends_with("1>&2"), "not redirected: {line}");
    }
}

#[test]
fn test_delete_follows_trigger_failure_branch() {
    let fallback = render_fallback();
    let run_failed = position(&fallback, MSG_TASK_RUN_FAILED);
    let delete = position(&fallback, "@schtasks /delete");
    let create_failed = position(&fallback, MSG_TASK_CREATE_FAILED);

    assert!(create_failed < run_failed);
    assert!(run_failed < delete);
    let delete_line = fallback.lines().find(|l| l.contains("@schtasks /delete")).unwrap();
    let run_line = fallback.lines().find(|l| l.contains("@schtasks /run")).unwrap();
    // Same nesting as the trigger: inside the task-created branch, outside the trigger branches.
    assert_eq!(
        delete_line.len() - delete_line.trim_start().len(),
        run_line.len() - run_line.trim_start().len()
    );
}

//! Process runner using std::process.

use std::process::{Command, Stdio};

use tracing::{info, instrument};

use strata_core::{
    application::{ApplicationError, ports::CommandRunner},
    domain::ExecutionPlan,
    error::StrataResult,
};

/// Runs the downstream tool as a child process.
///
/// The child inherits this process's environment (with the plan's `env`
/// applied on top) and its stdin, stdout and stderr, so interactive prompts
/// such as terraform's apply confirmation work unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    #[instrument(skip_all, fields(command = %plan.command))]
    fn run(&self, plan: &ExecutionPlan) -> StrataResult<()> {
        info!(
            command_line = %plan.command_line(),
            dir = %plan.working_dir.display(),
            "Executing command"
        );

        let mut command = Command::new(&plan.command);
        command
            .args(&plan.args)
            .envs(plan.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if !plan.working_dir.as_os_str().is_empty() {
            command.current_dir(&plan.working_dir);
        }

        let status = command.status().map_err(|e| ApplicationError::CommandFailed {
            command: plan.command.clone(),
            reason: e.to_string(),
        })?;

        if status.success() {
            return Ok(());
        }

        Err(ApplicationError::NonZeroExit {
            command: plan.command_line(),
            // Killed by a signal; report a generic failure.
            code: status.code().unwrap_or(1),
        }
        .into())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use strata_core::error::StrataError;
    use tempfile::TempDir;

    #[test]
    fn successful_command_is_ok() {
        let plan = ExecutionPlan::new("true", "");
        assert!(ProcessRunner::new().run(&plan).is_ok());
    }

    #[test]
    fn exit_code_is_propagated() {
        let plan = ExecutionPlan::new("sh", "").args(["-c", "exit 3"]);
        let err = ProcessRunner::new().run(&plan).unwrap_err();
        assert_eq!(err.child_exit_code(), Some(3));
    }

    #[test]
    fn env_and_working_dir_are_applied() {
        let temp = TempDir::new().unwrap();
        let plan = ExecutionPlan::new("sh", temp.path())
            .args(["-c", "test \"$STAGE\" = prod && test -f marker"])
            .env("STAGE", "dev")
            .env("STAGE", "prod");
        std::fs::write(temp.path().join("marker"), "").unwrap();

        assert!(ProcessRunner::new().run(&plan).is_ok());
    }

    #[test]
    fn missing_binary_is_a_spawn_failure() {
        let plan = ExecutionPlan::new("strata-definitely-not-a-real-tool", "");
        let err = ProcessRunner::new().run(&plan).unwrap_err();
        assert!(matches!(
            err,
            StrataError::Application(ApplicationError::CommandFailed { .. })
        ));
    }
}

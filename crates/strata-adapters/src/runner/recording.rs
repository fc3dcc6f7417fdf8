//! Recording runner for testing.

use std::sync::{Arc, Mutex};

use strata_core::{
    application::{ApplicationError, ports::CommandRunner},
    domain::ExecutionPlan,
    error::StrataResult,
};

/// Records every plan instead of running it.
///
/// Optionally fails with a fixed exit code, as a tool that ran and failed
/// would. Clones share the recorded plans.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    plans: Arc<Mutex<Vec<ExecutionPlan>>>,
    exit_code: Option<i32>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record plans, then fail each one with `code`.
    pub fn failing_with(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            ..Self::default()
        }
    }

    /// Plans received so far, in order.
    pub fn plans(&self) -> Vec<ExecutionPlan> {
        self.plans
            .lock()
            .map(|plans| plans.clone())
            .unwrap_or_default()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, plan: &ExecutionPlan) -> StrataResult<()> {
        if let Ok(mut plans) = self.plans.lock() {
            plans.push(plan.clone());
        }

        match self.exit_code {
            Some(code) => Err(ApplicationError::NonZeroExit {
                command: plan.command_line(),
                code,
            }
            .into()),
            None => Ok(()),
        }
    }
}

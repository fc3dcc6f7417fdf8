//! Application layer errors.
//!
//! These errors represent failures in orchestration, not resolution logic.
//! Resolution errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Stack configuration files could not be read or parsed.
    #[error("Failed to load stack config '{path}': {reason}")]
    StackLoad { path: PathBuf, reason: String },

    /// Stacks base directory is missing.
    #[error("Stacks directory '{path}' does not exist")]
    StacksDirMissing { path: PathBuf },

    /// The component's working directory is missing.
    #[error("'{component}' points to the {component_type} component directory '{path}', but it does not exist")]
    ComponentDirMissing {
        component: String,
        component_type: String,
        path: PathBuf,
    },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Serializing component vars failed.
    #[error("Failed to serialize variables for the component '{component}': {reason}")]
    Serialization { component: String, reason: String },

    /// The downstream tool could not be started.
    #[error("Failed to execute '{command}': {reason}")]
    CommandFailed { command: String, reason: String },

    /// The downstream tool ran and exited unsuccessfully.
    #[error("'{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// The subcommand is not something the tool dispatcher can plan.
    #[error("Unsupported subcommand '{subcommand}' for {component_type}")]
    UnsupportedSubcommand {
        component_type: String,
        subcommand: String,
    },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::StackLoad { path, .. } => vec![
                format!("Check the YAML syntax of {}", path.display()),
                "Every stack file must be a mapping at the top level".into(),
            ],
            Self::StacksDirMissing { .. } => vec![
                "Set 'stacks.base_path' in strata.toml or pass --stacks-dir".into(),
            ],
            Self::ComponentDirMissing { .. } => vec![
                "Check 'components.<type>.base_path' in strata.toml or pass --terraform-dir/--helmfile-dir".into(),
                "Check the 'component' attribute of the component in the stack".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("Is '{}' installed and on your PATH?", command),
            ],
            Self::UnsupportedSubcommand { .. } => vec![
                "Run the tool directly for this subcommand".into(),
            ],
            Self::Serialization { .. } | Self::NonZeroExit { .. } => Vec::new(),
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::StackLoad { .. } | Self::StacksDirMissing { .. } => ErrorCategory::Configuration,
            Self::ComponentDirMissing { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { .. } | Self::Serialization { .. } => ErrorCategory::Internal,
            Self::CommandFailed { .. } | Self::NonZeroExit { .. } => ErrorCategory::Execution,
            Self::UnsupportedSubcommand { .. } => ErrorCategory::Validation,
        }
    }
}

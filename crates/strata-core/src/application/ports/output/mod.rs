//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `strata-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{ConfigTree, ExecutionPlan, StackType};
use crate::error::StrataResult;

/// Port for reading stack configuration.
///
/// Implemented by:
/// - `strata_adapters::stack_source::YamlStackSource` (stack files on disk)
/// - `strata_adapters::stack_source::StaticStackSource` (testing)
///
/// The returned tree is owned by the caller and never mutated afterwards.
pub trait StackSource: Send + Sync {
    /// Load every stack into a fresh tree.
    fn load(&self) -> StrataResult<ConfigTree>;

    /// Directory mode when `stack` names a stack directly, pattern mode
    /// otherwise.
    fn stack_type(&self, stack: &str) -> StackType;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `strata_adapters::filesystem::LocalFilesystem` (production)
/// - `strata_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> StrataResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for launching the downstream tool.
///
/// Implemented by:
/// - `strata_adapters::runner::ProcessRunner` (production)
/// - `strata_adapters::runner::RecordingRunner` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run `plan` to completion. A non-zero exit is an error.
    fn run(&self, plan: &ExecutionPlan) -> StrataResult<()>;
}

/// Port for announcing execution steps as they happen.
///
/// Implemented by the CLI, which prints each step before it is taken.
#[cfg_attr(test, mockall::automock)]
pub trait ExecutionReporter {
    /// The varfile at `path` is about to be written; on a dry run it is not.
    fn varfile(&self, path: &Path, dry_run: bool);

    /// `plan` is about to run; on a dry run it is not.
    fn command(&self, plan: &ExecutionPlan, dry_run: bool);
}

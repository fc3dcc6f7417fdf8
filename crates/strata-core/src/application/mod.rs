//! Application layer for Strata.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ResolutionService, ExecutionService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! resolution logic itself. All resolution rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{ComponentPaths, ExecutionService, ResolutionService, StackSettings};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandRunner, ExecutionReporter, Filesystem, StackSource};

pub use error::ApplicationError;

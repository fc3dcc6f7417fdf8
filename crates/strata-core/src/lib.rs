//! Strata Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Strata
//! stack/component resolver, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           strata-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ResolutionService, ExecutionService)   │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (StackSource, Filesystem, CommandRunner)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     strata-adapters (Infrastructure)    │
//! │ (YamlStackSource, ProcessRunner, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (partition, reconcile, Context, ...)    │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use strata_core::prelude::*;
//!
//! # fn run(
//! #     source: Box<dyn StackSource>,
//! #     runner: Box<dyn CommandRunner>,
//! #     fs: Box<dyn Filesystem>,
//! #     reporter: &dyn ExecutionReporter,
//! # ) -> StrataResult<()> {
//! let args: Vec<String> = ["plan", "vpc", "-s", "acme-ue2-prod"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! // 1. Split tool arguments from strata flags
//! let args = partition(&args)?;
//!
//! // 2. Resolve the component against the stacks
//! let resolver = ResolutionService::new(source, StackSettings::new("{tenant}-{environment}-{stage}"));
//! let invocation = resolver.resolve(ComponentType::Terraform, &args)?;
//!
//! // 3. Run terraform for it
//! let executor = ExecutionService::new(runner, fs, ComponentPaths::default());
//! executor.execute(&invocation, reporter)?;
//! # Ok(())
//! # }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, ComponentPaths, ExecutionService, ResolutionService, StackSettings,
        ports::{CommandRunner, ExecutionReporter, Filesystem, StackSource},
    };
    pub use crate::domain::{
        ArgsAndFlags, ComponentType, ConfigMap, ConfigTree, ConfigValue, Context, DomainError,
        ExecutionPlan, InvocationDescriptor, NamingPattern, StackType, partition,
    };
    pub use crate::error::{ErrorCategory, StrataError, StrataResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

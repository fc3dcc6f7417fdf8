//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "resolve a component in a stack" or
//! "run terraform for it".

pub mod execution_service;
pub mod resolution_service;

pub use execution_service::{ComponentPaths, ExecutionService};
pub use resolution_service::{ResolutionService, StackSettings};

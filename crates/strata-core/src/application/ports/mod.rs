//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `strata-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `StackSource`: Stack configuration loading
//!   - `Filesystem`: File operations (varfiles)
//!   - `CommandRunner`: Downstream tool execution
//!   - `ExecutionReporter`: Progress of an execution, as it happens
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{CommandRunner, ExecutionReporter, Filesystem, StackSource};

#[cfg(test)]
pub use output::{MockCommandRunner, MockExecutionReporter, MockFilesystem};

//! Infrastructure adapters for Strata.
//!
//! This crate implements the ports defined in `strata-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod runner;
pub mod stack_source;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use runner::{ProcessRunner, RecordingRunner};
pub use stack_source::{StaticStackSource, YamlStackSource};

//! Core domain layer for Strata.
//!
//! This module contains pure resolution logic with no I/O. Loading stack
//! files and running tools are handled via ports (traits) defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or process calls
//! - **Read-only input**: The [`ConfigTree`] is borrowed, never mutated
//! - **Immutable results**: Derived values are built once per invocation
//!
// Public API - what the world sees
pub mod arguments;
pub mod entities;
pub mod error;
pub mod locator;
pub mod reconciler;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use arguments::{ArgsAndFlags, WRITE_VARFILE_SUBCOMMAND, partition};
pub use entities::{
    ComponentPath, ConfigMap, ConfigTree, ConfigValue, Context, ExecutionPlan,
    InvocationDescriptor, InvocationOptions, NamingPattern, PatternSegment, StackSelector,
    base_component_name,
};
pub use error::{DomainError, ErrorCategory};
pub use locator::{ComponentConfig, ComponentMatch, find_component, locate_component};
pub use reconciler::{Reconciled, reconcile};
pub use value_objects::{ComponentType, ContextToken, StackType};

pub use validation::DomainValidator;

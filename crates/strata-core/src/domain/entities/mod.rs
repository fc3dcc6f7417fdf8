pub mod component_path;
pub mod config_tree;
pub mod config_value;
pub mod context;
pub mod execution_plan;
pub mod invocation;
pub mod pattern;

pub use crate::domain::DomainError;
pub use component_path::{ComponentPath, base_component_name};
pub use config_tree::ConfigTree;
pub use config_value::{ConfigMap, ConfigValue};
pub use context::Context;
pub use execution_plan::ExecutionPlan;
pub use invocation::{InvocationDescriptor, InvocationOptions};
pub use pattern::{NamingPattern, PatternSegment, StackSelector};

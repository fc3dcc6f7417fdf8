//! The fully resolved description of one tool invocation.

use serde::Serialize;

use super::{config_value::ConfigMap, context::Context};
use crate::domain::value_objects::ComponentType;

/// Everything resolution derives for one CLI invocation.
///
/// Built once, read-only afterwards, handed to execution planning and then
/// dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvocationDescriptor {
    pub component_type: ComponentType,
    /// Component exactly as given on the command line, e.g. `vpc/private`.
    pub component_from_arg: String,
    /// Simple name of the component, e.g. `private`.
    pub component: String,
    pub folder_prefix: String,
    pub name_prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_component_path: Option<String>,
    /// Final segment of `base_component_path`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_component: Option<String>,
    /// Stack argument as supplied.
    pub stack_from_arg: String,
    /// Stack the component was resolved in.
    pub stack: String,
    /// Downstream tool to run; the component type unless overridden.
    pub command: String,
    pub subcommand: String,
    pub additional_args: Vec<String>,
    pub global_options: Vec<String>,
    pub context: Context,
    pub context_prefix: String,
    pub vars: ConfigMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<ConfigMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_type: Option<String>,
    pub options: InvocationOptions,
}

/// Per-invocation switches carried over from the partitioned arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvocationOptions {
    pub dry_run: bool,
    pub deploy_run_init: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubeconfig_path: Option<String>,
}

impl InvocationDescriptor {
    /// Name of the component directory on disk: the base component when one
    /// is configured, otherwise the component itself.
    pub fn final_component(&self) -> &str {
        self.base_component.as_deref().unwrap_or(&self.component)
    }
}

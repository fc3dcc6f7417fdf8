// ============================================================================
// domain/error.rs - RESOLUTION ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (the CLI may render them more than once)
/// - Categorizable (for CLI display and exit codes)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Configuration-shape Errors (404-level equivalent)
    // ========================================================================
    #[error("Stack '{stack}' does not exist")]
    StackNotFound { stack: String },

    #[error("'components' section is missing in the stack '{stack}'")]
    ComponentsSectionMissing { stack: String },

    #[error("'components/{component_type}' section is missing in the stack '{stack}'")]
    ComponentTypeSectionMissing {
        component_type: String,
        stack: String,
    },

    #[error("Invalid or missing configuration for the component '{component}' in the stack '{stack}'")]
    ComponentNotFound { component: String, stack: String },

    #[error("Missing 'vars' section for the component '{component}' in the stack '{stack}'")]
    VarsSectionMissing { component: String, stack: String },

    // ========================================================================
    // Pattern Errors
    // ========================================================================
    #[error(
        "stack name pattern must be provided in 'stacks.name_pattern' config or 'STRATA_STACKS__NAME_PATTERN' ENV variable"
    )]
    EmptyNamePattern,

    #[error("Stack '{stack}' does not match the stack name pattern '{pattern}'")]
    StackPatternMismatch { stack: String, pattern: String },

    #[error(
        "The stack name pattern '{pattern}' specifies '{token}', but the stack {stack} does not have {article} {token} defined"
    )]
    MissingContextToken {
        pattern: String,
        token: &'static str,
        article: &'static str,
        stack: String,
    },

    // ========================================================================
    // Search Exhaustion
    // ========================================================================
    #[error("Could not find config for the component '{component}' in the stack '{stack}'")]
    NoMatchingStack {
        component: String,
        stack: String,
        pattern: String,
    },

    // ========================================================================
    // Argument Errors (400-level equivalent)
    // ========================================================================
    #[error("invalid flag: {flag}")]
    InvalidFlag { flag: String },

    #[error("subcommand is required")]
    MissingSubcommand,

    #[error("'component' is required")]
    MissingComponent,

    #[error("'stack' is required")]
    MissingStack,

    #[error("unknown component type: {0}")]
    UnknownComponentType(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::StackNotFound { stack } => vec![
                format!("No stack config file is named '{}'", stack),
                "Check the stack name and 'stacks.base_path' in your config".into(),
            ],
            Self::ComponentsSectionMissing { stack } => vec![format!(
                "Add a top-level 'components' section to the stack '{}'",
                stack
            )],
            Self::ComponentTypeSectionMissing {
                component_type,
                stack,
            } => vec![format!(
                "Add a 'components.{}' section to the stack '{}'",
                component_type, stack
            )],
            Self::ComponentNotFound { component, .. } => vec![
                format!("Is the component name '{}' spelled correctly?", component),
                "Did you forget an import?".into(),
            ],
            Self::VarsSectionMissing { component, .. } => vec![format!(
                "Every component needs a 'vars' mapping; add one to '{}'",
                component
            )],
            Self::EmptyNamePattern => vec![
                "Set 'stacks.name_pattern' in strata.toml".into(),
                "Example: name_pattern = \"{tenant}-{environment}-{stage}\"".into(),
            ],
            Self::StackPatternMismatch { pattern, .. } => vec![
                format!("The stack must have one '-'-separated part per segment of '{}'", pattern),
            ],
            Self::MissingContextToken { token, stack, .. } => vec![format!(
                "Define 'vars.{}' for the component in the stack '{}'",
                token, stack
            )],
            Self::NoMatchingStack { pattern, .. } => vec![
                format!(
                    "Check that all attributes in the stack name pattern '{}' are defined in the stack config files",
                    pattern
                ),
                "Are the component and stack names correct? Did you forget an import?".into(),
            ],
            Self::InvalidFlag { flag } => vec![
                format!("Flag '{}' needs a value", flag),
                "Use either '--flag value' or '--flag=value'".into(),
            ],
            Self::MissingSubcommand | Self::MissingComponent | Self::MissingStack => vec![
                "Usage: strata terraform <subcommand> <component> -s <stack>".into(),
            ],
            Self::UnknownComponentType(_) => {
                vec!["Supported component types: terraform, helmfile".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::StackNotFound { .. }
            | Self::ComponentNotFound { .. }
            | Self::NoMatchingStack { .. } => ErrorCategory::NotFound,
            Self::ComponentsSectionMissing { .. }
            | Self::ComponentTypeSectionMissing { .. }
            | Self::VarsSectionMissing { .. }
            | Self::EmptyNamePattern
            | Self::MissingContextToken { .. } => ErrorCategory::Configuration,
            Self::StackPatternMismatch { .. }
            | Self::InvalidFlag { .. }
            | Self::MissingSubcommand
            | Self::MissingComponent
            | Self::MissingStack
            | Self::UnknownComponentType(_) => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    NotFound,
    Internal,
}

use crate::domain::{arguments::ArgsAndFlags, error::DomainError};

/// Centralized domain validation.
///
/// Checks that span more than one entity live here.
pub struct DomainValidator;

impl DomainValidator {
    /// A tool invocation needs a component and a stack to resolve against.
    pub fn validate_invocation(args: &ArgsAndFlags) -> Result<(), DomainError> {
        if args.component_from_arg.is_empty() {
            return Err(DomainError::MissingComponent);
        }
        match args.stack.as_deref() {
            Some(stack) if !stack.is_empty() => Ok(()),
            _ => Err(DomainError::MissingStack),
        }
    }
}

//! Resolution Service - turns partitioned arguments into an invocation.
//!
//! This service coordinates the resolution workflow:
//! 1. Validate the partitioned arguments
//! 2. Parse the configured stack name pattern
//! 3. Reconcile the stack argument against the stack tree
//! 4. Derive component paths, context and context prefix

use tracing::{debug, info, instrument};

use crate::{
    application::ports::StackSource,
    domain::{
        ArgsAndFlags, ComponentPath, ComponentType, ConfigTree, Context,
        DomainValidator as validator, InvocationDescriptor, InvocationOptions, NamingPattern,
        StackType, base_component_name, reconcile,
    },
    error::StrataResult,
};

/// Settings the resolution engine needs from the tool configuration.
///
/// Built once at startup and passed in explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackSettings {
    /// Stack naming pattern such as `{tenant}-{environment}-{stage}`.
    pub name_pattern: String,
}

impl StackSettings {
    pub fn new(name_pattern: impl Into<String>) -> Self {
        Self {
            name_pattern: name_pattern.into(),
        }
    }
}

/// Main resolution service.
pub struct ResolutionService {
    source: Box<dyn StackSource>,
    settings: StackSettings,
}

impl ResolutionService {
    pub fn new(source: Box<dyn StackSource>, settings: StackSettings) -> Self {
        Self { source, settings }
    }

    pub fn settings(&self) -> &StackSettings {
        &self.settings
    }

    /// Load the stacks and resolve one invocation against them.
    #[instrument(
        skip_all,
        fields(
            component_type = %component_type,
            component = %args.component_from_arg,
        )
    )]
    pub fn resolve(
        &self,
        component_type: ComponentType,
        args: &ArgsAndFlags,
    ) -> StrataResult<InvocationDescriptor> {
        validator::validate_invocation(args)?;

        let stack = args.stack.as_deref().unwrap_or_default();
        let tree = self.source.load()?;
        let stack_type = self.source.stack_type(stack);
        debug!(stacks = tree.len(), %stack_type, "Loaded stack configs");

        self.resolve_in(&tree, stack_type, component_type, args)
    }

    /// Resolve one invocation against an already loaded tree.
    pub fn resolve_in(
        &self,
        tree: &ConfigTree,
        stack_type: StackType,
        component_type: ComponentType,
        args: &ArgsAndFlags,
    ) -> StrataResult<InvocationDescriptor> {
        validator::validate_invocation(args)?;

        let pattern = NamingPattern::parse(self.settings.name_pattern.as_str())?;
        let stack_from_arg = args.stack.clone().unwrap_or_default();
        let component_from_arg = args.component_from_arg.as_str();

        let reconciled = reconcile(
            &pattern,
            stack_type,
            &stack_from_arg,
            tree,
            component_type.as_str(),
            component_from_arg,
        )?;
        let found = reconciled.component;

        let path = ComponentPath::parse(component_from_arg);
        let base_component_path = found
            .base_component_path
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        let base_component = base_component_path
            .as_deref()
            .map(|p| base_component_name(p).to_string());

        let context = Context::from_vars(found.vars);
        let context_prefix = context.prefix(&pattern, reconciled.stack)?;

        let command = found
            .command
            .filter(|c| !c.is_empty())
            .unwrap_or(component_type.as_str())
            .to_string();

        info!(
            stack = reconciled.stack,
            %command,
            %context_prefix,
            "Resolved component"
        );

        Ok(InvocationDescriptor {
            component_type,
            component_from_arg: component_from_arg.to_string(),
            component: path.name,
            folder_prefix: path.folder_prefix,
            name_prefix: path.name_prefix,
            base_component_path,
            base_component,
            stack_from_arg: stack_from_arg.clone(),
            stack: reconciled.stack.to_string(),
            command,
            subcommand: args.subcommand.clone(),
            additional_args: args.additional_args.clone(),
            global_options: args.global_options.clone(),
            context,
            context_prefix,
            vars: found.vars.clone(),
            backend: found.backend.cloned(),
            backend_type: found.backend_type.map(str::to_string),
            options: InvocationOptions {
                dry_run: args.is_dry_run(),
                deploy_run_init: args.run_init_on_deploy(),
                kubeconfig_path: args.kubeconfig_path.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConfigValue, DomainError, partition};
    use crate::error::StrataError;

    struct FixedSource {
        tree: ConfigTree,
        stack_type: StackType,
    }

    impl StackSource for FixedSource {
        fn load(&self) -> StrataResult<ConfigTree> {
            Ok(self.tree.clone())
        }

        fn stack_type(&self, _stack: &str) -> StackType {
            self.stack_type
        }
    }

    const STACKS: &str = r#"
s1:
  components:
    terraform:
      vpc:
        vars: { tenant: acme, stage: prod, region: us-east-1 }
      vpc/private:
        component: infra/vpc
        command: tofu
        backend_type: s3
        backend: { bucket: acme-tfstate }
        vars: { tenant: acme, stage: prod }
"#;

    fn service(name_pattern: &str, stack_type: StackType) -> ResolutionService {
        let tree: ConfigTree = serde_yaml::from_str(STACKS).unwrap();
        ResolutionService::new(
            Box::new(FixedSource { tree, stack_type }),
            StackSettings::new(name_pattern),
        )
    }

    fn args(raw: &[&str]) -> ArgsAndFlags {
        let raw: Vec<String> = raw.iter().map(|s| s.to_string()).collect();
        partition(&raw).unwrap()
    }

    #[test]
    fn resolves_pattern_candidate_to_stack() {
        let svc = service("{tenant}-{stage}", StackType::Pattern);
        let d = svc
            .resolve(ComponentType::Terraform, &args(&["plan", "vpc", "-s", "acme-prod"]))
            .unwrap();

        assert_eq!(d.stack, "s1");
        assert_eq!(d.stack_from_arg, "acme-prod");
        assert_eq!(d.context_prefix, "acme-prod");
        assert_eq!(d.context.region.as_deref(), Some("us-east-1"));
        assert_eq!(d.command, "terraform");
        assert_eq!(d.backend, None);
    }

    #[test]
    fn resolves_base_component_and_overrides() {
        let svc = service("{tenant}-{stage}", StackType::Directory);
        let d = svc
            .resolve(
                ComponentType::Terraform,
                &args(&["apply", "vpc/private", "--stack=s1"]),
            )
            .unwrap();

        assert_eq!(d.component, "private");
        assert_eq!(d.folder_prefix, "vpc");
        assert_eq!(d.name_prefix, "vpc");
        assert_eq!(d.base_component_path.as_deref(), Some("infra/vpc"));
        assert_eq!(d.base_component.as_deref(), Some("vpc"));
        assert_eq!(d.final_component(), "vpc");
        assert_eq!(d.command, "tofu");
        assert_eq!(d.backend_type.as_deref(), Some("s3"));
        assert_eq!(
            d.backend.as_ref().and_then(|b| b.get("bucket")),
            Some(&ConfigValue::from("acme-tfstate"))
        );
    }

    #[test]
    fn empty_pattern_is_rejected() {
        let svc = service("", StackType::Directory);
        let err = svc
            .resolve(ComponentType::Terraform, &args(&["plan", "vpc", "-s", "s1"]))
            .unwrap_err();
        assert!(matches!(err, StrataError::Domain(DomainError::EmptyNamePattern)));
    }

    #[test]
    fn missing_stack_argument_is_rejected() {
        let svc = service("{tenant}-{stage}", StackType::Pattern);
        let err = svc
            .resolve(ComponentType::Terraform, &args(&["plan", "vpc"]))
            .unwrap_err();
        assert!(matches!(err, StrataError::Domain(DomainError::MissingStack)));
    }

    #[test]
    fn prefix_requires_every_pattern_token() {
        let svc = service("{tenant}-{environment}-{stage}", StackType::Directory);
        let err = svc
            .resolve(ComponentType::Terraform, &args(&["plan", "vpc", "-s", "s1"]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "The stack name pattern '{tenant}-{environment}-{stage}' specifies 'environment', but the stack s1 does not have an environment defined"
        );
    }

    #[test]
    fn options_are_carried_over() {
        let svc = service("{tenant}-{stage}", StackType::Directory);
        let d = svc
            .resolve(
                ComponentType::Terraform,
                &args(&[
                    "deploy",
                    "vpc",
                    "-s",
                    "s1",
                    "--deploy-run-init=true",
                    "--dry-run",
                    "true",
                ]),
            )
            .unwrap();
        assert!(d.options.deploy_run_init);
        assert!(d.options.dry_run);
        assert_eq!(d.subcommand, "deploy");
        assert!(d.additional_args.is_empty());
    }
}

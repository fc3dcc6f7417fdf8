//! `strata describe`: resolve without executing.

use tracing::instrument;

use strata_adapters::YamlStackSource;
use strata_core::{
    application::ResolutionService,
    domain::{ArgsAndFlags, InvocationDescriptor},
};

use crate::{
    cli::{DescribeCommands, DescribeComponentArgs, DescribeFormat},
    config::AppConfig,
    error::CliResult,
    output::{OutputManager, to_json, to_yaml},
};

const DESCRIBE_SUBCOMMAND: &str = "describe";

pub fn execute(cmd: DescribeCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        DescribeCommands::Component(args) => describe_component(args, &config, &output),
    }
}

#[instrument(skip_all, fields(component = %args.component, stack = %args.stack))]
fn describe_component(
    args: DescribeComponentArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let resolver = ResolutionService::new(
        Box::new(YamlStackSource::new(config.stacks_dir())),
        config.stack_settings(),
    );
    let request = ArgsAndFlags {
        subcommand: DESCRIBE_SUBCOMMAND.into(),
        component_from_arg: args.component,
        stack: Some(args.stack),
        ..ArgsAndFlags::default()
    };
    let invocation = resolver.resolve(args.component_type.into(), &request)?;

    output.document(&render(&invocation, args.format)?)?;
    Ok(())
}

fn render(invocation: &InvocationDescriptor, format: DescribeFormat) -> CliResult<String> {
    match format {
        DescribeFormat::Yaml => to_yaml(invocation),
        DescribeFormat::Json => to_json(invocation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_adapters::StaticStackSource;
    use strata_core::{
        application::StackSettings,
        domain::ComponentType,
    };

    fn resolve_vpc() -> InvocationDescriptor {
        let source = StaticStackSource::from_yaml(
            r#"
acme-prod:
  components:
    terraform:
      vpc:
        vars:
          tenant: acme
          stage: prod
"#,
        )
        .unwrap();
        let resolver =
            ResolutionService::new(Box::new(source), StackSettings::new("{tenant}-{stage}"));
        let request = ArgsAndFlags {
            subcommand: DESCRIBE_SUBCOMMAND.into(),
            component_from_arg: "vpc".into(),
            stack: Some("acme-prod".into()),
            ..ArgsAndFlags::default()
        };
        resolver.resolve(ComponentType::Terraform, &request).unwrap()
    }

    #[test]
    fn yaml_rendering_includes_vars_and_prefix() {
        let rendered = render(&resolve_vpc(), DescribeFormat::Yaml).unwrap();
        assert!(rendered.contains("context_prefix: acme-prod"));
        assert!(rendered.contains("tenant: acme"));
    }

    #[test]
    fn json_rendering_is_parseable() {
        let rendered = render(&resolve_vpc(), DescribeFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["stack"], "acme-prod");
        assert_eq!(value["vars"]["stage"], "prod");
    }
}

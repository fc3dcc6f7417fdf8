//! `strata terraform` and `strata helmfile`: resolve a component in a stack
//! and run the tool with the result.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use strata_adapters::{LocalFilesystem, ProcessRunner, YamlStackSource};
use strata_core::{
    application::{ExecutionReporter, ExecutionService, ResolutionService},
    domain::{ComponentType, ExecutionPlan, InvocationDescriptor, partition},
    error::StrataError,
};

use crate::{
    cli::ToolArgs,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(component_type = %component_type))]
pub fn execute(
    component_type: ComponentType,
    args: ToolArgs,
    mut config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let parsed = partition(&args.args).map_err(StrataError::from)?;
    config.apply_overrides(&parsed);
    debug!(?parsed, "Partitioned arguments");

    let resolver = ResolutionService::new(
        Box::new(YamlStackSource::new(config.stacks_dir())),
        config.stack_settings(),
    );
    let invocation = resolver.resolve(component_type, &parsed)?;

    print_vars(&invocation, &output)?;

    let executor = ExecutionService::new(
        Box::new(ProcessRunner::new()),
        Box::new(LocalFilesystem::new()),
        config.component_paths(),
    );
    let plans = executor.execute(&invocation, &ConsoleReporter { output: &output })?;

    if invocation.options.dry_run {
        output.warning("Dry run: nothing was executed")?;
        return Ok(());
    }

    info!(
        component = %invocation.component_from_arg,
        stack = %invocation.stack,
        commands = plans.len(),
        "Invocation finished"
    );
    Ok(())
}

fn print_vars(invocation: &InvocationDescriptor, output: &OutputManager) -> CliResult<()> {
    output.header(&format!(
        "Variables for the component '{}' in the stack '{}':",
        invocation.component_from_arg, invocation.stack
    ))?;
    output.yaml(&invocation.vars)?;
    output.print("")?;
    Ok(())
}

/// Prints each execution step before it is taken.
struct ConsoleReporter<'a> {
    output: &'a OutputManager,
}

impl ExecutionReporter for ConsoleReporter<'_> {
    fn varfile(&self, path: &Path, dry_run: bool) {
        let verb = if dry_run { "Would write" } else { "Writing" };
        let shown = self
            .output
            .info(&format!("{verb} the variables to file: {}", path.display()));
        if let Err(e) = shown {
            warn!(error = %e, "Failed to write to stdout");
        }
    }

    fn command(&self, plan: &ExecutionPlan, _dry_run: bool) {
        if let Err(e) = self.output.command(plan) {
            warn!(error = %e, "Failed to write to stdout");
        }
    }
}

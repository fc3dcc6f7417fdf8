//! Execution Service - turns a resolved invocation into tool runs.
//!
//! Planning is pure: [`ExecutionService::plan`] only computes the command,
//! arguments, working directory and environment. Side effects (writing the
//! terraform varfile, running the tool) happen in [`ExecutionService::execute`],
//! which announces each step through an [`ExecutionReporter`].

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, ExecutionReporter, Filesystem},
    },
    domain::{ComponentType, ExecutionPlan, InvocationDescriptor, WRITE_VARFILE_SUBCOMMAND},
    error::StrataResult,
};

/// Subcommands that receive the generated varfile via `-var-file`.
const VARFILE_SUBCOMMANDS: [&str; 4] = ["plan", "apply", "destroy", "deploy"];

const DEPLOY_SUBCOMMAND: &str = "deploy";
const AUTO_APPROVE_FLAG: &str = "-auto-approve";
const HELMFILE_DEPLOY_SUBCOMMAND: &str = "sync";

/// Base directories holding the components of each type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentPaths {
    pub terraform: PathBuf,
    pub helmfile: PathBuf,
}

impl ComponentPaths {
    pub fn base_for(&self, component_type: ComponentType) -> &Path {
        match component_type {
            ComponentType::Terraform => &self.terraform,
            ComponentType::Helmfile => &self.helmfile,
        }
    }
}

impl Default for ComponentPaths {
    fn default() -> Self {
        Self {
            terraform: PathBuf::from("components/terraform"),
            helmfile: PathBuf::from("components/helmfile"),
        }
    }
}

/// Plans and runs the downstream tool for a resolved invocation.
pub struct ExecutionService {
    runner: Box<dyn CommandRunner>,
    filesystem: Box<dyn Filesystem>,
    paths: ComponentPaths,
}

impl ExecutionService {
    pub fn new(
        runner: Box<dyn CommandRunner>,
        filesystem: Box<dyn Filesystem>,
        paths: ComponentPaths,
    ) -> Self {
        Self {
            runner,
            filesystem,
            paths,
        }
    }

    /// `<components base>/<folder prefix>/<base component or component>`.
    pub fn working_dir(&self, invocation: &InvocationDescriptor) -> PathBuf {
        let mut dir = self.paths.base_for(invocation.component_type).to_path_buf();
        if !invocation.folder_prefix.is_empty() {
            dir.push(&invocation.folder_prefix);
        }
        dir.push(invocation.final_component());
        dir
    }

    /// File name of the terraform varfile, e.g. `acme-ue2-prod-vpc.terraform.tfvars.json`.
    pub fn varfile_name(invocation: &InvocationDescriptor) -> String {
        format!(
            "{}-{}.terraform.tfvars.json",
            invocation.context_prefix, invocation.component
        )
    }

    pub fn varfile_path(&self, invocation: &InvocationDescriptor) -> PathBuf {
        self.working_dir(invocation)
            .join(Self::varfile_name(invocation))
    }

    /// Whether running this invocation writes the terraform varfile.
    pub fn writes_varfile(invocation: &InvocationDescriptor) -> bool {
        invocation.component_type == ComponentType::Terraform
            && (invocation.subcommand == WRITE_VARFILE_SUBCOMMAND
                || VARFILE_SUBCOMMANDS.contains(&invocation.subcommand.as_str()))
    }

    /// Compute the tool runs for `invocation`, in order.
    pub fn plan(&self, invocation: &InvocationDescriptor) -> StrataResult<Vec<ExecutionPlan>> {
        match invocation.component_type {
            ComponentType::Terraform => Ok(self.plan_terraform(invocation)),
            ComponentType::Helmfile => self.plan_helmfile(invocation),
        }
    }

    fn plan_terraform(&self, invocation: &InvocationDescriptor) -> Vec<ExecutionPlan> {
        if invocation.subcommand == WRITE_VARFILE_SUBCOMMAND {
            return Vec::new();
        }

        let working_dir = self.working_dir(invocation);
        let mut plans = Vec::new();
        let mut subcommand = invocation.subcommand.as_str();
        let mut additional_args = invocation.additional_args.clone();

        if subcommand == DEPLOY_SUBCOMMAND {
            if invocation.options.deploy_run_init {
                plans.push(ExecutionPlan::new(&invocation.command, &working_dir).arg("init"));
            }
            subcommand = "apply";
            if !additional_args.iter().any(|a| a == AUTO_APPROVE_FLAG) {
                additional_args.push(AUTO_APPROVE_FLAG.to_string());
            }
        }

        let mut plan = ExecutionPlan::new(&invocation.command, working_dir).arg(subcommand);
        if Self::writes_varfile(invocation) {
            plan = plan.args(["-var-file".to_string(), Self::varfile_name(invocation)]);
        }
        plans.push(plan.args(additional_args));
        plans
    }

    fn plan_helmfile(&self, invocation: &InvocationDescriptor) -> StrataResult<Vec<ExecutionPlan>> {
        let subcommand = match invocation.subcommand.as_str() {
            WRITE_VARFILE_SUBCOMMAND => {
                return Err(ApplicationError::UnsupportedSubcommand {
                    component_type: invocation.component_type.to_string(),
                    subcommand: invocation.subcommand.clone(),
                }
                .into());
            }
            DEPLOY_SUBCOMMAND => HELMFILE_DEPLOY_SUBCOMMAND,
            other => other,
        };

        let mut plan = ExecutionPlan::new(&invocation.command, self.working_dir(invocation))
            .args(invocation.global_options.iter().cloned())
            .arg(subcommand)
            .args(invocation.additional_args.iter().cloned());

        if let Some(kubeconfig) = &invocation.options.kubeconfig_path {
            plan = plan.env("KUBECONFIG", kubeconfig);
        }

        let context = &invocation.context;
        let exported = [
            ("NAMESPACE", &context.namespace),
            ("TENANT", &context.tenant),
            ("ENVIRONMENT", &context.environment),
            ("STAGE", &context.stage),
            ("REGION", &context.region),
        ];
        for (key, value) in exported {
            if let Some(value) = value {
                plan = plan.env(key, value);
            }
        }

        Ok(vec![plan])
    }

    /// Write the component vars as JSON next to the component.
    #[instrument(
        skip_all,
        fields(component = %invocation.component_from_arg, stack = %invocation.stack)
    )]
    fn write_varfile(&self, invocation: &InvocationDescriptor, path: &Path) -> StrataResult<()> {
        let content = serde_json::to_string_pretty(&invocation.vars).map_err(|e| {
            ApplicationError::Serialization {
                component: invocation.component_from_arg.clone(),
                reason: e.to_string(),
            }
        })?;

        self.filesystem.write_file(path, &content)?;
        info!(path = %path.display(), "Wrote varfile");
        Ok(())
    }

    /// Fail unless the component's working directory exists.
    fn ensure_component_dir(&self, invocation: &InvocationDescriptor) -> StrataResult<()> {
        let dir = self.working_dir(invocation);
        if self.filesystem.exists(&dir) {
            return Ok(());
        }
        Err(ApplicationError::ComponentDirMissing {
            component: invocation.component_from_arg.clone(),
            component_type: invocation.component_type.to_string(),
            path: dir,
        }
        .into())
    }

    /// Plan, write the varfile and run the plans in order, stopping at the
    /// first failure. Every step is announced to `reporter` before it is
    /// taken. On a dry run the steps are announced but nothing is checked,
    /// written or run. The plans are returned either way.
    #[instrument(
        skip_all,
        fields(
            component = %invocation.component_from_arg,
            stack = %invocation.stack,
            subcommand = %invocation.subcommand,
        )
    )]
    pub fn execute(
        &self,
        invocation: &InvocationDescriptor,
        reporter: &dyn ExecutionReporter,
    ) -> StrataResult<Vec<ExecutionPlan>> {
        let plans = self.plan(invocation)?;
        let dry_run = invocation.options.dry_run;

        if !dry_run {
            self.ensure_component_dir(invocation)?;
        }

        if Self::writes_varfile(invocation) {
            let path = self.varfile_path(invocation);
            reporter.varfile(&path, dry_run);
            if !dry_run {
                self.write_varfile(invocation, &path)?;
            }
        }

        for plan in &plans {
            reporter.command(plan, dry_run);
            if !dry_run {
                debug!(command = %plan, dir = %plan.working_dir.display(), "Running");
                self.runner.run(plan)?;
            }
        }

        if dry_run {
            info!("Dry run, nothing executed");
        }
        Ok(plans)
    }
}

//! Argument partitioning for `strata terraform` / `strata helmfile`.
//!
//! The tool-specific argument list is handed over verbatim by the CLI. This
//! module strips the flags strata understands, extracts their values and
//! splits what remains into `[subcommand, component, ...passthrough]`.
//!
//! Two passes run over the input:
//! 1. extraction + marking: value flags are read into [`ArgsAndFlags`] and
//!    every occurrence of a [`COMMON_FLAGS`] entry is marked for removal
//!    (the flag token, plus the following token for the `--flag value` form);
//! 2. collection: unmarked tokens become the residual arguments, and the
//!    `--global-options` value is read from the position recorded in pass 1.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::error::DomainError;

pub const STACK_FLAG: &str = "--stack";
pub const STACK_SHORT_FLAG: &str = "-s";
pub const DRY_RUN_FLAG: &str = "--dry-run";
pub const KUBECONFIG_PATH_FLAG: &str = "--kubeconfig-path";
pub const TERRAFORM_DIR_FLAG: &str = "--terraform-dir";
pub const HELMFILE_DIR_FLAG: &str = "--helmfile-dir";
pub const CONFIG_DIR_FLAG: &str = "--config-dir";
pub const STACKS_DIR_FLAG: &str = "--stacks-dir";
pub const GLOBAL_OPTIONS_FLAG: &str = "--global-options";
pub const DEPLOY_RUN_INIT_FLAG: &str = "--deploy-run-init";

/// Flags removed from the arguments forwarded to the downstream tool.
pub const COMMON_FLAGS: &[&str] = &[
    STACK_FLAG,
    STACK_SHORT_FLAG,
    DRY_RUN_FLAG,
    KUBECONFIG_PATH_FLAG,
    TERRAFORM_DIR_FLAG,
    HELMFILE_DIR_FLAG,
    CONFIG_DIR_FLAG,
    STACKS_DIR_FLAG,
    GLOBAL_OPTIONS_FLAG,
    DEPLOY_RUN_INIT_FLAG,
];

/// The legacy two-word subcommand `write varfile <component>`.
pub const WRITE_VARFILE_SUBCOMMAND: &str = "write varfile";

/// Result of partitioning a tool invocation's arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArgsAndFlags {
    pub subcommand: String,
    pub component_from_arg: String,
    /// Residual arguments forwarded to the downstream tool.
    pub additional_args: Vec<String>,
    /// Value of `--global-options`, split on single spaces.
    pub global_options: Vec<String>,
    pub stack: Option<String>,
    pub terraform_dir: Option<String>,
    pub helmfile_dir: Option<String>,
    pub config_dir: Option<String>,
    pub stacks_dir: Option<String>,
    pub deploy_run_init: Option<String>,
    pub dry_run: Option<String>,
    pub kubeconfig_path: Option<String>,
}

impl ArgsAndFlags {
    pub fn run_init_on_deploy(&self) -> bool {
        is_truthy(self.deploy_run_init.as_deref())
    }

    pub fn is_dry_run(&self) -> bool {
        is_truthy(self.dry_run.as_deref())
    }
}

fn is_truthy(value: Option<&str>) -> bool {
    matches!(value, Some(v) if v.eq_ignore_ascii_case("true"))
}

/// Partition raw tool arguments.
///
/// # Errors
///
/// - [`DomainError::InvalidFlag`] when a value flag is the last token or a
///   `flag=value` token does not split into exactly two parts on `=`.
/// - [`DomainError::MissingSubcommand`] / [`DomainError::MissingComponent`]
///   when fewer positional arguments remain than the command shape needs.
pub fn partition(args: &[String]) -> Result<ArgsAndFlags, DomainError> {
    let mut info = ArgsAndFlags::default();
    let mut indexes_to_remove = BTreeSet::new();

    // 0 doubles as "not found"; a `--global-options=...` first argument is
    // therefore never read.
    let mut global_options_index = 0usize;

    for (i, arg) in args.iter().enumerate() {
        if arg == GLOBAL_OPTIONS_FLAG {
            global_options_index = i + 1;
        } else if arg.starts_with(&format!("{GLOBAL_OPTIONS_FLAG}=")) {
            global_options_index = i;
        }

        for flag in [STACK_FLAG, STACK_SHORT_FLAG] {
            if let Some(value) = flag_value(args, i, flag)? {
                info.stack = Some(value);
            }
        }

        let slots = [
            (TERRAFORM_DIR_FLAG, &mut info.terraform_dir),
            (HELMFILE_DIR_FLAG, &mut info.helmfile_dir),
            (CONFIG_DIR_FLAG, &mut info.config_dir),
            (STACKS_DIR_FLAG, &mut info.stacks_dir),
            (DEPLOY_RUN_INIT_FLAG, &mut info.deploy_run_init),
            (DRY_RUN_FLAG, &mut info.dry_run),
            (KUBECONFIG_PATH_FLAG, &mut info.kubeconfig_path),
        ];
        for (flag, slot) in slots {
            if let Some(value) = flag_value(args, i, flag)? {
                *slot = Some(value);
            }
        }

        for flag in COMMON_FLAGS {
            if arg == flag {
                indexes_to_remove.insert(i);
                indexes_to_remove.insert(i + 1);
            } else if arg.starts_with(&format!("{flag}=")) {
                indexes_to_remove.insert(i);
            }
        }
    }

    let mut residual = Vec::with_capacity(args.len());
    for (i, arg) in args.iter().enumerate() {
        if !indexes_to_remove.contains(&i) {
            residual.push(arg.clone());
        }

        if global_options_index > 0 && i == global_options_index {
            let value = arg
                .strip_prefix(&format!("{GLOBAL_OPTIONS_FLAG}="))
                .unwrap_or(arg);
            info.global_options = value.split(' ').map(str::to_string).collect();
        }
    }

    match residual.as_slice() {
        [write, varfile, component, rest @ ..] if write == "write" && varfile == "varfile" => {
            info.subcommand = WRITE_VARFILE_SUBCOMMAND.to_string();
            info.component_from_arg = component.clone();
            info.additional_args = rest.to_vec();
        }
        [write, varfile] if write == "write" && varfile == "varfile" => {
            return Err(DomainError::MissingComponent);
        }
        [subcommand, component, rest @ ..] => {
            info.subcommand = subcommand.clone();
            info.component_from_arg = component.clone();
            info.additional_args = rest.to_vec();
        }
        [_] => return Err(DomainError::MissingComponent),
        [] => return Err(DomainError::MissingSubcommand),
    }

    if info.component_from_arg.is_empty() {
        return Err(DomainError::MissingComponent);
    }

    Ok(info)
}

/// Value of `flag` at position `i`, in either `flag value` or `flag=value` form.
fn flag_value(args: &[String], i: usize, flag: &str) -> Result<Option<String>, DomainError> {
    let arg = &args[i];

    if arg == flag {
        return args
            .get(i + 1)
            .cloned()
            .map(Some)
            .ok_or_else(|| DomainError::InvalidFlag { flag: arg.clone() });
    }

    if arg.starts_with(&format!("{flag}=")) {
        let parts: Vec<&str> = arg.split('=').collect();
        if parts.len() != 2 {
            return Err(DomainError::InvalidFlag { flag: arg.clone() });
        }
        return Ok(Some(parts[1].to_string()));
    }

    Ok(None)
}

//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.
//!
//! `terraform` and `helmfile` deliberately do not declare their flags to
//! clap: the raw argument list goes to the partitioner in `strata-core`,
//! which knows which flags belong to strata and which to the tool.

use clap::{Args, Parser, Subcommand, ValueEnum};

use strata_core::domain::ComponentType;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "strata",
    bin_name = "strata",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Stack-aware terraform and helmfile runner",
    long_about = "Strata finds the stack configuration for a component, \
                  derives its variables and context, and runs terraform or \
                  helmfile with them.",
    after_help = "EXAMPLES:\n\
        \x20 strata terraform plan vpc -s acme-ue2-prod\n\
        \x20 strata terraform deploy vpc --stack acme-ue2-prod --deploy-run-init=true\n\
        \x20 strata helmfile diff nginx -s acme-ue2-dev --global-options=\"--quiet\"\n\
        \x20 strata describe component vpc -s acme-ue2-prod\n\
        \x20 strata completions bash > /usr/share/bash-completion/completions/strata",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run terraform for a component in a stack.
    #[command(
        visible_alias = "tf",
        about = "Run terraform for a component in a stack",
        after_help = "EXAMPLES:\n\
            \x20 strata terraform plan vpc -s acme-ue2-prod\n\
            \x20 strata terraform apply infra/vpc -s acme-ue2-prod -refresh=false\n\
            \x20 strata terraform write varfile vpc -s acme-ue2-prod\n\
            \x20 strata terraform deploy vpc -s acme-ue2-prod --dry-run=true"
    )]
    Terraform(ToolArgs),

    /// Run helmfile for a component in a stack.
    #[command(
        about = "Run helmfile for a component in a stack",
        after_help = "EXAMPLES:\n\
            \x20 strata helmfile diff nginx -s acme-ue2-dev\n\
            \x20 strata helmfile sync nginx -s acme-ue2-dev --kubeconfig-path=/tmp/kube\n\
            \x20 strata helmfile diff nginx -s acme-ue2-dev --global-options=\"--quiet --color\""
    )]
    Helmfile(ToolArgs),

    /// Show resolved configuration without running anything.
    #[command(
        about = "Describe resolved configuration",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 strata describe component vpc -s acme-ue2-prod\n\
            \x20 strata describe component nginx -s acme-ue2-dev --type helmfile --format json"
    )]
    Describe(DescribeCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 strata completions bash > ~/.local/share/bash-completion/completions/strata\n\
            \x20 strata completions zsh  > ~/.zfunc/_strata\n\
            \x20 strata completions fish > ~/.config/fish/completions/strata.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Strata configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 strata config get stacks.name_pattern\n\
            \x20 strata config list\n\
            \x20 strata config path"
    )]
    Config(ConfigCommands),
}

// ── terraform / helmfile ──────────────────────────────────────────────────────

/// Raw arguments for `strata terraform` and `strata helmfile`.
#[derive(Debug, Args)]
pub struct ToolArgs {
    /// Subcommand, component, strata flags and tool arguments, in any order
    /// after the subcommand.
    #[arg(
        value_name = "ARGS",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        help = "<subcommand> <component> -s <stack> [flags] [tool args]"
    )]
    pub args: Vec<String>,
}

// ── describe ──────────────────────────────────────────────────────────────────

/// Subcommands for `strata describe`.
#[derive(Debug, Subcommand)]
pub enum DescribeCommands {
    /// Resolve a component in a stack and print the result.
    Component(DescribeComponentArgs),
}

/// Arguments for `strata describe component`.
#[derive(Debug, Args)]
pub struct DescribeComponentArgs {
    /// Component name, optionally with a folder prefix (`infra/vpc`).
    #[arg(value_name = "COMPONENT")]
    pub component: String,

    /// Stack name.
    #[arg(short = 's', long = "stack", value_name = "STACK")]
    pub stack: String,

    /// Component type.
    #[arg(
        short = 't',
        long = "type",
        value_enum,
        default_value = "terraform",
        help = "Component type"
    )]
    pub component_type: ComponentKind,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "yaml",
        help = "Output format"
    )]
    pub format: DescribeFormat,
}

/// Component type as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ComponentKind {
    Terraform,
    Helmfile,
}

impl From<ComponentKind> for ComponentType {
    fn from(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Terraform => ComponentType::Terraform,
            ComponentKind::Helmfile => ComponentType::Helmfile,
        }
    }
}

/// Output format for `describe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DescribeFormat {
    Yaml,
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `strata completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `strata config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `stacks.name_pattern`.
        key: String,
    },
    /// Print all effective configuration values.
    List,
    /// Print the path to the configuration file that would be read.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn terraform_args_are_passed_through_verbatim() {
        let cli = parse(&[
            "strata",
            "terraform",
            "plan",
            "vpc",
            "-s",
            "acme-prod",
            "--dry-run=true",
            "-refresh=false",
        ]);
        match cli.command {
            Commands::Terraform(tool) => assert_eq!(
                tool.args,
                vec!["plan", "vpc", "-s", "acme-prod", "--dry-run=true", "-refresh=false"]
            ),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn flags_after_tool_args_are_not_global() {
        let cli = parse(&["strata", "helmfile", "diff", "nginx", "-v"]);
        assert_eq!(cli.global.verbose, 0);
        match cli.command {
            Commands::Helmfile(tool) => assert_eq!(tool.args, vec!["diff", "nginx", "-v"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_before_subcommand() {
        let cli = parse(&["strata", "-vv", "--no-color", "tf", "plan", "vpc"]);
        assert_eq!(cli.global.verbose, 2);
        assert!(cli.global.no_color);
        assert!(matches!(cli.command, Commands::Terraform(_)));
    }

    #[test]
    fn tool_args_are_required() {
        assert!(Cli::try_parse_from(["strata", "terraform"]).is_err());
    }

    #[test]
    fn describe_component_defaults() {
        let cli = parse(&["strata", "describe", "component", "vpc", "-s", "acme-prod"]);
        match cli.command {
            Commands::Describe(DescribeCommands::Component(args)) => {
                assert_eq!(args.component, "vpc");
                assert_eq!(args.stack, "acme-prod");
                assert_eq!(args.component_type, ComponentKind::Terraform);
                assert_eq!(args.format, DescribeFormat::Yaml);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn describe_requires_stack() {
        assert!(Cli::try_parse_from(["strata", "describe", "component", "vpc"]).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["strata", "-q", "-v", "config", "path"]).is_err());
    }

    #[test]
    fn component_kind_converts() {
        assert_eq!(
            ComponentType::from(ComponentKind::Helmfile),
            ComponentType::Helmfile
        );
        assert_eq!(
            ComponentType::from(ComponentKind::Terraform),
            ComponentType::Terraform
        );
    }
}

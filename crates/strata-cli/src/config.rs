//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the settings derived
//! from it ([`StackSettings`], [`ComponentPaths`]).
//!
//! # Resolution order (highest priority first)
//!
//! 1. Directory flags picked out of the tool arguments by the partitioner
//!    (`--terraform-dir`, `--helmfile-dir`, `--stacks-dir`, `--config-dir`)
//! 2. Environment variables: `STRATA_` prefix, `__` between nested keys
//!    (`STRATA_STACKS__NAME_PATTERN`)
//! 3. Config file: `--config`, else `strata.toml` in the working directory,
//!    else `config.toml` in the platform config directory
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use strata_core::{
    application::{ComponentPaths, StackSettings},
    domain::ArgsAndFlags,
};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "strata.toml";

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "STRATA";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root that every other relative path is joined onto.
    pub base_path: PathBuf,
    /// Component directories per tool.
    pub components: ComponentsConfig,
    /// Stack configuration location and naming.
    pub stacks: StacksConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentsConfig {
    pub terraform: ToolConfig,
    pub helmfile: ToolConfig,
}

/// A tool's table must name its `base_path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    pub base_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StacksConfig {
    pub base_path: PathBuf,
    /// Stack name pattern such as `{tenant}-{environment}-{stage}`. Empty
    /// until configured.
    pub name_pattern: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for StacksConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("stacks"),
            name_pattern: String::new(),
        }
    }
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            terraform: ToolConfig {
                base_path: PathBuf::from("components/terraform"),
            },
            helmfile: ToolConfig {
                base_path: PathBuf::from("components/helmfile"),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist.  The fallback locations are optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        match config_file {
            Some(path) => {
                builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
            }
            None => {
                let path = Self::config_path();
                builder = builder.add_source(
                    File::from(path.as_path())
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        let config: Self = builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;
        Ok(config)
    }

    /// Path of the configuration file read when `--config` is not given.
    ///
    /// `strata.toml` in the working directory wins when it exists; otherwise
    /// the platform config directory from `directories::ProjectDirs`.
    pub fn config_path() -> PathBuf {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return local;
        }
        directories::ProjectDirs::from("com", "strata", "strata")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or(local)
    }

    /// Apply the directory flags found among the tool arguments.
    pub fn apply_overrides(&mut self, args: &ArgsAndFlags) {
        if let Some(dir) = &args.config_dir {
            self.base_path = PathBuf::from(dir);
        }
        if let Some(dir) = &args.stacks_dir {
            self.stacks.base_path = PathBuf::from(dir);
        }
        if let Some(dir) = &args.terraform_dir {
            self.components.terraform.base_path = PathBuf::from(dir);
        }
        if let Some(dir) = &args.helmfile_dir {
            self.components.helmfile.base_path = PathBuf::from(dir);
        }
    }

    /// Absolute-or-relative stacks directory.
    pub fn stacks_dir(&self) -> PathBuf {
        self.resolve(&self.stacks.base_path)
    }

    pub fn stack_settings(&self) -> StackSettings {
        StackSettings::new(self.stacks.name_pattern.clone())
    }

    pub fn component_paths(&self) -> ComponentPaths {
        ComponentPaths {
            terraform: self.resolve(&self.components.terraform.base_path),
            helmfile: self.resolve(&self.components.helmfile.base_path),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if self.base_path.as_os_str().is_empty() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }
}

//! Filesystem-based stack loader.
//!
//! Discovers `*.yaml` / `*.yml` stack files under a base directory and loads
//! each one into the [`ConfigTree`] the resolution engine consumes.
//!
//! # Directory layout expected
//!
//! ```text
//! stacks/
//! ├── acme-ue2-dev.yaml        ← stack "acme-ue2-dev"
//! ├── acme-ue2-prod.yaml       ← stack "acme-ue2-prod"
//! └── catalog/
//!     └── vpc.yaml             ← stack "catalog/vpc"
//! ```
//!
//! The stack name is the file path relative to the base directory, without
//! its extension, with `/` separators on every platform. Hidden files and
//! directories are skipped. `import:` sections are not followed.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};
use walkdir::{DirEntry, WalkDir};

use strata_core::{
    application::{ApplicationError, ports::StackSource},
    domain::{ConfigTree, ConfigValue, StackType},
    error::StrataResult,
};

const STACK_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Loads every stack file below `stacks_dir`.
#[derive(Debug, Clone)]
pub struct YamlStackSource {
    stacks_dir: PathBuf,
}

impl YamlStackSource {
    pub fn new(stacks_dir: impl Into<PathBuf>) -> Self {
        Self {
            stacks_dir: stacks_dir.into(),
        }
    }

    pub fn stacks_dir(&self) -> &Path {
        &self.stacks_dir
    }

    /// Stack names and their files, sorted by name.
    pub fn stack_files(&self) -> StrataResult<Vec<(String, PathBuf)>> {
        if !self.stacks_dir.is_dir() {
            return Err(ApplicationError::StacksDirMissing {
                path: self.stacks_dir.clone(),
            }
            .into());
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.stacks_dir)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry = entry.map_err(|e| ApplicationError::StackLoad {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.stacks_dir.clone()),
                reason: format!("directory walk error: {e}"),
            })?;

            if !entry.file_type().is_file() || !is_stack_file(entry.path()) {
                continue;
            }

            if let Some(name) = self.stack_name(entry.path()) {
                files.push((name, entry.into_path()));
            }
        }

        files.sort();
        Ok(files)
    }

    /// `acme/ue2-prod` for `<stacks_dir>/acme/ue2-prod.yaml`.
    fn stack_name(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.stacks_dir).ok()?.with_extension("");
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }

    /// The file backing `stack`, if one is named exactly that.
    pub fn stack_file(&self, stack: &str) -> Option<PathBuf> {
        if stack.is_empty() {
            return None;
        }
        STACK_EXTENSIONS
            .iter()
            .map(|ext| self.stacks_dir.join(format!("{stack}.{ext}")))
            .find(|path| path.is_file())
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    fn load_file(&self, path: &Path) -> StrataResult<ConfigValue> {
        let raw = fs::read_to_string(path).map_err(|e| ApplicationError::StackLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let value: ConfigValue =
            serde_yaml::from_str(&raw).map_err(|e| ApplicationError::StackLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        match value {
            // An empty file is an empty stack.
            ConfigValue::Null => Ok(ConfigValue::Mapping(Default::default())),
            mapping @ ConfigValue::Mapping(_) => Ok(mapping),
            other => Err(ApplicationError::StackLoad {
                path: path.to_path_buf(),
                reason: format!("expected a mapping at the top level, found a {}", other.kind()),
            }
            .into()),
        }
    }
}

impl StackSource for YamlStackSource {
    #[instrument(skip(self), fields(dir = %self.stacks_dir.display()))]
    fn load(&self) -> StrataResult<ConfigTree> {
        let mut tree = ConfigTree::new();

        for (name, path) in self.stack_files()? {
            let section = self.load_file(&path)?;
            debug!(stack = %name, "loaded stack");
            tree.insert(name, section);
        }

        debug!(count = tree.len(), "finished loading stacks");
        Ok(tree)
    }

    fn stack_type(&self, stack: &str) -> StackType {
        if self.stack_file(stack).is_some() {
            StackType::Directory
        } else {
            StackType::Pattern
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_stack_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| STACK_EXTENSIONS.contains(&ext))
}

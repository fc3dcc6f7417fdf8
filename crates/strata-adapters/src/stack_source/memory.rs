//! In-memory stack source for testing.

use strata_core::{
    application::ports::StackSource,
    domain::{ConfigTree, StackType},
    error::StrataResult,
};

/// Serves a fixed tree. A stack name present in the tree selects directory
/// mode, mirroring a stack file that exists on disk.
#[derive(Debug, Clone, Default)]
pub struct StaticStackSource {
    tree: ConfigTree,
}

impl StaticStackSource {
    pub fn new(tree: ConfigTree) -> Self {
        Self { tree }
    }

    /// Parse a YAML document mapping stack names to stack sections.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        Ok(Self::new(serde_yaml::from_str(yaml)?))
    }
}

impl StackSource for StaticStackSource {
    fn load(&self) -> StrataResult<ConfigTree> {
        Ok(self.tree.clone())
    }

    fn stack_type(&self, stack: &str) -> StackType {
        if self.tree.contains(stack) {
            StackType::Directory
        } else {
            StackType::Pattern
        }
    }
}

//! The merged stacks map handed to the resolution engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::config_value::ConfigValue;

/// Mapping from stack name to stack section.
///
/// Read-only once built: the engine borrows it and never mutates it.
/// Stacks iterate in lexicographic order of their names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigTree {
    stacks: BTreeMap<String, ConfigValue>,
}

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used by loaders and tests.
    pub fn with_stack(mut self, name: impl Into<String>, section: ConfigValue) -> Self {
        self.stacks.insert(name.into(), section);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, section: ConfigValue) {
        self.stacks.insert(name.into(), section);
    }

    pub fn get(&self, stack: &str) -> Option<&ConfigValue> {
        self.stacks.get(stack)
    }

    pub fn contains(&self, stack: &str) -> bool {
        self.stacks.contains_key(stack)
    }

    pub fn stack_names(&self) -> impl Iterator<Item = &str> {
        self.stacks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}

impl FromIterator<(String, ConfigValue)> for ConfigTree {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        Self {
            stacks: iter.into_iter().collect(),
        }
    }
}

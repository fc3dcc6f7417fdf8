//! Domain value objects: ComponentType, StackType, ContextToken.
//!
//! # Design
//!
//! These are pure value types — `Copy`, equality-by-value, no identity.
//! This file's only job is to define the types, their string
//! representations, and their `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ComponentType ─────────────────────────────────────────────────────────────

/// The provisioning tool family a component belongs to.
///
/// Doubles as the key under `components:` in a stack section and as the
/// default command when a component does not override `command`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Terraform,
    Helmfile,
}

impl ComponentType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Terraform => "terraform",
            Self::Helmfile => "helmfile",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "terraform" | "tf" => Ok(Self::Terraform),
            "helmfile" => Ok(Self::Helmfile),
            other => Err(DomainError::UnknownComponentType(other.to_string())),
        }
    }
}

// ── StackType ─────────────────────────────────────────────────────────────────

/// How the stack argument is interpreted.
///
/// - `Directory`: the stack argument names a stack config directly.
/// - `Pattern`: the stack argument is a candidate built from the naming
///   pattern and the owning stack must be searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackType {
    Directory,
    #[default]
    Pattern,
}

impl StackType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::Pattern => "pattern",
        }
    }
}

impl fmt::Display for StackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ContextToken ──────────────────────────────────────────────────────────────

/// A placeholder recognised inside a stack naming pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextToken {
    Tenant,
    Environment,
    Stage,
}

impl ContextToken {
    /// The `vars` key backing this token.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tenant => "tenant",
            Self::Environment => "environment",
            Self::Stage => "stage",
        }
    }

    /// The literal placeholder as written in a pattern, e.g. `{tenant}`.
    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::Tenant => "{tenant}",
            Self::Environment => "{environment}",
            Self::Stage => "{stage}",
        }
    }

    /// Indefinite article used in user-facing messages.
    pub const fn article(&self) -> &'static str {
        match self {
            Self::Environment => "an",
            Self::Tenant | Self::Stage => "a",
        }
    }

    /// Parse a pattern segment; `None` for literal segments.
    pub fn from_placeholder(segment: &str) -> Option<Self> {
        match segment {
            "{tenant}" => Some(Self::Tenant),
            "{environment}" => Some(Self::Environment),
            "{stage}" => Some(Self::Stage),
            _ => None,
        }
    }
}

impl fmt::Display for ContextToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

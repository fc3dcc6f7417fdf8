//! Identity attributes derived from a resolved component's `vars`.

use serde::Serialize;

use super::config_value::ConfigMap;
use super::pattern::{NamingPattern, PatternSegment};
use crate::domain::{error::DomainError, value_objects::ContextToken};

/// Namespace, tenant, environment, stage and region of a component instance.
///
/// Each field is populated only when the matching `vars` key holds a string.
/// Immutable once built; never merged across stacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Context {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Context {
    pub fn from_vars(vars: &ConfigMap) -> Self {
        let read = |key: &str| vars.get(key).and_then(|v| v.as_str()).map(str::to_string);

        Self {
            namespace: read("namespace"),
            tenant: read("tenant"),
            environment: read("environment"),
            stage: read("stage"),
            region: read("region"),
        }
    }

    /// Value backing a pattern token; empty strings count as absent.
    pub fn token(&self, token: ContextToken) -> Option<&str> {
        let value = match token {
            ContextToken::Tenant => self.tenant.as_deref(),
            ContextToken::Environment => self.environment.as_deref(),
            ContextToken::Stage => self.stage.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    /// Join the token values named by `pattern`, in pattern order, with `-`.
    ///
    /// Literal segments never contribute. Fails when a token the pattern
    /// names is not defined for `stack`.
    pub fn prefix(&self, pattern: &NamingPattern, stack: &str) -> Result<String, DomainError> {
        let mut parts = Vec::new();

        for segment in pattern.segments() {
            let PatternSegment::Token(token) = segment else {
                continue;
            };
            let value = self
                .token(*token)
                .ok_or_else(|| DomainError::MissingContextToken {
                    pattern: pattern.as_str().to_string(),
                    token: token.as_str(),
                    article: token.article(),
                    stack: stack.to_string(),
                })?;
            parts.push(value);
        }

        Ok(parts.join("-"))
    }
}

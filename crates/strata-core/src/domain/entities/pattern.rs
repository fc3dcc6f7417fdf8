//! Stack naming patterns such as `{tenant}-{environment}-{stage}`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, value_objects::ContextToken};

/// Delimiter between pattern segments and between stack-name parts.
pub const PATTERN_DELIMITER: char = '-';

/// One `-`-separated piece of a naming pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternSegment {
    Token(ContextToken),
    Literal(String),
}

/// A parsed, non-empty stack naming pattern.
///
/// Configured once per deployment; never inferred from stack names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingPattern {
    raw: String,
    segments: Vec<PatternSegment>,
}

impl NamingPattern {
    /// Parse a pattern string. Fails only when the pattern is empty.
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::EmptyNamePattern);
        }

        let segments = raw
            .split(PATTERN_DELIMITER)
            .map(|part| match ContextToken::from_placeholder(part) {
                Some(token) => PatternSegment::Token(token),
                None => PatternSegment::Literal(part.to_string()),
            })
            .collect();

        Ok(Self { raw, segments })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    /// Placeholder tokens in pattern order.
    pub fn tokens(&self) -> impl Iterator<Item = ContextToken> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            PatternSegment::Token(token) => Some(*token),
            PatternSegment::Literal(_) => None,
        })
    }

    /// Bind each placeholder to the positional part of `candidate`.
    ///
    /// The candidate must split into exactly as many parts as the pattern
    /// has segments. Parts under literal segments are not checked.
    pub fn bind(&self, candidate: &str) -> Result<StackSelector, DomainError> {
        let parts: Vec<&str> = candidate.split(PATTERN_DELIMITER).collect();
        if parts.len() != self.segments.len() {
            return Err(DomainError::StackPatternMismatch {
                stack: candidate.to_string(),
                pattern: self.raw.clone(),
            });
        }

        let mut selector = StackSelector::default();
        for (segment, part) in self.segments.iter().zip(parts) {
            if let PatternSegment::Token(token) = segment {
                selector.set(*token, part);
            }
        }
        Ok(selector)
    }
}

impl fmt::Display for NamingPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Token values requested by a pattern-mode stack candidate.
///
/// Empty values mean "not requested" and match any stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackSelector {
    pub tenant: String,
    pub environment: String,
    pub stage: String,
}

impl StackSelector {
    pub fn get(&self, token: ContextToken) -> &str {
        match token {
            ContextToken::Tenant => &self.tenant,
            ContextToken::Environment => &self.environment,
            ContextToken::Stage => &self.stage,
        }
    }

    fn set(&mut self, token: ContextToken, value: &str) {
        let slot = match token {
            ContextToken::Tenant => &mut self.tenant,
            ContextToken::Environment => &mut self.environment,
            ContextToken::Stage => &mut self.stage,
        };
        *slot = value.to_string();
    }
}

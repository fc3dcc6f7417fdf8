//! Pattern Reconciler: picks the stack that defines a component.
//!
//! In [`StackType::Directory`] mode the stack argument is an exact key. In
//! [`StackType::Pattern`] mode it is a candidate such as `acme-ue2-prod`
//! whose parts are bound to the naming pattern's placeholders; every stack
//! is then tried and the first one whose component `vars` agree with all
//! requested tokens is selected.
//!
//! Stacks are tried in the tree's iteration order (sorted by name). The
//! first qualifying stack wins; a second qualifying stack is not reported.

use tracing::{debug, trace};

use crate::domain::{
    entities::{ConfigTree, ConfigValue, NamingPattern, StackSelector},
    error::DomainError,
    locator::{self, ComponentMatch},
    value_objects::{ContextToken, StackType},
};

const MATCHED_TOKENS: [ContextToken; 3] = [
    ContextToken::Tenant,
    ContextToken::Environment,
    ContextToken::Stage,
];

/// The stack chosen for a component and what the locator found there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reconciled<'a> {
    pub stack: &'a str,
    pub component: ComponentMatch<'a>,
}

/// Resolve `stack` to the stack section defining `component`.
pub fn reconcile<'a>(
    pattern: &NamingPattern,
    stack_type: StackType,
    stack: &'a str,
    tree: &'a ConfigTree,
    component_type: &str,
    component: &str,
) -> Result<Reconciled<'a>, DomainError> {
    match stack_type {
        StackType::Directory => {
            let found = locator::locate_component(tree, stack, component_type, component)?;
            Ok(Reconciled {
                stack,
                component: found.component,
            })
        }
        StackType::Pattern => search(pattern, stack, tree, component_type, component),
    }
}

/// Pattern-mode search over every stack in `tree`.
pub fn search<'a>(
    pattern: &NamingPattern,
    candidate: &str,
    tree: &'a ConfigTree,
    component_type: &str,
    component: &str,
) -> Result<Reconciled<'a>, DomainError> {
    let selector = pattern.bind(candidate)?;
    debug!(
        candidate,
        tenant = %selector.tenant,
        environment = %selector.environment,
        stage = %selector.stage,
        "Searching for stack config where the component '{component}' is defined"
    );

    for stack in tree.stack_names() {
        let found = match locator::find_component(tree, stack, component_type, component) {
            Ok(found) => found,
            Err(reason) => {
                trace!(stack, %reason, "Skipping stack");
                continue;
            }
        };

        if matches_selector(&selector, &found) {
            debug!(stack, "Found stack config for the component '{component}'");
            return Ok(Reconciled {
                stack,
                component: found,
            });
        }
        trace!(stack, "Stack vars do not match the requested tokens");
    }

    Err(DomainError::NoMatchingStack {
        component: component.to_string(),
        stack: candidate.to_string(),
        pattern: pattern.as_str().to_string(),
    })
}

/// A token is satisfied when it was not requested or the stack's var equals it.
fn matches_selector(selector: &StackSelector, found: &ComponentMatch<'_>) -> bool {
    MATCHED_TOKENS.iter().all(|token| {
        let wanted = selector.get(*token);
        wanted.is_empty()
            || found.vars.get(token.as_str()).and_then(ConfigValue::as_str) == Some(wanted)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(yaml: &str) -> ConfigTree {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn pattern(raw: &str) -> NamingPattern {
        NamingPattern::parse(raw).unwrap()
    }

    const STACKS: &str = r#"
a-undefined:
  components:
    terraform: {}
b-dev:
  components:
    terraform:
      vpc:
        vars: { tenant: acme, environment: ue2, stage: dev }
c-prod:
  components:
    terraform:
      vpc:
        vars: { tenant: acme, environment: ue2, stage: prod }
d-partial:
  components:
    terraform:
      vpc:
        vars: { tenant: acme, environment: uw2 }
"#;

    #[test]
    fn directory_mode_uses_exact_key() {
        let tree = tree(STACKS);
        let found = reconcile(
            &pattern("{tenant}-{stage}"),
            StackType::Directory,
            "b-dev",
            &tree,
            "terraform",
            "vpc",
        )
        .unwrap();
        assert_eq!(found.stack, "b-dev");
    }

    #[test]
    fn directory_mode_does_not_search() {
        let tree = tree(STACKS);
        let err = reconcile(
            &pattern("{tenant}-{environment}-{stage}"),
            StackType::Directory,
            "acme-ue2-prod",
            &tree,
            "terraform",
            "vpc",
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Stack 'acme-ue2-prod' does not exist");
    }

    #[test]
    fn search_skips_stacks_without_the_component() {
        let tree = tree(STACKS);
        let found = search(
            &pattern("{tenant}-{environment}-{stage}"),
            "acme-ue2-prod",
            &tree,
            "terraform",
            "vpc",
        )
        .unwrap();
        assert_eq!(found.stack, "c-prod");
    }

    #[test]
    fn search_requires_all_requested_tokens() {
        let tree = tree(STACKS);
        // d-partial has tenant and environment right but no stage.
        let err = search(
            &pattern("{tenant}-{environment}-{stage}"),
            "acme-uw2-prod",
            &tree,
            "terraform",
            "vpc",
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::NoMatchingStack { .. }));
    }

    #[test]
    fn literal_segments_are_not_compared() {
        let tree = tree(STACKS);
        let found = search(
            &pattern("{tenant}-core-{stage}"),
            "acme-anything-dev",
            &tree,
            "terraform",
            "vpc",
        )
        .unwrap();
        assert_eq!(found.stack, "b-dev");
    }

    #[test]
    fn first_qualifying_stack_wins() {
        let tree = tree(STACKS);
        // b-dev and c-prod both qualify for tenant=acme alone.
        let found = search(&pattern("{tenant}"), "acme", &tree, "terraform", "vpc").unwrap();
        assert_eq!(found.stack, "b-dev");
    }

    #[test]
    fn part_count_mismatch_fails_before_searching() {
        let tree = tree(STACKS);
        let err = search(
            &pattern("{tenant}-{environment}-{stage}"),
            "acme-prod",
            &tree,
            "terraform",
            "vpc",
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Stack 'acme-prod' does not match the stack name pattern '{tenant}-{environment}-{stage}'"
        );
    }

    #[test]
    fn no_match_names_the_candidate_and_pattern() {
        let tree = tree(STACKS);
        let err = search(
            &pattern("{tenant}-{environment}-{stage}"),
            "acme-ue2-qa",
            &tree,
            "terraform",
            "vpc",
        )
        .unwrap_err();

        assert_eq!(
            err,
            DomainError::NoMatchingStack {
                component: "vpc".into(),
                stack: "acme-ue2-qa".into(),
                pattern: "{tenant}-{environment}-{stage}".into(),
            }
        );
    }

    #[test]
    fn non_string_vars_never_match() {
        let tree = tree(
            r#"
s1:
  components:
    terraform:
      vpc:
        vars: { tenant: acme, stage: 1 }
"#,
        );
        assert!(search(&pattern("{tenant}-{stage}"), "acme-1", &tree, "terraform", "vpc").is_err());
    }

    #[test]
    fn search_is_idempotent() {
        let tree = tree(STACKS);
        let p = pattern("{tenant}-{environment}-{stage}");
        let first = search(&p, "acme-ue2-dev", &tree, "terraform", "vpc").unwrap();
        let second = search(&p, "acme-ue2-dev", &tree, "terraform", "vpc").unwrap();
        assert_eq!(first, second);
    }
}

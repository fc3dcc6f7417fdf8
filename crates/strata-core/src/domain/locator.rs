//! Stack Locator: typed, level-by-level lookup of a component section.
//!
//! The chain is strict and ordered: stack → `components` → component type →
//! component → `vars`. Each level that is missing or has the wrong shape
//! fails with its own [`DomainError`]; nothing partial is returned.

use crate::domain::{
    entities::{ConfigMap, ConfigTree, ConfigValue},
    error::DomainError,
};

/// Section keys read by the locator.
pub mod keys {
    pub const COMPONENTS: &str = "components";
    pub const VARS: &str = "vars";
    pub const BACKEND: &str = "backend";
    pub const BACKEND_TYPE: &str = "backend_type";
    pub const COMPONENT: &str = "component";
    pub const COMMAND: &str = "command";
}

/// The parts of a component section the resolution engine consumes.
///
/// Optional attributes are `None` when absent or not of the expected shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentMatch<'a> {
    pub vars: &'a ConfigMap,
    pub backend: Option<&'a ConfigMap>,
    pub backend_type: Option<&'a str>,
    pub base_component_path: Option<&'a str>,
    pub command: Option<&'a str>,
}

/// A [`ComponentMatch`] together with the full component section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentConfig<'a> {
    pub section: &'a ConfigMap,
    pub component: ComponentMatch<'a>,
}

/// Directory-style lookup: returns the component section as well.
pub fn locate_component<'a>(
    tree: &'a ConfigTree,
    stack: &str,
    component_type: &str,
    component: &str,
) -> Result<ComponentConfig<'a>, DomainError> {
    let section = component_section(tree, stack, component_type, component)?;
    Ok(ComponentConfig {
        section,
        component: read_component(section, stack, component)?,
    })
}

/// Search-time lookup: same chain, without the full section.
pub fn find_component<'a>(
    tree: &'a ConfigTree,
    stack: &str,
    component_type: &str,
    component: &str,
) -> Result<ComponentMatch<'a>, DomainError> {
    let section = component_section(tree, stack, component_type, component)?;
    read_component(section, stack, component)
}

fn component_section<'a>(
    tree: &'a ConfigTree,
    stack: &str,
    component_type: &str,
    component: &str,
) -> Result<&'a ConfigMap, DomainError> {
    let stack_section = tree
        .get(stack)
        .and_then(ConfigValue::as_mapping)
        .ok_or_else(|| DomainError::StackNotFound {
            stack: stack.to_string(),
        })?;

    let components = mapping(stack_section, keys::COMPONENTS).ok_or_else(|| {
        DomainError::ComponentsSectionMissing {
            stack: stack.to_string(),
        }
    })?;

    let type_section = mapping(components, component_type).ok_or_else(|| {
        DomainError::ComponentTypeSectionMissing {
            component_type: component_type.to_string(),
            stack: stack.to_string(),
        }
    })?;

    mapping(type_section, component).ok_or_else(|| DomainError::ComponentNotFound {
        component: component.to_string(),
        stack: stack.to_string(),
    })
}

fn read_component<'a>(
    section: &'a ConfigMap,
    stack: &str,
    component: &str,
) -> Result<ComponentMatch<'a>, DomainError> {
    let vars = mapping(section, keys::VARS).ok_or_else(|| DomainError::VarsSectionMissing {
        component: component.to_string(),
        stack: stack.to_string(),
    })?;

    Ok(ComponentMatch {
        vars,
        backend: mapping(section, keys::BACKEND),
        backend_type: string(section, keys::BACKEND_TYPE),
        base_component_path: string(section, keys::COMPONENT),
        command: string(section, keys::COMMAND),
    })
}

fn mapping<'a>(map: &'a ConfigMap, key: &str) -> Option<&'a ConfigMap> {
    map.get(key).and_then(ConfigValue::as_mapping)
}

fn string<'a>(map: &'a ConfigMap, key: &str) -> Option<&'a str> {
    map.get(key).and_then(ConfigValue::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(yaml: &str) -> ConfigTree {
        serde_yaml::from_str(yaml).unwrap()
    }

    const FULL: &str = r#"
s1:
  components:
    terraform:
      vpc:
        component: infra/vpc
        command: tofu
        backend_type: s3
        backend:
          bucket: tf-state
        vars:
          tenant: acme
          stage: prod
    helmfile:
      nginx:
        vars: {}
"#;

    #[test]
    fn returns_all_optional_attributes() {
        let tree = tree(FULL);
        let found = locate_component(&tree, "s1", "terraform", "vpc").unwrap();

        assert_eq!(found.component.base_component_path, Some("infra/vpc"));
        assert_eq!(found.component.command, Some("tofu"));
        assert_eq!(found.component.backend_type, Some("s3"));
        assert_eq!(
            found
                .component
                .backend
                .and_then(|b| b.get("bucket"))
                .and_then(ConfigValue::as_str),
            Some("tf-state")
        );
        assert!(found.section.contains_key("vars"));
    }

    #[test]
    fn optional_attributes_default_to_none() {
        let tree = tree(FULL);
        let found = find_component(&tree, "s1", "helmfile", "nginx").unwrap();

        assert!(found.vars.is_empty());
        assert_eq!(found.backend, None);
        assert_eq!(found.base_component_path, None);
        assert_eq!(found.command, None);
    }

    #[test]
    fn missing_stack() {
        let tree = tree(FULL);
        let err = locate_component(&tree, "nope", "terraform", "vpc").unwrap_err();
        assert_eq!(err.to_string(), "Stack 'nope' does not exist");
    }

    #[test]
    fn each_level_has_its_own_error() {
        let tree = tree(
            r#"
no-components:
  vars: {}
no-type:
  components:
    helmfile: {}
no-component:
  components:
    terraform:
      other: { vars: {} }
no-vars:
  components:
    terraform:
      vpc:
        backend: {}
vars-wrong-shape:
  components:
    terraform:
      vpc:
        vars: [a, b]
"#,
        );

        let message = |stack: &str| {
            find_component(&tree, stack, "terraform", "vpc")
                .unwrap_err()
                .to_string()
        };

        assert_eq!(
            message("no-components"),
            "'components' section is missing in the stack 'no-components'"
        );
        assert_eq!(
            message("no-type"),
            "'components/terraform' section is missing in the stack 'no-type'"
        );
        assert_eq!(
            message("no-component"),
            "Invalid or missing configuration for the component 'vpc' in the stack 'no-component'"
        );
        assert_eq!(
            message("no-vars"),
            "Missing 'vars' section for the component 'vpc' in the stack 'no-vars'"
        );
        assert!(matches!(
            find_component(&tree, "vars-wrong-shape", "terraform", "vpc"),
            Err(DomainError::VarsSectionMissing { .. })
        ));
    }

    #[test]
    fn stack_that_is_not_a_mapping_does_not_exist() {
        let tree = ConfigTree::new().with_stack("s1", ConfigValue::from("oops"));
        assert!(matches!(
            find_component(&tree, "s1", "terraform", "vpc"),
            Err(DomainError::StackNotFound { .. })
        ));
    }

    #[test]
    fn lookup_is_independent_of_other_stacks() {
        let small = tree(FULL);
        let mut large = small.clone();
        for i in 0..20 {
            large.insert(format!("other-{i}"), ConfigValue::Null);
        }

        assert_eq!(
            find_component(&small, "s1", "terraform", "vpc").unwrap(),
            find_component(&large, "s1", "terraform", "vpc").unwrap()
        );
    }
}

//! Splitting a component argument into folder, name prefix and simple name.

use serde::Serialize;

/// Separator between folders in a component argument such as `vpc/private`.
pub const COMPONENT_PATH_SEPARATOR: char = '/';

/// Decomposition of the component argument.
///
/// `vpc/private` has folder prefix `vpc`, name prefix `vpc` and simple name
/// `private`; `infra/net/vpc` has folder prefix `infra/net` and name prefix
/// `infra-net`.
///
/// Edge cases follow plain splitting on `/`:
/// - `""` is a single empty segment: empty name, no prefixes.
/// - a single segment has no prefixes.
/// - a trailing `/` yields an empty simple name (`vpc/` → folder `vpc`, name `""`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentPath {
    pub folder_prefix: String,
    pub name_prefix: String,
    pub name: String,
}

impl ComponentPath {
    pub fn parse(component: &str) -> Self {
        let parts: Vec<&str> = component.split(COMPONENT_PATH_SEPARATOR).collect();

        match parts.split_last() {
            Some((last, folders)) if !folders.is_empty() => Self {
                folder_prefix: folders.join("/"),
                name_prefix: folders.join("-"),
                name: (*last).to_string(),
            },
            _ => Self {
                name: component.to_string(),
                ..Self::default()
            },
        }
    }

    pub fn has_folder(&self) -> bool {
        !self.folder_prefix.is_empty()
    }
}

/// Simple name of a base component: the final `/` segment of its path.
pub fn base_component_name(path: &str) -> &str {
    path.rsplit(COMPONENT_PATH_SEPARATOR).next().unwrap_or(path)
}

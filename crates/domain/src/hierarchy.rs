use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::Role;

/// Nested name → subtree mapping of roles reachable from root roles.
///
/// The top level is keyed by root role names. Roles whose declared parent is
/// not part of the input are not reachable and therefore absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleHierarchy(BTreeMap<String, RoleHierarchy>);

impl RoleHierarchy {
    /// Builds the hierarchy from an unordered role list.
    #[must_use]
    pub fn build(roles: &[Role]) -> Self {
        let mut children_by_parent: HashMap<&str, Vec<&str>> = HashMap::new();
        for role in roles {
            if let Some(parent_role) = role.parent_role() {
                children_by_parent
                    .entry(parent_role)
                    .or_default()
                    .push(role.name().as_str());
            }
        }

        let mut expanded = HashSet::new();
        let mut hierarchy = BTreeMap::new();
        for role in roles.iter().filter(|role| role.is_root()) {
            let name = role.name().as_str();
            if expanded.insert(name) {
                hierarchy.insert(
                    name.to_owned(),
                    subtree(name, &children_by_parent, &mut expanded),
                );
            }
        }

        Self(hierarchy)
    }

    /// Returns direct children keyed by name.
    #[must_use]
    pub fn children(&self) -> &BTreeMap<String, RoleHierarchy> {
        &self.0
    }

    /// Returns the subtree of a direct child.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RoleHierarchy> {
        self.0.get(name)
    }

    /// Returns true when the node has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Counts every role in the tree below this node.
    #[must_use]
    pub fn role_count(&self) -> usize {
        self.0
            .values()
            .map(|subtree| 1 + subtree.role_count())
            .sum()
    }
}

// A name is expanded at most once, so a repeated name in the input cannot
// recurse forever.
fn subtree<'a>(
    parent_name: &str,
    children_by_parent: &HashMap<&str, Vec<&'a str>>,
    expanded: &mut HashSet<&'a str>,
) -> RoleHierarchy {
    let mut children = BTreeMap::new();
    for &child_name in children_by_parent
        .get(parent_name)
        .map(Vec::as_slice)
        .unwrap_or_default()
    {
        if expanded.insert(child_name) {
            children.insert(
                child_name.to_owned(),
                subtree(child_name, children_by_parent, expanded),
            );
        }
    }

    RoleHierarchy(children)
}

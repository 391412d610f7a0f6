use std::collections::{BTreeSet, HashMap, HashSet};

use rolegraph_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::Role;

/// Resolved permission set for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectivePermissions {
    role_name: String,
    permissions: Vec<String>,
}

impl EffectivePermissions {
    /// Resolves the effective `resource:action` set of a role.
    ///
    /// The role's own grants form the base set. When the role inherits child
    /// permissions, every direct child contributes its own grants and, if that
    /// child also inherits, its descendants' grants by the same rule. The
    /// aggregation runs upward: ancestors collect what their subtree declares.
    pub fn resolve(role_name: &str, roles: &[Role]) -> AppResult<Self> {
        let role = roles
            .iter()
            .find(|role| role.name().as_str() == role_name)
            .ok_or_else(|| AppError::RoleNotFound(role_name.to_owned()))?;

        let mut permissions: BTreeSet<String> = role.own_permission_strings().collect();

        if role.inherit_child_permissions() {
            let mut children_by_parent: HashMap<&str, Vec<&Role>> = HashMap::new();
            for candidate in roles {
                if let Some(parent_role) = candidate.parent_role() {
                    children_by_parent
                        .entry(parent_role)
                        .or_default()
                        .push(candidate);
                }
            }

            let mut visited = HashSet::from([role.name().as_str()]);
            collect_child_permissions(
                role.name().as_str(),
                &children_by_parent,
                &mut visited,
                &mut permissions,
            )?;
        }

        Ok(Self {
            role_name: role_name.to_owned(),
            permissions: permissions.into_iter().collect(),
        })
    }

    /// Returns the resolved role name.
    #[must_use]
    pub fn role_name(&self) -> &str {
        self.role_name.as_str()
    }

    /// Returns permissions sorted ascending without duplicates.
    #[must_use]
    pub fn permissions(&self) -> &[String] {
        self.permissions.as_slice()
    }

    /// Returns the number of distinct permissions.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.permissions.len()
    }

    /// Consumes the value into its sorted permission list.
    #[must_use]
    pub fn into_permissions(self) -> Vec<String> {
        self.permissions
    }
}

fn collect_child_permissions<'a>(
    parent_name: &str,
    children_by_parent: &HashMap<&str, Vec<&'a Role>>,
    visited: &mut HashSet<&'a str>,
    permissions: &mut BTreeSet<String>,
) -> AppResult<()> {
    let Some(children) = children_by_parent.get(parent_name) else {
        return Ok(());
    };

    for &child in children {
        let child_name = child.name().as_str();
        // Each role has one parent, so reaching a role twice means the parent
        // chain loops.
        if !visited.insert(child_name) {
            return Err(AppError::CyclicHierarchy(child_name.to_owned()));
        }

        permissions.extend(child.own_permission_strings());

        if child.inherit_child_permissions() {
            collect_child_permissions(child_name, children_by_parent, visited, permissions)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rolegraph_core::AppError;

    use super::EffectivePermissions;
    use crate::{PermissionGrant, Role};

    fn grant(resource: &str, actions: &[&str]) -> PermissionGrant {
        PermissionGrant::new(resource, actions.iter().copied()).unwrap_or_else(|_| unreachable!())
    }

    fn role(name: &str, parent_role: Option<&str>, grants: Vec<PermissionGrant>) -> Role {
        let role = Role::new(name, grants).unwrap_or_else(|_| unreachable!());
        match parent_role {
            Some(parent_role) => role.with_parent_role(parent_role),
            None => role,
        }
    }

    fn admin_with_editor() -> Vec<Role> {
        vec![
            role(
                "Admin",
                None,
                vec![grant("File", &["read", "write"]), grant("Database", &["read"])],
            ),
            role("Editor", Some("Admin"), vec![grant("File", &["write"])]),
        ]
    }

    #[test]
    fn admin_rolls_up_editor_permissions() {
        let resolved = EffectivePermissions::resolve("Admin", &admin_with_editor());

        let Ok(resolved) = resolved else {
            panic!("admin should resolve");
        };
        assert_eq!(
            resolved.permissions(),
            ["Database:read", "File:read", "File:write"]
        );
        assert_eq!(resolved.total_count(), 3);
    }

    #[test]
    fn child_does_not_receive_parent_permissions() {
        let resolved = EffectivePermissions::resolve("Editor", &admin_with_editor());
        assert_eq!(
            resolved.map(EffectivePermissions::into_permissions).ok(),
            Some(vec!["File:write".to_owned()])
        );
    }

    #[test]
    fn missing_role_is_reported() {
        let resolved = EffectivePermissions::resolve("Ghost", &admin_with_editor());
        assert!(matches!(resolved, Err(AppError::RoleNotFound(name)) if name == "Ghost"));
    }

    #[test]
    fn non_inheriting_child_stops_the_roll_up() {
        let roles = vec![
            role("Root", None, vec![grant("A", &["x"])]),
            role("Middle", Some("Root"), vec![grant("B", &["y"])])
                .with_inherit_child_permissions(false),
            role("Leaf", Some("Middle"), vec![grant("C", &["z"])]),
        ];

        let resolved = EffectivePermissions::resolve("Root", &roles);
        assert_eq!(
            resolved.map(EffectivePermissions::into_permissions).ok(),
            Some(vec!["A:x".to_owned(), "B:y".to_owned()])
        );
    }

    #[test]
    fn grandchildren_roll_up_through_inheriting_children() {
        let roles = vec![
            role("Root", None, vec![grant("A", &["x"])]),
            role("Middle", Some("Root"), Vec::new()),
            role("Leaf", Some("Middle"), vec![grant("C", &["z"])]),
        ];

        let resolved = EffectivePermissions::resolve("Root", &roles);
        assert_eq!(resolved.map(|value| value.total_count()).ok(), Some(2));
    }

    #[test]
    fn self_parented_role_is_reported_as_cycle() {
        let roles = vec![role("Loop", Some("Loop"), vec![grant("A", &["x"])])];
        let resolved = EffectivePermissions::resolve("Loop", &roles);
        assert!(matches!(resolved, Err(AppError::CyclicHierarchy(name)) if name == "Loop"));
    }

    #[test]
    fn two_role_cycle_is_reported() {
        let roles = vec![
            role("A", Some("B"), Vec::new()),
            role("B", Some("A"), Vec::new()),
        ];
        let resolved = EffectivePermissions::resolve("A", &roles);
        assert!(matches!(resolved, Err(AppError::CyclicHierarchy(_))));
    }

    #[test]
    fn cycle_behind_non_inheriting_role_is_not_traversed() {
        let roles = vec![
            role("A", Some("B"), Vec::new()),
            role("B", Some("A"), Vec::new()).with_inherit_child_permissions(false),
        ];
        let resolved = EffectivePermissions::resolve("B", &roles);
        assert!(resolved.is_ok());
    }

    fn arbitrary_forest() -> impl Strategy<Value = Vec<Role>> {
        let grant_strategy = (
            prop::sample::select(vec!["File", "Database", "Queue"]),
            prop::collection::btree_set(prop::sample::select(vec!["read", "write", "admin"]), 0..3),
        );
        let role_strategy = (
            proptest::option::of(0usize..12),
            prop::collection::vec(grant_strategy, 0..4),
            any::<bool>(),
        );

        prop::collection::vec(role_strategy, 1..12).prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(index, (parent, grants, inherit))| {
                    let grants = grants
                        .into_iter()
                        .map(|(resource, actions)| {
                            PermissionGrant::new(resource, actions)
                                .unwrap_or_else(|_| unreachable!())
                        })
                        .collect();
                    let parent_name = parent
                        .filter(|parent_index| *parent_index < index)
                        .map(|parent_index| format!("role-{parent_index}"));
                    role(format!("role-{index}").as_str(), parent_name.as_deref(), grants)
                        .with_inherit_child_permissions(inherit)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn resolved_permissions_are_sorted_and_unique(roles in arbitrary_forest()) {
            for role in &roles {
                let resolved = EffectivePermissions::resolve(role.name().as_str(), &roles);
                prop_assert!(resolved.is_ok());
                let permissions = resolved.map(EffectivePermissions::into_permissions).unwrap_or_default();
                prop_assert!(permissions.windows(2).all(|pair| pair[0] < pair[1]));
            }
        }

        #[test]
        fn resolution_is_idempotent(roles in arbitrary_forest()) {
            let name = roles[0].name().as_str().to_owned();
            let first = EffectivePermissions::resolve(name.as_str(), &roles).ok();
            let second = EffectivePermissions::resolve(name.as_str(), &roles).ok();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn non_inheriting_role_resolves_to_own_permissions(roles in arbitrary_forest()) {
            for role in roles.iter().filter(|role| !role.inherit_child_permissions()) {
                let mut own: Vec<String> = role.own_permission_strings().collect();
                own.sort();
                own.dedup();
                let resolved = EffectivePermissions::resolve(role.name().as_str(), &roles)
                    .map(EffectivePermissions::into_permissions)
                    .unwrap_or_default();
                prop_assert_eq!(resolved, own);
            }
        }
    }
}

use std::collections::BTreeSet;
use std::num::NonZeroU32;

use rolegraph_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Deserializer, Serialize};

/// Actions granted on a single resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    resource: NonEmptyString,
    actions: BTreeSet<String>,
}

impl PermissionGrant {
    /// Creates a grant for a resource and its actions.
    pub fn new<I, S>(resource: impl Into<String>, actions: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            resource: NonEmptyString::new(resource)?,
            actions: actions.into_iter().map(Into::into).collect(),
        })
    }

    /// Returns the resource the grant is scoped to.
    #[must_use]
    pub fn resource(&self) -> &NonEmptyString {
        &self.resource
    }

    /// Returns granted actions in ascending order.
    #[must_use]
    pub fn actions(&self) -> &BTreeSet<String> {
        &self.actions
    }

    /// Flattens the grant into `resource:action` strings.
    pub fn permission_strings(&self) -> impl Iterator<Item = String> + '_ {
        self.actions
            .iter()
            .map(|action| format!("{}:{action}", self.resource))
    }
}

/// A named bundle of permissions placed in the role hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    name: NonEmptyString,
    #[serde(default, deserialize_with = "deserialize_parent_role")]
    parent_role: Option<String>,
    #[serde(default)]
    permissions: Vec<PermissionGrant>,
    #[serde(default)]
    mutually_exclusive_roles: BTreeSet<String>,
    #[serde(default)]
    max_members: Option<NonZeroU32>,
    #[serde(default = "default_inherit_child_permissions")]
    inherit_child_permissions: bool,
}

fn default_inherit_child_permissions() -> bool {
    true
}

// A blank parent marks a root role.
fn deserialize_parent_role<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let parent_role = Option::<String>::deserialize(deserializer)?;
    Ok(parent_role.filter(|parent_role| !parent_role.trim().is_empty()))
}

impl Role {
    /// Creates a root role that inherits child permissions.
    pub fn new(name: impl Into<String>, permissions: Vec<PermissionGrant>) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name)?,
            parent_role: None,
            permissions,
            mutually_exclusive_roles: BTreeSet::new(),
            max_members: None,
            inherit_child_permissions: true,
        })
    }

    /// Places the role under a parent. A blank name leaves the role a root.
    #[must_use]
    pub fn with_parent_role(mut self, parent_role: impl Into<String>) -> Self {
        let parent_role = parent_role.into();
        self.parent_role = (!parent_role.trim().is_empty()).then_some(parent_role);
        self
    }

    /// Declares roles that must never be held together with this one.
    #[must_use]
    pub fn with_mutually_exclusive_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mutually_exclusive_roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the advisory membership cap.
    #[must_use]
    pub fn with_max_members(mut self, max_members: NonZeroU32) -> Self {
        self.max_members = Some(max_members);
        self
    }

    /// Controls upward aggregation of descendant permissions.
    #[must_use]
    pub fn with_inherit_child_permissions(mut self, inherit: bool) -> Self {
        self.inherit_child_permissions = inherit;
        self
    }

    /// Returns the unique role name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the parent role name, if any.
    #[must_use]
    pub fn parent_role(&self) -> Option<&str> {
        self.parent_role.as_deref()
    }

    /// Returns true when the role has no parent.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_role.is_none()
    }

    /// Returns declared permission grants in declaration order.
    #[must_use]
    pub fn permissions(&self) -> &[PermissionGrant] {
        self.permissions.as_slice()
    }

    /// Returns mutually exclusive role names.
    #[must_use]
    pub fn mutually_exclusive_roles(&self) -> &BTreeSet<String> {
        &self.mutually_exclusive_roles
    }

    /// Returns the advisory membership cap.
    #[must_use]
    pub fn max_members(&self) -> Option<NonZeroU32> {
        self.max_members
    }

    /// Returns whether descendants' permissions roll up into this role.
    #[must_use]
    pub fn inherit_child_permissions(&self) -> bool {
        self.inherit_child_permissions
    }

    /// Flattens the role's own grants into `resource:action` strings.
    pub fn own_permission_strings(&self) -> impl Iterator<Item = String> + '_ {
        self.permissions
            .iter()
            .flat_map(PermissionGrant::permission_strings)
    }
}

use std::num::NonZeroU32;

use rolegraph_application::UpdateRoleInput;
use rolegraph_core::{AppError, AppResult};
use rolegraph_domain::{EffectivePermissions, PermissionGrant, Role, RoleHierarchy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::common::double_option;

/// Actions granted on one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-grant-dto.ts"
)]
pub struct PermissionGrantDto {
    pub resource: String,
    pub actions: Vec<String>,
}

impl TryFrom<PermissionGrantDto> for PermissionGrant {
    type Error = AppError;

    fn try_from(value: PermissionGrantDto) -> Result<Self, Self::Error> {
        PermissionGrant::new(value.resource, value.actions)
    }
}

impl From<&PermissionGrant> for PermissionGrantDto {
    fn from(value: &PermissionGrant) -> Self {
        Self {
            resource: value.resource().as_str().to_owned(),
            actions: value.actions().iter().cloned().collect(),
        }
    }
}

/// Incoming payload for validated role creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-role-request.ts"
)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub parent_role: Option<String>,
    #[serde(default)]
    pub permissions: Vec<PermissionGrantDto>,
    #[serde(default)]
    pub mutually_exclusive_roles: Vec<String>,
    #[serde(default)]
    pub max_members: Option<u32>,
    #[serde(default = "inherit_by_default")]
    pub inherit_child_permissions: bool,
}

fn inherit_by_default() -> bool {
    true
}

impl CreateRoleRequest {
    /// Converts the payload into a domain role.
    pub fn into_role(self) -> AppResult<Role> {
        let permissions = self
            .permissions
            .into_iter()
            .map(PermissionGrant::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        let mut role = Role::new(self.name, permissions)?
            .with_mutually_exclusive_roles(self.mutually_exclusive_roles)
            .with_inherit_child_permissions(self.inherit_child_permissions);
        if let Some(parent_role) = self.parent_role.filter(|value| !value.trim().is_empty()) {
            role = role.with_parent_role(parent_role);
        }
        if let Some(max_members) = self.max_members {
            role = role.with_max_members(positive_max_members(max_members)?);
        }

        Ok(role)
    }
}

/// Incoming payload for a partial role update.
///
/// Absent fields are left untouched; `null` clears `parent_role` and
/// `max_members`.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-role-request.ts"
)]
pub struct UpdateRoleRequest {
    #[serde(default, deserialize_with = "double_option")]
    #[ts(type = "string | null")]
    pub parent_role: Option<Option<String>>,
    #[serde(default)]
    pub permissions: Option<Vec<PermissionGrantDto>>,
    #[serde(default)]
    pub mutually_exclusive_roles: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[ts(type = "number | null")]
    pub max_members: Option<Option<u32>>,
    #[serde(default)]
    pub inherit_child_permissions: Option<bool>,
}

impl UpdateRoleRequest {
    /// Converts the payload into a service update input.
    pub fn into_input(self) -> AppResult<UpdateRoleInput> {
        let permissions = self
            .permissions
            .map(|permissions| {
                permissions
                    .into_iter()
                    .map(PermissionGrant::try_from)
                    .collect::<AppResult<Vec<_>>>()
            })
            .transpose()?;
        let max_members = self
            .max_members
            .map(|max_members| max_members.map(positive_max_members).transpose())
            .transpose()?;

        Ok(UpdateRoleInput {
            parent_role: self
                .parent_role
                .map(|parent_role| parent_role.filter(|value| !value.trim().is_empty())),
            permissions,
            mutually_exclusive_roles: self
                .mutually_exclusive_roles
                .map(|roles| roles.into_iter().collect()),
            max_members,
            inherit_child_permissions: self.inherit_child_permissions,
        })
    }
}

fn positive_max_members(value: u32) -> AppResult<NonZeroU32> {
    NonZeroU32::new(value)
        .ok_or_else(|| AppError::Validation("max_members must be greater than zero".to_owned()))
}

/// API representation of a role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub name: String,
    pub parent_role: Option<String>,
    pub permissions: Vec<PermissionGrantDto>,
    pub mutually_exclusive_roles: Vec<String>,
    pub max_members: Option<u32>,
    pub inherit_child_permissions: bool,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            name: role.name().as_str().to_owned(),
            parent_role: role.parent_role().map(ToOwned::to_owned),
            permissions: role
                .permissions()
                .iter()
                .map(PermissionGrantDto::from)
                .collect(),
            mutually_exclusive_roles: role.mutually_exclusive_roles().iter().cloned().collect(),
            max_members: role.max_members().map(NonZeroU32::get),
            inherit_child_permissions: role.inherit_child_permissions(),
        }
    }
}

/// Role list wrapped in a `data` envelope.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-list-response.ts"
)]
pub struct RoleListResponse {
    pub data: Vec<RoleResponse>,
}

/// Result of a role mutation.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-mutation-response.ts"
)]
pub struct RoleMutationResponse {
    pub message: String,
    pub data: RoleResponse,
}

/// Nested role tree keyed by role name.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-hierarchy-response.ts"
)]
pub struct RoleHierarchyResponse {
    #[ts(type = "Record<string, unknown>")]
    pub data: RoleHierarchy,
}

/// Resolved permissions of one role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/effective-permissions-response.ts"
)]
pub struct EffectivePermissionsResponse {
    pub role_name: String,
    pub permissions: Vec<String>,
    pub total_count: usize,
}

impl From<EffectivePermissions> for EffectivePermissionsResponse {
    fn from(value: EffectivePermissions) -> Self {
        let role_name = value.role_name().to_owned();
        let total_count = value.total_count();
        Self {
            role_name,
            permissions: value.into_permissions(),
            total_count,
        }
    }
}

use std::collections::BTreeSet;
use std::num::NonZeroU32;
use std::sync::Arc;

use rolegraph_core::{AppError, AppResult};
use rolegraph_domain::{Collection, EffectivePermissions, PermissionGrant, Role, RoleHierarchy};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::document_ports::{
    Document, DocumentFilter, DocumentRepository, decode_document, encode_document,
};

mod validation;

pub use validation::RoleConstraintValidator;

/// Partial role update applied with `$set` semantics.
///
/// `None` leaves a field untouched. For optional fields, `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRoleInput {
    /// New parent role, or `Some(None)` to turn the role into a root.
    pub parent_role: Option<Option<String>>,
    /// Replacement permission grants.
    pub permissions: Option<Vec<PermissionGrant>>,
    /// Replacement mutually exclusive role names.
    pub mutually_exclusive_roles: Option<BTreeSet<String>>,
    /// New membership cap, or `Some(None)` to remove it.
    pub max_members: Option<Option<NonZeroU32>>,
    /// New roll-up flag.
    pub inherit_child_permissions: Option<bool>,
}

impl UpdateRoleInput {
    /// Returns true when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent_role.is_none()
            && self.permissions.is_none()
            && self.mutually_exclusive_roles.is_none()
            && self.max_members.is_none()
            && self.inherit_child_permissions.is_none()
    }

    fn into_fields(self) -> AppResult<Document> {
        let mut fields = Document::new();
        if let Some(parent_role) = self.parent_role {
            fields.insert("parent_role".to_owned(), to_field(&parent_role)?);
        }
        if let Some(permissions) = self.permissions {
            fields.insert("permissions".to_owned(), to_field(&permissions)?);
        }
        if let Some(mutually_exclusive_roles) = self.mutually_exclusive_roles {
            fields.insert(
                "mutually_exclusive_roles".to_owned(),
                to_field(&mutually_exclusive_roles)?,
            );
        }
        if let Some(max_members) = self.max_members {
            fields.insert("max_members".to_owned(), to_field(&max_members)?);
        }
        if let Some(inherit_child_permissions) = self.inherit_child_permissions {
            fields.insert(
                "inherit_child_permissions".to_owned(),
                Value::Bool(inherit_child_permissions),
            );
        }

        Ok(fields)
    }
}

fn to_field<T: serde::Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value)
        .map_err(|error| AppError::Internal(format!("failed to encode role field: {error}")))
}

// Hierarchy and permission queries only look at these fields, so advisory
// fields written through the generic collection path cannot break them.
#[derive(Debug, Deserialize)]
struct PolicyRoleDocument {
    name: String,
    #[serde(default)]
    parent_role: Option<String>,
    #[serde(default)]
    permissions: Vec<PermissionGrant>,
    #[serde(default = "default_inherit_child_permissions")]
    inherit_child_permissions: bool,
}

fn default_inherit_child_permissions() -> bool {
    true
}

impl PolicyRoleDocument {
    fn into_role(self) -> AppResult<Role> {
        let role = Role::new(self.name, self.permissions)
            .map_err(|error| {
                AppError::Internal(format!("stored roles document is malformed: {error}"))
            })?
            .with_inherit_child_permissions(self.inherit_child_permissions);

        Ok(match self.parent_role {
            Some(parent_role) => role.with_parent_role(parent_role),
            None => role,
        })
    }
}

/// Application service for validated role management and policy queries.
#[derive(Clone)]
pub struct RoleService {
    repository: Arc<dyn DocumentRepository>,
    validator: RoleConstraintValidator,
}

impl RoleService {
    /// Creates a new service from a document repository.
    #[must_use]
    pub fn new(repository: Arc<dyn DocumentRepository>) -> Self {
        Self {
            validator: RoleConstraintValidator::new(repository.clone()),
            repository,
        }
    }

    /// Creates a role after hierarchy and exclusion checks.
    pub async fn create_role(&self, role: Role) -> AppResult<Role> {
        self.validator
            .check_create(&role)
            .await
            .inspect_err(|error| {
                warn!(role = %role.name(), error = %error, "role creation rejected");
            })?;

        self.repository
            .insert_unique(Collection::Roles, encode_document(&role)?)
            .await?;

        info!(
            role = %role.name(),
            parent_role = role.parent_role().unwrap_or_default(),
            "role created"
        );
        Ok(role)
    }

    /// Lists every stored role ordered by name.
    pub async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.repository
            .find_all(Collection::Roles, DocumentFilter::All)
            .await?
            .into_iter()
            .map(|document| decode_document(Collection::Roles, document))
            .collect()
    }

    /// Returns one role by name.
    pub async fn get_role(&self, name: &str) -> AppResult<Role> {
        let document = self
            .repository
            .find_by_name(Collection::Roles, name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{name}' was not found")))?;

        decode_document(Collection::Roles, document)
    }

    /// Applies a validated partial update and returns the stored role.
    pub async fn update_role(&self, name: &str, input: UpdateRoleInput) -> AppResult<Role> {
        if input.is_empty() {
            return Err(AppError::Validation(
                "role update must set at least one field".to_owned(),
            ));
        }

        self.validator
            .check_update(name, &input)
            .await
            .inspect_err(|error| {
                warn!(role = name, error = %error, "role update rejected");
            })?;

        let matched = self
            .repository
            .update_by_name(Collection::Roles, name, input.into_fields()?)
            .await?;
        if matched == 0 {
            return Err(AppError::NotFound(format!("role '{name}' was not found")));
        }

        info!(role = name, "role updated");
        self.get_role(name).await
    }

    /// Deletes a role that no other role names as parent.
    pub async fn delete_role(&self, name: &str) -> AppResult<()> {
        self.validator
            .check_delete(name)
            .await
            .inspect_err(|error| {
                warn!(role = name, error = %error, "role deletion rejected");
            })?;

        let deleted = self
            .repository
            .delete_by_name(Collection::Roles, name)
            .await?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!("role '{name}' was not found")));
        }

        info!(role = name, "role deleted");
        Ok(())
    }

    /// Builds the full role hierarchy from one read of the role collection.
    pub async fn role_hierarchy(&self) -> AppResult<RoleHierarchy> {
        let roles = self.policy_roles().await?;
        Ok(RoleHierarchy::build(&roles))
    }

    /// Resolves the effective permissions of a role.
    pub async fn effective_permissions(&self, role_name: &str) -> AppResult<EffectivePermissions> {
        let roles = self.policy_roles().await?;
        EffectivePermissions::resolve(role_name, &roles)
    }

    async fn policy_roles(&self) -> AppResult<Vec<Role>> {
        self.repository
            .find_all(Collection::Roles, DocumentFilter::All)
            .await?
            .into_iter()
            .map(|document| {
                decode_document::<PolicyRoleDocument>(Collection::Roles, document)?.into_role()
            })
            .collect()
    }
}

use std::collections::HashSet;

use super::*;

/// Checks role mutations against hierarchy and exclusion invariants.
///
/// Every check only reads the store. Callers write after a check succeeds,
/// so a rejected mutation never changes stored state.
#[derive(Clone)]
pub struct RoleConstraintValidator {
    repository: Arc<dyn DocumentRepository>,
}

impl RoleConstraintValidator {
    /// Creates a validator reading from the given repository.
    #[must_use]
    pub fn new(repository: Arc<dyn DocumentRepository>) -> Self {
        Self { repository }
    }

    /// Validates a role about to be created.
    pub async fn check_create(&self, role: &Role) -> AppResult<()> {
        let name = role.name().as_str();
        if self.role_exists(name).await? {
            return Err(AppError::DuplicateName(format!("role '{name}' already exists")));
        }

        if let Some(parent_role) = role.parent_role() {
            self.require_parent(parent_role).await?;
        }

        self.require_exclusive_roles(role.mutually_exclusive_roles())
            .await
    }

    /// Validates a partial update of an existing role.
    pub async fn check_update(&self, name: &str, input: &UpdateRoleInput) -> AppResult<()> {
        if !self.role_exists(name).await? {
            return Err(AppError::NotFound(format!("role '{name}' was not found")));
        }

        if let Some(Some(parent_role)) = &input.parent_role {
            self.require_parent(parent_role).await?;
            self.require_not_descendant(name, parent_role).await?;
        }

        if let Some(mutually_exclusive_roles) = &input.mutually_exclusive_roles {
            self.require_exclusive_roles(mutually_exclusive_roles)
                .await?;
        }

        Ok(())
    }

    /// Validates a role deletion.
    pub async fn check_delete(&self, name: &str) -> AppResult<()> {
        let children = self
            .repository
            .find_all(Collection::Roles, DocumentFilter::children_of(name))
            .await?;
        if !children.is_empty() {
            return Err(AppError::HasChildren(name.to_owned()));
        }

        if !self.role_exists(name).await? {
            return Err(AppError::NotFound(format!("role '{name}' was not found")));
        }

        Ok(())
    }

    async fn role_exists(&self, name: &str) -> AppResult<bool> {
        Ok(self
            .repository
            .find_by_name(Collection::Roles, name)
            .await?
            .is_some())
    }

    async fn require_parent(&self, parent_role: &str) -> AppResult<()> {
        if !self.role_exists(parent_role).await? {
            return Err(AppError::UnknownParent(parent_role.to_owned()));
        }

        Ok(())
    }

    async fn require_exclusive_roles(&self, names: &BTreeSet<String>) -> AppResult<()> {
        for exclusive_role in names {
            if !self.role_exists(exclusive_role).await? {
                return Err(AppError::UnknownExclusiveRole(exclusive_role.clone()));
            }
        }

        Ok(())
    }

    // Walks up from the proposed parent; meeting `name` on the way means the
    // role would become its own ancestor.
    async fn require_not_descendant(&self, name: &str, parent_role: &str) -> AppResult<()> {
        let mut visited = HashSet::new();
        let mut current = Some(parent_role.to_owned());

        while let Some(ancestor) = current {
            if ancestor == name {
                return Err(AppError::CyclicHierarchy(name.to_owned()));
            }
            if !visited.insert(ancestor.clone()) {
                return Err(AppError::CyclicHierarchy(ancestor));
            }

            current = self
                .repository
                .find_by_name(Collection::Roles, ancestor.as_str())
                .await?
                .and_then(|document| {
                    document
                        .get("parent_role")
                        .and_then(Value::as_str)
                        .map(str::to_owned)
                });
        }

        Ok(())
    }
}

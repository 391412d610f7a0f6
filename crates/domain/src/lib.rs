//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod collection;
mod hierarchy;
mod permissions;
mod resource;
mod role;

pub use collection::Collection;
pub use hierarchy::RoleHierarchy;
pub use permissions::EffectivePermissions;
pub use resource::{Resource, ResourceStatus};
pub use role::{PermissionGrant, Role};

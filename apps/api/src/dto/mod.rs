mod collections;
mod common;
mod roles;
mod resources;

pub use collections::{DocumentListResponse, DocumentMutationResponse, DocumentQuery};
pub use common::{GenericMessageResponse, HealthResponse};
pub use resources::{
    CreateResourceRequest, ResourceListResponse, ResourceMutationResponse, ResourceResponse,
};
pub use roles::{
    CreateRoleRequest, EffectivePermissionsResponse, PermissionGrantDto, RoleHierarchyResponse,
    RoleListResponse, RoleMutationResponse, RoleResponse, UpdateRoleRequest,
};

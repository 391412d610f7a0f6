pub mod collections;
pub mod health;
pub mod resources;
pub mod roles;

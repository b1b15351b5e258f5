pub mod auth;

pub use auth::{AdminOnly, AuthenticatedUser, RequireRole, RoleRequirement};

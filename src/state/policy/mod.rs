//! Authority rules.
//!
//! - [`permissions`]: configuration-driven predicates ([`PermissionPolicy`])
//! - [`ownership`]: succession and owner/moderator coupling ([`OwnershipPolicy`])

pub mod ownership;
pub mod permissions;

pub use ownership::OwnershipPolicy;
pub use permissions::PermissionPolicy;

//! Port traits defining external boundaries.
//!
//! The identity service is the only external system the pipeline talks to.
//! Implementations live in `src/adapters/`.

pub mod identity_service;

pub use identity_service::{
    AccountRef, IdentityService, RawEntitlement, RoleAssignment, RoleResponse, ServiceError,
    ServiceFuture,
};

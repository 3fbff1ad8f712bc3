//! Live adapter for the identity service.

pub mod auth;
pub mod identity_service;

pub use identity_service::LiveIdentityService;

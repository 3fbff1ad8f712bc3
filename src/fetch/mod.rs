//! Fetching identities, roles and accounts from the identity service.
//!
//! Every failure here is logged and degrades to "nothing found"; a single
//! identity's fetch problems never abort a run.

pub mod access;
pub mod resolver;

pub use access::{AccessFetcher, RoleCache};
pub use resolver::IdentityResolver;

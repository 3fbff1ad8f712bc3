//! Identity-service adapters.
//!
//! - `live`: talks to the real service over HTTPS.
//! - `recording`: wraps another adapter and writes every call to a cassette.
//! - `replaying`: serves calls from a cassette.
//!
//! Recording and replaying agree on the method names and argument shapes
//! defined here.

pub mod live;
pub mod recording;
pub mod replaying;

use serde_json::{Map, Value};

/// Method name of [`IdentityService::find_identities`](crate::ports::IdentityService::find_identities).
pub(crate) const FIND_IDENTITIES: &str = "find_identities";
/// Method name of [`IdentityService::list_role_assignments`](crate::ports::IdentityService::list_role_assignments).
pub(crate) const LIST_ROLE_ASSIGNMENTS: &str = "list_role_assignments";
/// Method name of [`IdentityService::get_role`](crate::ports::IdentityService::get_role).
pub(crate) const GET_ROLE: &str = "get_role";
/// Method name of [`IdentityService::list_accounts`](crate::ports::IdentityService::list_accounts).
pub(crate) const LIST_ACCOUNTS: &str = "list_accounts";
/// Method name of [`IdentityService::list_entitlements`](crate::ports::IdentityService::list_entitlements).
pub(crate) const LIST_ENTITLEMENTS: &str = "list_entitlements";

/// Builds the recorded argument object of a single-argument call.
pub(crate) fn call_input(key: &str, value: &str) -> Value {
    let mut input = Map::new();
    input.insert(key.to_string(), Value::String(value.to_string()));
    Value::Object(input)
}

/// Argument key used by each method.
pub(crate) fn argument_key(method: &str) -> &'static str {
    match method {
        FIND_IDENTITIES => "alias",
        GET_ROLE => "role_id",
        LIST_ENTITLEMENTS => "account_id",
        _ => "identity_id",
    }
}

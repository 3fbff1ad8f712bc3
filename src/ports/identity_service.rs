//! Identity service port for the identity-governance API.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{lenient_string, IdentityRecord, RoleDetails, RoleEntitlement, NO_OWNER};

/// Boxed future type alias used by [`IdentityService`] to keep the trait dyn-compatible.
pub type ServiceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ServiceError>> + Send + 'a>>;

/// A failed call to the identity service.
///
/// These are recoverable: callers log them and carry on with partial data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },
    /// The response body did not have the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
    /// An error served from a cassette.
    #[error("{0}")]
    Replayed(String),
}

/// Reference to a role or identity owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRef {
    /// Owner display name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Summary of a role inside a role assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRef {
    /// Role id.
    pub id: String,
    /// Role name.
    pub name: String,
    /// Role owner.
    #[serde(default)]
    pub owner: Option<OwnerRef>,
}

/// One role assignment of an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    /// The assigned role.
    pub role: RoleRef,
}

/// Full role definition as returned by the role detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleResponse {
    /// Role name.
    pub name: String,
    /// Role owner.
    #[serde(default)]
    pub owner: Option<OwnerRef>,
    /// Entitlements granted by the role.
    #[serde(default)]
    pub entitlements: Vec<RoleEntitlement>,
}

impl From<RoleResponse> for RoleDetails {
    fn from(role: RoleResponse) -> Self {
        Self {
            name: role.name,
            owner: owner_name(role.owner.as_ref()),
            entitlements: role.entitlements,
        }
    }
}

/// An account owned by an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRef {
    /// Account id.
    pub id: String,
    /// Name of the issuing source.
    #[serde(rename = "sourceName")]
    pub source_name: String,
}

/// An entitlement exactly as a source reports it.
///
/// Scalar fields accept numbers and booleans as text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEntitlement {
    /// Entitlement id.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Generic name.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    /// Entitlement kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// Raw value.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,
    /// Description.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    /// Source-specific attributes.
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl RawEntitlement {
    /// Reads a source-specific attribute as text. Non-string scalars are
    /// rendered as JSON; `null` and absent keys are `None`.
    #[must_use]
    pub fn attribute_text(&self, key: &str) -> Option<String> {
        match self.attributes.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Resolves an owner reference to a display name.
#[must_use]
pub fn owner_name(owner: Option<&OwnerRef>) -> String {
    owner.and_then(|o| o.name.clone()).unwrap_or_else(|| NO_OWNER.to_string())
}

/// Reads identities, roles, accounts and entitlements from the identity service.
///
/// Every method is a single read; failures are returned, never retried.
pub trait IdentityService: Send + Sync {
    /// Lists identities whose alias equals `alias` exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    fn find_identities(&self, alias: &str) -> ServiceFuture<'_, Vec<IdentityRecord>>;

    /// Lists the role assignments of an identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    fn list_role_assignments(&self, identity_id: &str) -> ServiceFuture<'_, Vec<RoleAssignment>>;

    /// Fetches the full definition of a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    fn get_role(&self, role_id: &str) -> ServiceFuture<'_, RoleResponse>;

    /// Lists the accounts belonging to an identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    fn list_accounts(&self, identity_id: &str) -> ServiceFuture<'_, Vec<AccountRef>>;

    /// Lists the raw entitlements of an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    fn list_entitlements(&self, account_id: &str) -> ServiceFuture<'_, Vec<RawEntitlement>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_response_defaults_owner() {
        let role: RoleResponse = serde_json::from_value(json!({
            "name": "Finance",
            "entitlements": [{"id": "e1", "name": "Read"}]
        }))
        .unwrap();
        let details = RoleDetails::from(role);
        assert_eq!(details.owner, NO_OWNER);
        assert_eq!(details.entitlements[0].name, "Read");
    }

    #[test]
    fn attribute_text_renders_scalars() {
        let raw: RawEntitlement = serde_json::from_value(json!({
            "attribute": "APP_ROLE_CODE",
            "attributes": {"APP_ROLE_NAME": "GL Clerk", "level": 3, "gone": null}
        }))
        .unwrap();
        assert_eq!(raw.attribute_text("APP_ROLE_NAME").as_deref(), Some("GL Clerk"));
        assert_eq!(raw.attribute_text("level").as_deref(), Some("3"));
        assert_eq!(raw.attribute_text("gone"), None);
        assert_eq!(raw.attribute_text("missing"), None);
    }

    #[test]
    fn non_string_scalars_do_not_reject_the_entitlement_list() {
        let raw: Vec<RawEntitlement> = serde_json::from_value(json!([
            {"id": 17, "name": "Badge", "value": 4021, "description": true},
            {"value": "CN=Read,OU=Groups", "description": null}
        ]))
        .unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].id.as_deref(), Some("17"));
        assert_eq!(raw[0].value.as_deref(), Some("4021"));
        assert_eq!(raw[0].description.as_deref(), Some("true"));
        assert_eq!(raw[1].value.as_deref(), Some("CN=Read,OU=Groups"));
        assert_eq!(raw[1].description, None);
    }
}

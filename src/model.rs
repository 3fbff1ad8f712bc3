//! Identity, role, account and entitlement types.
//!
//! These are the shapes persisted in the identity snapshot. Field names on
//! the wire follow the identity service (`sourceName`, `departmentId`, ...).

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Display name used when an identity has none.
pub const UNKNOWN_IDENTITY: &str = "unknown_identity";

/// Owner name used when a role has no owner.
pub const NO_OWNER: &str = "N/A";

/// Organizational attributes of an identity as held by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityAttributes {
    /// Current department id.
    #[serde(
        rename = "departmentId",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub department_id: Option<String>,
    /// Current team id.
    #[serde(
        rename = "teamId",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub team_id: Option<String>,
    /// Every other attribute, kept verbatim.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// An identity as returned by an alias lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Opaque service id.
    pub id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// External alias (payroll id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Organizational attributes.
    #[serde(default)]
    pub attributes: IdentityAttributes,
    /// Remaining top-level fields, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An identity enriched with its roles and accounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// The resolved record.
    #[serde(flatten)]
    pub record: IdentityRecord,
    /// Assigned roles, in service order.
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Accounts with normalized entitlements.
    #[serde(default)]
    pub accounts: Vec<Account>,
}

impl Identity {
    /// Wraps a freshly resolved record with no roles or accounts yet.
    #[must_use]
    pub fn new(record: IdentityRecord) -> Self {
        Self { record, roles: Vec::new(), accounts: Vec::new() }
    }

    /// Display name, or [`UNKNOWN_IDENTITY`].
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.record.name.as_deref().unwrap_or(UNKNOWN_IDENTITY)
    }

    /// The first role, in role order, whose details grant an entitlement
    /// with the given canonical name.
    #[must_use]
    pub fn role_granting(&self, entitlement_name: &str) -> Option<&Role> {
        self.roles.iter().find(|role| {
            role.details.as_ref().is_some_and(|details| {
                details.entitlements.iter().any(|e| e.name == entitlement_name)
            })
        })
    }
}

/// A role assigned to an identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Role id.
    pub id: String,
    /// Role name.
    pub name: String,
    /// Owner display name, or [`NO_OWNER`].
    pub owner: String,
    /// Details shared by every holder of this role; `None` when the detail
    /// lookup failed.
    #[serde(default)]
    pub details: Option<Arc<RoleDetails>>,
}

/// Full definition of a role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleDetails {
    /// Role name.
    pub name: String,
    /// Owner display name, or [`NO_OWNER`].
    pub owner: String,
    /// Entitlements granted by the role, in service order.
    #[serde(default)]
    pub entitlements: Vec<RoleEntitlement>,
}

/// An entitlement reference inside a role definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEntitlement {
    /// Entitlement id.
    #[serde(default)]
    pub id: String,
    /// Canonical entitlement name.
    pub name: String,
}

/// An account on one source system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Name of the issuing source.
    #[serde(rename = "sourceName")]
    pub source_name: String,
    /// Entitlements in the source's own shape.
    #[serde(default)]
    pub entitlements: Vec<EntitlementRecord>,
}

/// A persisted entitlement in its source's shape.
///
/// The optional `attribute` names the entitlement kind; the remaining fields
/// are flat strings whose keys depend on the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementRecord {
    /// Entitlement kind, for sources that expose several.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// Source-specific fields.
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl EntitlementRecord {
    /// A record of the given kind with no fields yet.
    #[must_use]
    pub fn of_kind(attribute: impl Into<String>) -> Self {
        Self { attribute: Some(attribute.into()), fields: BTreeMap::new() }
    }

    /// Adds a field, builder style.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Reads a field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// The declared kind, if any.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.attribute.as_deref()
    }
}

/// The canonical form of an entitlement, comparable across sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entitlement {
    /// Canonical name.
    pub name: String,
    /// Description, when the source provides one.
    pub description: Option<String>,
}

/// Accepts a string, number or boolean and yields its text; `null` is `None`.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identity_record_keeps_unknown_fields() {
        let record: IdentityRecord = serde_json::from_value(json!({
            "id": "id-1",
            "name": "Jane Doe",
            "alias": "P100",
            "emailAddress": "jane@example.com",
            "attributes": {"departmentId": 100, "teamId": "T1", "location": "HQ"}
        }))
        .unwrap();

        assert_eq!(record.attributes.department_id.as_deref(), Some("100"));
        assert_eq!(record.attributes.team_id.as_deref(), Some("T1"));
        assert_eq!(record.attributes.other["location"], json!("HQ"));
        assert_eq!(record.extra["emailAddress"], json!("jane@example.com"));
    }

    #[test]
    fn entitlement_record_serializes_flat() {
        let record = EntitlementRecord::of_kind("APP_ROLE_CODE").with("APP_ROLE_NAME", "GL Clerk");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"attribute": "APP_ROLE_CODE", "APP_ROLE_NAME": "GL Clerk"}));
    }

    #[test]
    fn role_granting_returns_first_matching_role() {
        let details = |name: &str, ents: &[&str]| {
            Some(Arc::new(RoleDetails {
                name: name.into(),
                owner: NO_OWNER.into(),
                entitlements: ents
                    .iter()
                    .map(|e| RoleEntitlement { id: String::new(), name: (*e).into() })
                    .collect(),
            }))
        };
        let mut identity = Identity::default();
        identity.roles = vec![
            Role { id: "r0".into(), name: "Broken".into(), owner: NO_OWNER.into(), details: None },
            Role {
                id: "r1".into(),
                name: "Finance".into(),
                owner: NO_OWNER.into(),
                details: details("Finance", &["Read", "Write"]),
            },
            Role {
                id: "r2".into(),
                name: "Audit".into(),
                owner: NO_OWNER.into(),
                details: details("Audit", &["Read"]),
            },
        ];

        assert_eq!(identity.role_granting("Read").map(|r| r.name.as_str()), Some("Finance"));
        assert!(identity.role_granting("Delete").is_none());
        assert_eq!(identity.display_name(), UNKNOWN_IDENTITY);
    }
}

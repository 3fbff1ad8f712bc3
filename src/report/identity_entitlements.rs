//! The per-identity entitlement table.

use serde::Serialize;

use crate::model::Identity;
use crate::sources::SourceRegistry;

/// Column names, in order.
pub const HEADER: &[&str] =
    &["identityName", "sourceName", "entitlementValue", "description", "part of role"];

/// One entitlement held by an identity through one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityEntitlementRow {
    /// Display name with spaces replaced by `_`.
    pub identity_name: String,
    /// Source of the account.
    pub source_name: String,
    /// Canonical entitlement name.
    pub entitlement_value: String,
    /// Description, empty when unknown.
    pub description: String,
    /// First of the identity's roles granting this entitlement, or empty.
    pub part_of_role: String,
}

/// Builds the table for all identities, in identity, account and
/// entitlement order. Entitlements the source does not recognize are left out.
#[must_use]
pub fn build_rows(
    identities: &[Identity],
    registry: &SourceRegistry,
) -> Vec<IdentityEntitlementRow> {
    let mut rows = Vec::new();
    for identity in identities {
        let identity_name = identity.display_name().replace(' ', "_");
        for account in &identity.accounts {
            let adapter = registry.adapter_for(&account.source_name);
            for record in &account.entitlements {
                let Some(entitlement) = adapter.canonicalize(record) else {
                    continue;
                };
                let part_of_role = identity
                    .role_granting(&entitlement.name)
                    .map(|role| role.name.clone())
                    .unwrap_or_default();
                rows.push(IdentityEntitlementRow {
                    identity_name: identity_name.clone(),
                    source_name: account.source_name.clone(),
                    entitlement_value: entitlement.name,
                    description: entitlement.description.unwrap_or_default(),
                    part_of_role,
                });
            }
        }
    }
    rows
}

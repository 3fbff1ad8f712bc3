//! The per-role entitlement table.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::Identity;

/// Column names, in order.
pub const HEADER: &[&str] = &["roleName", "entitlementName", "identities"];

/// One entitlement granted by one role, with everyone holding the role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleEntitlementRow {
    /// Role name.
    pub role_name: String,
    /// Entitlement name as listed by the role.
    pub entitlement_name: String,
    /// Holder display names, deduplicated, joined with `", "`.
    pub identities: String,
}

/// Groups role entitlements across identities.
///
/// Rows appear in first-seen (role, entitlement) order; holder names keep
/// their first-seen order. Roles without details contribute nothing.
#[must_use]
pub fn aggregate(identities: &[Identity]) -> Vec<RoleEntitlementRow> {
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut groups: Vec<(&str, &str, Vec<&str>)> = Vec::new();

    for identity in identities {
        let holder = identity.display_name();
        for role in &identity.roles {
            let Some(details) = &role.details else { continue };
            for entitlement in &details.entitlements {
                let key = (role.name.as_str(), entitlement.name.as_str());
                let slot = *index.entry(key).or_insert_with(|| {
                    groups.push((key.0, key.1, Vec::new()));
                    groups.len() - 1
                });
                let holders = &mut groups[slot].2;
                if !holders.contains(&holder) {
                    holders.push(holder);
                }
            }
        }
    }

    groups
        .into_iter()
        .map(|(role_name, entitlement_name, holders)| RoleEntitlementRow {
            role_name: role_name.to_string(),
            entitlement_name: entitlement_name.to_string(),
            identities: holders.join(", "),
        })
        .collect()
}

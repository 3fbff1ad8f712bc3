//! Cloud directory source with two entitlement kinds per account.
//!
//! | raw kind               | persisted kind         | name field    |
//! |------------------------|------------------------|---------------|
//! | `appRoleAssignments`   | `AppRoleAssignment`    | `displayName` |
//! | `azureADEligibleRoles` | `azureADEligibleRoles` | `roleName`    |

use super::SourceAdapter;
use crate::model::{Entitlement, EntitlementRecord};
use crate::ports::RawEntitlement;

const RAW_APP_ROLE: &str = "appRoleAssignments";
const APP_ROLE: &str = "AppRoleAssignment";
const ELIGIBLE_ROLE: &str = "azureADEligibleRoles";

const DISPLAY_NAME: &str = "displayName";
const APP_ROLE_DESCRIPTION: &str = "appRole_description";
const ROLE_NAME: &str = "roleName";

/// The cloud directory source.
pub struct CloudDirectoryAdapter;

impl SourceAdapter for CloudDirectoryAdapter {
    fn sources(&self) -> &[&'static str] {
        &["Azure Active Directory"]
    }

    fn normalize(&self, raw: &RawEntitlement) -> Option<EntitlementRecord> {
        match raw.attribute.as_deref()? {
            RAW_APP_ROLE => Some(
                EntitlementRecord::of_kind(APP_ROLE)
                    .with(
                        DISPLAY_NAME,
                        raw.attribute_text(DISPLAY_NAME)
                            .unwrap_or_else(|| "No displayName".to_string()),
                    )
                    .with(
                        APP_ROLE_DESCRIPTION,
                        raw.attribute_text(APP_ROLE_DESCRIPTION)
                            .unwrap_or_else(|| "No description".to_string()),
                    ),
            ),
            ELIGIBLE_ROLE => Some(
                EntitlementRecord::of_kind(ELIGIBLE_ROLE)
                    .with(ROLE_NAME, raw.attribute_text(ROLE_NAME)?),
            ),
            _ => None,
        }
    }

    fn canonicalize(&self, record: &EntitlementRecord) -> Option<Entitlement> {
        match record.kind()? {
            APP_ROLE => Some(Entitlement {
                name: record.field(DISPLAY_NAME)?.to_string(),
                description: record.field(APP_ROLE_DESCRIPTION).map(str::to_string),
            }),
            ELIGIBLE_ROLE => Some(Entitlement {
                name: record.field(ROLE_NAME)?.to_string(),
                description: record.field("description").map(str::to_string),
            }),
            _ => None,
        }
    }
}

//! Multi-application ERP source exposing application-role code/name pairs.

use super::{plain_description, SourceAdapter};
use crate::model::{Entitlement, EntitlementRecord};
use crate::ports::RawEntitlement;

const APP_ROLE_CODE: &str = "APP_ROLE_CODE";
const APP_ROLE_NAME: &str = "APP_ROLE_NAME";

/// Application-role source. Only `APP_ROLE_CODE` entitlements are kept; the
/// canonical name is the paired `APP_ROLE_NAME`.
pub struct AppRolesAdapter;

impl SourceAdapter for AppRolesAdapter {
    fn sources(&self) -> &[&'static str] {
        &["Oracle | Multi Applications"]
    }

    fn normalize(&self, raw: &RawEntitlement) -> Option<EntitlementRecord> {
        if raw.attribute.as_deref() != Some(APP_ROLE_CODE) {
            return None;
        }
        Some(
            EntitlementRecord::of_kind(APP_ROLE_CODE)
                .with(APP_ROLE_NAME, raw.attribute_text(APP_ROLE_NAME)?),
        )
    }

    fn canonicalize(&self, record: &EntitlementRecord) -> Option<Entitlement> {
        if record.kind() != Some(APP_ROLE_CODE) {
            return None;
        }
        Some(Entitlement {
            name: record.field(APP_ROLE_NAME)?.to_string(),
            description: plain_description(record),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_role_name_for_role_codes() {
        let raw: RawEntitlement = serde_json::from_value(json!({
            "attribute": "APP_ROLE_CODE",
            "value": "GL_CLERK",
            "attributes": {"APP_ROLE_NAME": "General Ledger Clerk"}
        }))
        .unwrap();

        let record = AppRolesAdapter.normalize(&raw).unwrap();
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"attribute": "APP_ROLE_CODE", "APP_ROLE_NAME": "General Ledger Clerk"})
        );
        assert_eq!(AppRolesAdapter.canonicalize(&record).unwrap().name, "General Ledger Clerk");
    }

    #[test]
    fn other_kinds_are_skipped() {
        let raw: RawEntitlement = serde_json::from_value(json!({
            "attribute": "RESPONSIBILITY",
            "attributes": {"APP_ROLE_NAME": "ignored"}
        }))
        .unwrap();
        assert!(AppRolesAdapter.normalize(&raw).is_none());

        let persisted = EntitlementRecord::default().with("APP_ROLE_NAME", "no kind");
        assert!(AppRolesAdapter.canonicalize(&persisted).is_none());
    }
}

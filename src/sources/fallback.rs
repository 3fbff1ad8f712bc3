//! Rules for sources without a dedicated adapter.

use super::{plain_description, SourceAdapter, DESCRIPTION, NO_DESCRIPTION, VALUE};
use crate::model::{Entitlement, EntitlementRecord};
use crate::ports::RawEntitlement;

const NAME: &str = "name";
const ROLE_NAME: &str = "roleName";

/// Fallback adapter. Persists whichever of `name`, `roleName` and `value`
/// are present; the canonical name is the first of those, else empty.
pub struct FallbackAdapter;

impl SourceAdapter for FallbackAdapter {
    fn sources(&self) -> &[&'static str] {
        &[]
    }

    fn normalize(&self, raw: &RawEntitlement) -> Option<EntitlementRecord> {
        let mut record = EntitlementRecord::default();
        if let Some(name) = &raw.name {
            record = record.with(NAME, name.clone());
        }
        if let Some(role_name) = raw.attribute_text(ROLE_NAME) {
            record = record.with(ROLE_NAME, role_name);
        }
        if let Some(value) = &raw.value {
            record = record.with(VALUE, value.clone());
        }
        let description = raw.description.clone().unwrap_or_else(|| NO_DESCRIPTION.to_string());
        Some(record.with(DESCRIPTION, description))
    }

    fn canonicalize(&self, record: &EntitlementRecord) -> Option<Entitlement> {
        let name = [NAME, ROLE_NAME, VALUE]
            .iter()
            .find_map(|key| record.field(key))
            .unwrap_or_default()
            .to_string();
        Some(Entitlement { name, description: plain_description(record) })
    }
}

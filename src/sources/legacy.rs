//! Legacy account source: the raw value is the name.

use super::{plain_description, value_record, SourceAdapter, VALUE};
use crate::model::{Entitlement, EntitlementRecord};
use crate::ports::RawEntitlement;

/// Legacy source whose entitlement value is used verbatim.
pub struct LegacyAdapter;

impl SourceAdapter for LegacyAdapter {
    fn sources(&self) -> &[&'static str] {
        &["Oracle | Legacy Accounts"]
    }

    fn normalize(&self, raw: &RawEntitlement) -> Option<EntitlementRecord> {
        value_record(raw)
    }

    fn canonicalize(&self, record: &EntitlementRecord) -> Option<Entitlement> {
        Some(Entitlement {
            name: record.field(VALUE)?.to_string(),
            description: plain_description(record),
        })
    }
}

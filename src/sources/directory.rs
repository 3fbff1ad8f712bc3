//! Directory sources whose entitlements are distinguished names.

use super::{plain_description, value_record, SourceAdapter, VALUE};
use crate::model::{Entitlement, EntitlementRecord};
use crate::ports::RawEntitlement;

/// On-premises directory sources. The canonical name is the `CN=` component
/// of the group's distinguished name.
pub struct DirectoryAdapter;

impl SourceAdapter for DirectoryAdapter {
    fn sources(&self) -> &[&'static str] {
        &["Active Directory", "Active Directory | Production"]
    }

    fn normalize(&self, raw: &RawEntitlement) -> Option<EntitlementRecord> {
        value_record(raw)
    }

    fn canonicalize(&self, record: &EntitlementRecord) -> Option<Entitlement> {
        let value = record.field(VALUE)?;
        Some(Entitlement {
            name: common_name(value).to_string(),
            description: plain_description(record),
        })
    }
}

/// Extracts the text between a leading `CN=` and the first `,`.
///
/// Values without the `CN=` prefix are returned unchanged.
#[must_use]
pub fn common_name(value: &str) -> &str {
    match value.strip_prefix("CN=") {
        Some(rest) => rest.split(',').next().unwrap_or(rest),
        None => value,
    }
}

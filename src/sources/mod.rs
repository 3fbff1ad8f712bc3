//! Source adapters: per-source rules for turning entitlements into their
//! canonical form.
//!
//! Each upstream source shapes entitlements its own way. An adapter knows
//! one family of sources and answers two questions:
//!
//! - fetch side: which fields of a [`RawEntitlement`] to persist
//!   ([`SourceAdapter::normalize`]);
//! - report side: what the canonical name of a persisted
//!   [`EntitlementRecord`] is ([`SourceAdapter::canonicalize`]).
//!
//! Both sides skip the same unrecognized kinds. `canonicalize` reads only
//! persisted fields, so reports can be rebuilt from a snapshot alone.
//!
//! New sources are supported by registering another adapter with the
//! [`SourceRegistry`]; existing adapters never change.

pub mod app_roles;
pub mod cloud_directory;
pub mod directory;
pub mod fallback;
pub mod legacy;

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::{Entitlement, EntitlementRecord};
use crate::ports::RawEntitlement;

pub use app_roles::AppRolesAdapter;
pub use cloud_directory::CloudDirectoryAdapter;
pub use directory::DirectoryAdapter;
pub use fallback::FallbackAdapter;
pub use legacy::LegacyAdapter;

/// Field holding a raw value.
pub const VALUE: &str = "value";
/// Field holding a description.
pub const DESCRIPTION: &str = "description";
/// Description persisted when a value-shaped source provides none.
pub const NO_DESCRIPTION: &str = "no description";

/// Derives canonical entitlements for one family of sources.
pub trait SourceAdapter: Send + Sync {
    /// Source names this adapter serves.
    fn sources(&self) -> &[&'static str];

    /// Picks the fields of a raw entitlement to persist.
    ///
    /// Returns `None` when the entitlement's kind is not one this source
    /// recognizes; such entitlements are dropped silently.
    fn normalize(&self, raw: &RawEntitlement) -> Option<EntitlementRecord>;

    /// Derives the canonical entitlement from a persisted record.
    ///
    /// Must depend on `record` only. Returns `None` for kinds this source
    /// does not recognize.
    fn canonicalize(&self, record: &EntitlementRecord) -> Option<Entitlement>;
}

/// Maps source names to their adapters.
pub struct SourceRegistry {
    adapters: HashMap<&'static str, Arc<dyn SourceAdapter>>,
    fallback: Arc<dyn SourceAdapter>,
}

impl SourceRegistry {
    /// A registry with no source-specific adapters; every source uses the
    /// fallback rules.
    #[must_use]
    pub fn empty() -> Self {
        Self { adapters: HashMap::new(), fallback: Arc::new(FallbackAdapter) }
    }

    /// A registry with every built-in adapter registered.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(DirectoryAdapter);
        registry.register(CloudDirectoryAdapter);
        registry.register(AppRolesAdapter);
        registry.register(LegacyAdapter);
        registry
    }

    /// Registers an adapter for every source it names. A later registration
    /// for the same source name replaces the earlier one.
    pub fn register<A>(&mut self, adapter: A)
    where
        A: SourceAdapter + 'static,
    {
        let adapter: Arc<dyn SourceAdapter> = Arc::new(adapter);
        for &source in adapter.sources() {
            self.adapters.insert(source, Arc::clone(&adapter));
        }
    }

    /// Returns the adapter for a source, or the fallback.
    #[must_use]
    pub fn adapter_for(&self, source: &str) -> &dyn SourceAdapter {
        self.adapters.get(source).map_or(self.fallback.as_ref(), |adapter| adapter.as_ref())
    }

    /// Returns `true` if a source has a dedicated adapter.
    #[must_use]
    pub fn is_registered(&self, source: &str) -> bool {
        self.adapters.contains_key(source)
    }

    /// Normalizes a raw entitlement issued by `source`.
    #[must_use]
    pub fn normalize(&self, source: &str, raw: &RawEntitlement) -> Option<EntitlementRecord> {
        self.adapter_for(source).normalize(raw)
    }

    /// Canonicalizes a persisted entitlement issued by `source`.
    #[must_use]
    pub fn canonicalize(&self, source: &str, record: &EntitlementRecord) -> Option<Entitlement> {
        self.adapter_for(source).canonicalize(record)
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Persists `value` and `description` only. Used by value-shaped sources.
pub(crate) fn value_record(raw: &RawEntitlement) -> Option<EntitlementRecord> {
    let value = raw.value.clone()?;
    let description = raw.description.clone().unwrap_or_else(|| NO_DESCRIPTION.to_string());
    Some(EntitlementRecord::default().with(VALUE, value).with(DESCRIPTION, description))
}

/// Reads the plain `description` field of a record.
pub(crate) fn plain_description(record: &EntitlementRecord) -> Option<String> {
    record.field(DESCRIPTION).map(str::to_string)
}

//! Alias to identity resolution.

use log::{error, warn};

use crate::model::IdentityRecord;
use crate::ports::IdentityService;

/// Looks identities up by their external alias.
pub struct IdentityResolver<'a> {
    service: &'a dyn IdentityService,
}

impl<'a> IdentityResolver<'a> {
    /// Creates a resolver over the given service.
    #[must_use]
    pub fn new(service: &'a dyn IdentityService) -> Self {
        Self { service }
    }

    /// Returns the first identity whose alias equals `alias`.
    ///
    /// No match and service failures both yield `None`; failures are logged.
    pub async fn resolve(&self, alias: &str) -> Option<IdentityRecord> {
        match self.service.find_identities(alias).await {
            Ok(identities) => {
                let found = identities.into_iter().next();
                if found.is_none() {
                    warn!("No matching identity found for alias {alias}");
                }
                found
            }
            Err(e) => {
                error!("Failed to fetch identity for alias {alias}: {e}");
                None
            }
        }
    }
}

//! Role and account retrieval for a resolved identity.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, error};

use crate::model::{Account, Role, RoleDetails};
use crate::ports::identity_service::owner_name;
use crate::ports::IdentityService;
use crate::sources::SourceRegistry;

/// Role details fetched during one run, keyed by role id.
///
/// A role id is looked up at most once; failed lookups are remembered as
/// `None` and not retried.
#[derive(Debug, Default)]
pub struct RoleCache {
    entries: HashMap<String, Option<Arc<RoleDetails>>>,
    fetches: usize,
}

impl RoleCache {
    /// An empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached details of `role_id`, fetching them on first use.
    pub async fn get_or_fetch(
        &mut self,
        service: &dyn IdentityService,
        role_id: &str,
    ) -> Option<Arc<RoleDetails>> {
        if let Some(cached) = self.entries.get(role_id) {
            debug!("Role {role_id} served from cache");
            return cached.clone();
        }

        self.fetches += 1;
        let details = match service.get_role(role_id).await {
            Ok(role) => Some(Arc::new(RoleDetails::from(role))),
            Err(e) => {
                error!("Failed to retrieve role details for role ID: {role_id}. {e}");
                None
            }
        };
        self.entries.insert(role_id.to_string(), details.clone());
        details
    }

    /// Number of distinct role ids seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no role has been looked up yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of service calls made.
    #[must_use]
    pub fn fetches(&self) -> usize {
        self.fetches
    }
}

/// Fetches the roles and accounts of identities, normalizing account
/// entitlements through the source registry.
pub struct AccessFetcher<'a> {
    service: &'a dyn IdentityService,
    registry: &'a SourceRegistry,
    roles: RoleCache,
}

impl<'a> AccessFetcher<'a> {
    /// Creates a fetcher with an empty role cache.
    #[must_use]
    pub fn new(service: &'a dyn IdentityService, registry: &'a SourceRegistry) -> Self {
        Self { service, registry, roles: RoleCache::new() }
    }

    /// The role cache of this run.
    #[must_use]
    pub fn role_cache(&self) -> &RoleCache {
        &self.roles
    }

    /// Lists the roles of an identity, in service order, each with its
    /// (cached) details.
    pub async fn fetch_roles(&mut self, identity_id: &str) -> Vec<Role> {
        let assignments = match self.service.list_role_assignments(identity_id).await {
            Ok(assignments) => assignments,
            Err(e) => {
                error!("Failed to retrieve role assignments for identity ID: {identity_id}. {e}");
                return Vec::new();
            }
        };

        let mut roles = Vec::with_capacity(assignments.len());
        for assignment in assignments {
            let role = assignment.role;
            let details = self.roles.get_or_fetch(self.service, &role.id).await;
            roles.push(Role {
                owner: owner_name(role.owner.as_ref()),
                id: role.id,
                name: role.name,
                details,
            });
        }
        roles
    }

    /// Lists the accounts of an identity with their normalized entitlements.
    ///
    /// An account whose entitlements cannot be listed is kept with none.
    pub async fn fetch_accounts(&self, identity_id: &str) -> Vec<Account> {
        let accounts = match self.service.list_accounts(identity_id).await {
            Ok(accounts) => accounts,
            Err(e) => {
                error!("Failed to retrieve accounts for identity ID: {identity_id}. {e}");
                return Vec::new();
            }
        };

        let mut result = Vec::with_capacity(accounts.len());
        for account in accounts {
            let entitlements = match self.service.list_entitlements(&account.id).await {
                Ok(raw) => raw
                    .iter()
                    .filter_map(|item| self.registry.normalize(&account.source_name, item))
                    .collect(),
                Err(e) => {
                    error!("Failed to retrieve entitlements for account ID: {}. {e}", account.id);
                    Vec::new()
                }
            };
            result.push(Account { source_name: account.source_name, entitlements });
        }
        result
    }
}

//! Replaying adapter for the `IdentityService` port.

use std::path::Path;
use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::adapters::{
    FIND_IDENTITIES, GET_ROLE, LIST_ACCOUNTS, LIST_ENTITLEMENTS, LIST_ROLE_ASSIGNMENTS,
};
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::ReorgResult;
use crate::model::IdentityRecord;
use crate::ports::{
    AccountRef, IdentityService, RawEntitlement, RoleAssignment, RoleResponse, ServiceFuture,
};

/// Serves recorded identity-service results from a cassette.
pub struct ReplayingIdentityService {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingIdentityService {
    /// Create a replaying service from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        Self { replayer: Mutex::new(CassetteReplayer::new(cassette)) }
    }

    /// Load a cassette file and replay it.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be read or parsed.
    pub fn load(path: &Path) -> ReorgResult<Self> {
        Ok(Self::new(&Cassette::load(path)?))
    }

    /// Number of recorded interactions not yet served.
    ///
    /// # Panics
    ///
    /// Panics if the replayer lock is poisoned.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.replayer.lock().expect("replayer lock poisoned").remaining()
    }
}

impl IdentityService for ReplayingIdentityService {
    fn find_identities(&self, alias: &str) -> ServiceFuture<'_, Vec<IdentityRecord>> {
        let output = next_output(&self.replayer, FIND_IDENTITIES, alias);
        Box::pin(async move { replay_result(output?) })
    }

    fn list_role_assignments(&self, identity_id: &str) -> ServiceFuture<'_, Vec<RoleAssignment>> {
        let output = next_output(&self.replayer, LIST_ROLE_ASSIGNMENTS, identity_id);
        Box::pin(async move { replay_result(output?) })
    }

    fn get_role(&self, role_id: &str) -> ServiceFuture<'_, RoleResponse> {
        let output = next_output(&self.replayer, GET_ROLE, role_id);
        Box::pin(async move { replay_result(output?) })
    }

    fn list_accounts(&self, identity_id: &str) -> ServiceFuture<'_, Vec<AccountRef>> {
        let output = next_output(&self.replayer, LIST_ACCOUNTS, identity_id);
        Box::pin(async move { replay_result(output?) })
    }

    fn list_entitlements(&self, account_id: &str) -> ServiceFuture<'_, Vec<RawEntitlement>> {
        let output = next_output(&self.replayer, LIST_ENTITLEMENTS, account_id);
        Box::pin(async move { replay_result(output?) })
    }
}

//! Recording adapter for the `IdentityService` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::adapters::{
    FIND_IDENTITIES, GET_ROLE, LIST_ACCOUNTS, LIST_ENTITLEMENTS, LIST_ROLE_ASSIGNMENTS,
};
use crate::cassette::recorder::CassetteRecorder;
use crate::model::IdentityRecord;
use crate::ports::{
    AccountRef, IdentityService, RawEntitlement, RoleAssignment, RoleResponse, ServiceFuture,
};

/// Records identity-service interactions while delegating to an inner implementation.
pub struct RecordingIdentityService {
    inner: Box<dyn IdentityService>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingIdentityService {
    /// Creates a recording service wrapping the given implementation.
    pub fn new(inner: Box<dyn IdentityService>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl IdentityService for RecordingIdentityService {
    fn find_identities(&self, alias: &str) -> ServiceFuture<'_, Vec<IdentityRecord>> {
        let alias = alias.to_string();
        Box::pin(async move {
            let result = self.inner.find_identities(&alias).await;
            record_result(&self.recorder, FIND_IDENTITIES, &alias, &result);
            result
        })
    }

    fn list_role_assignments(&self, identity_id: &str) -> ServiceFuture<'_, Vec<RoleAssignment>> {
        let identity_id = identity_id.to_string();
        Box::pin(async move {
            let result = self.inner.list_role_assignments(&identity_id).await;
            record_result(&self.recorder, LIST_ROLE_ASSIGNMENTS, &identity_id, &result);
            result
        })
    }

    fn get_role(&self, role_id: &str) -> ServiceFuture<'_, RoleResponse> {
        let role_id = role_id.to_string();
        Box::pin(async move {
            let result = self.inner.get_role(&role_id).await;
            record_result(&self.recorder, GET_ROLE, &role_id, &result);
            result
        })
    }

    fn list_accounts(&self, identity_id: &str) -> ServiceFuture<'_, Vec<AccountRef>> {
        let identity_id = identity_id.to_string();
        Box::pin(async move {
            let result = self.inner.list_accounts(&identity_id).await;
            record_result(&self.recorder, LIST_ACCOUNTS, &identity_id, &result);
            result
        })
    }

    fn list_entitlements(&self, account_id: &str) -> ServiceFuture<'_, Vec<RawEntitlement>> {
        let account_id = account_id.to_string();
        Box::pin(async move {
            let result = self.inner.list_entitlements(&account_id).await;
            record_result(&self.recorder, LIST_ENTITLEMENTS, &account_id, &result);
            result
        })
    }
}

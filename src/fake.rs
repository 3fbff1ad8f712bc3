//! In-memory identity service for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{json, Value};

use crate::model::IdentityRecord;
use crate::ports::{
    AccountRef, IdentityService, RawEntitlement, RoleAssignment, RoleResponse, ServiceError,
    ServiceFuture,
};

/// Serves canned data; unknown keys answer with a 404.
#[derive(Default)]
pub(crate) struct FakeIdentityService {
    identities: HashMap<String, Vec<IdentityRecord>>,
    assignments: HashMap<String, Vec<RoleAssignment>>,
    roles: HashMap<String, RoleResponse>,
    accounts: HashMap<String, Vec<AccountRef>>,
    entitlements: HashMap<String, Vec<RawEntitlement>>,
    failing: HashSet<String>,
    role_fetches: AtomicUsize,
}

fn parse<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).expect("fixture must match the wire shape")
}

fn not_found<T>(key: &str) -> Result<T, ServiceError> {
    Err(ServiceError::Status { status: 404, body: format!("{key} not found") })
}

impl FakeIdentityService {
    pub(crate) fn identity(mut self, alias: &str, record: Value) -> Self {
        self.identities.entry(alias.to_string()).or_default().push(parse(record));
        self
    }

    pub(crate) fn assignments(mut self, identity_id: &str, assignments: Value) -> Self {
        self.assignments.insert(identity_id.to_string(), parse(assignments));
        self
    }

    pub(crate) fn role(mut self, role_id: &str, name: &str, entitlements: &[&str]) -> Self {
        let entitlements: Vec<Value> = entitlements
            .iter()
            .map(|e| json!({"id": format!("{role_id}-{e}"), "name": e}))
            .collect();
        self.roles.insert(
            role_id.to_string(),
            parse(json!({"name": name, "owner": {"name": "Owner"}, "entitlements": entitlements})),
        );
        self
    }

    pub(crate) fn accounts(mut self, identity_id: &str, accounts: Value) -> Self {
        self.accounts.insert(identity_id.to_string(), parse(accounts));
        self
    }

    pub(crate) fn entitlements(mut self, account_id: &str, entitlements: Value) -> Self {
        self.entitlements.insert(account_id.to_string(), parse(entitlements));
        self
    }

    /// Every call taking `key` as its argument fails with a 500.
    pub(crate) fn failing(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    pub(crate) fn role_fetches(&self) -> usize {
        self.role_fetches.load(Ordering::SeqCst)
    }

    fn lookup<T: Clone>(&self, map: &HashMap<String, T>, key: &str) -> Result<T, ServiceError> {
        if self.failing.contains(key) {
            return Err(ServiceError::Status { status: 500, body: "internal error".into() });
        }
        map.get(key).cloned().map_or_else(|| not_found(key), Ok)
    }

    /// Like `lookup`, but an unknown key lists nothing.
    fn lookup_or_empty<T: Clone>(
        &self,
        map: &HashMap<String, Vec<T>>,
        key: &str,
    ) -> Result<Vec<T>, ServiceError> {
        if map.contains_key(key) || self.failing.contains(key) {
            self.lookup(map, key)
        } else {
            Ok(Vec::new())
        }
    }
}

impl IdentityService for FakeIdentityService {
    fn find_identities(&self, alias: &str) -> ServiceFuture<'_, Vec<IdentityRecord>> {
        let result = self.lookup_or_empty(&self.identities, alias);
        Box::pin(async move { result })
    }

    fn list_role_assignments(&self, identity_id: &str) -> ServiceFuture<'_, Vec<RoleAssignment>> {
        let result = self.lookup_or_empty(&self.assignments, identity_id);
        Box::pin(async move { result })
    }

    fn get_role(&self, role_id: &str) -> ServiceFuture<'_, RoleResponse> {
        self.role_fetches.fetch_add(1, Ordering::SeqCst);
        let result = self.lookup(&self.roles, role_id);
        Box::pin(async move { result })
    }

    fn list_accounts(&self, identity_id: &str) -> ServiceFuture<'_, Vec<AccountRef>> {
        let result = self.lookup_or_empty(&self.accounts, identity_id);
        Box::pin(async move { result })
    }

    fn list_entitlements(&self, account_id: &str) -> ServiceFuture<'_, Vec<RawEntitlement>> {
        let result = self.lookup(&self.entitlements, account_id);
        Box::pin(async move { result })
    }
}

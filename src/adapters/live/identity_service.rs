//! Live adapter for the `IdentityService` port over the service's REST API.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::auth;
use crate::config::{normalize_base_url, Settings};
use crate::error::ReorgResult;
use crate::model::IdentityRecord;
use crate::ports::{
    AccountRef, IdentityService, RawEntitlement, RoleAssignment, RoleResponse, ServiceError,
    ServiceFuture,
};

/// Live identity service client authenticated with a bearer token.
pub struct LiveIdentityService {
    client: Client,
    base_url: String,
    token: String,
}

impl LiveIdentityService {
    /// Builds a TLS client from the configured trust anchor and exchanges
    /// the client credentials for a token.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the trust anchor is unusable, or an
    /// authentication error if the token exchange fails.
    pub async fn connect(settings: &Settings) -> ReorgResult<Self> {
        let client = auth::build_client(&settings.cert_path)?;
        let token = auth::request_token(
            &client,
            &settings.base_url,
            &settings.client_id,
            &settings.client_secret,
        )
        .await?;
        Ok(Self::new(client, &settings.base_url, token))
    }

    /// Creates a client from an already obtained token.
    #[must_use]
    pub fn new(client: Client, base_url: &str, token: impl Into<String>) -> Self {
        Self { client, base_url: normalize_base_url(base_url), token: token.into() }
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        filter: Option<String>,
    ) -> Result<T, ServiceError> {
        let mut request = self
            .client
            .get(format!("{}{path}", self.base_url))
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");
        if let Some(filter) = filter {
            request = request.query(&[("filters", filter)]);
        }

        let response = request.send().await.map_err(|e| ServiceError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| ServiceError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ServiceError::Status { status: status.as_u16(), body });
        }
        serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

impl IdentityService for LiveIdentityService {
    fn find_identities(&self, alias: &str) -> ServiceFuture<'_, Vec<IdentityRecord>> {
        let filter = format!("alias eq \"{alias}\"");
        Box::pin(async move { self.get("beta/identities", Some(filter)).await })
    }

    fn list_role_assignments(&self, identity_id: &str) -> ServiceFuture<'_, Vec<RoleAssignment>> {
        let path = format!("beta/identities/{identity_id}/role-assignments");
        Box::pin(async move { self.get(&path, None).await })
    }

    fn get_role(&self, role_id: &str) -> ServiceFuture<'_, RoleResponse> {
        let path = format!("beta/roles/{role_id}");
        Box::pin(async move { self.get(&path, None).await })
    }

    fn list_accounts(&self, identity_id: &str) -> ServiceFuture<'_, Vec<AccountRef>> {
        let filter = format!("identityId eq \"{identity_id}\"");
        Box::pin(async move { self.get("beta/accounts", Some(filter)).await })
    }

    fn list_entitlements(&self, account_id: &str) -> ServiceFuture<'_, Vec<RawEntitlement>> {
        let path = format!("beta/accounts/{account_id}/entitlements");
        Box::pin(async move { self.get(&path, None).await })
    }
}

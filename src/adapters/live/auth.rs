//! Client-credentials token exchange and TLS client setup.

use std::path::Path;

use log::{error, info};
use reqwest::{Certificate, Client};
use serde::Deserialize;

use crate::error::{ReorgError, ReorgResult};

/// Successful response of the token endpoint.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Builds an HTTP client that trusts the PEM certificate at `cert_path`.
///
/// # Errors
///
/// Returns [`ReorgError::InvalidConfig`] if the file cannot be read or is
/// not a PEM certificate.
pub fn build_client(cert_path: &Path) -> ReorgResult<Client> {
    let pem = std::fs::read(cert_path).map_err(|e| {
        ReorgError::InvalidConfig(format!(
            "Failed to read trust anchor {}: {e}",
            cert_path.display()
        ))
    })?;
    let certificate = Certificate::from_pem(&pem).map_err(|e| {
        ReorgError::InvalidConfig(format!(
            "Trust anchor {} is not a PEM certificate: {e}",
            cert_path.display()
        ))
    })?;
    Client::builder()
        .add_root_certificate(certificate)
        .build()
        .map_err(|e| ReorgError::InvalidConfig(format!("Failed to build HTTP client: {e}")))
}

/// Exchanges client credentials for a bearer token at `<base_url>oauth/token`.
///
/// # Errors
///
/// Returns [`ReorgError::Auth`] if the request fails, the endpoint rejects
/// the credentials, or the response carries no token.
pub async fn request_token(
    client: &Client,
    base_url: &str,
    client_id: &str,
    client_secret: &str,
) -> ReorgResult<String> {
    let url = format!("{base_url}oauth/token");
    let form = [
        ("grant_type", "client_credentials"),
        ("client_id", client_id),
        ("client_secret", client_secret),
    ];

    let response = client.post(&url).form(&form).send().await.map_err(|e| {
        error!("Exception occurred while obtaining access token: {e}");
        ReorgError::Auth(format!("token request failed: {e}"))
    })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ReorgError::Auth(format!("failed to read token response: {e}")))?;

    if !status.is_success() {
        error!("Failed to obtain access token. Status code: {}", status.as_u16());
        error!("Response content: {body}");
        return Err(ReorgError::Auth(format!(
            "token endpoint returned {}: {body}",
            status.as_u16()
        )));
    }

    let token: TokenResponse = serde_json::from_str(&body)
        .map_err(|e| ReorgError::Auth(format!("token response has no access_token: {e}")))?;
    info!("Successfully obtained access token.");
    Ok(token.access_token)
}

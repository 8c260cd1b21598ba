//! Authenticated client for the reporting API.

use std::sync::{Mutex, MutexGuard, PoisonError};

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::report::ReportRequest;
use crate::token::{CachedToken, TokenResponse};

/// Client that exchanges a refresh token for access tokens and hands
/// out authenticated report requests.
///
/// Access tokens are cached on the client and reused until they
/// expire. The cache lock is never held across a network call, so
/// overlapping calls on an expired cache may each run the exchange;
/// the cached value is replaced wholesale either way.
#[derive(Debug)]
pub struct AuthClient {
    credentials: Credentials,
    token_url: Url,
    pub(crate) http: Client,
    cache: Mutex<Option<CachedToken>>,
}

impl AuthClient {
    /// Creates a new client for the given token endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Url`] if `token_url` is not a valid URL.
    pub fn new(credentials: Credentials, token_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            credentials,
            token_url: Url::parse(token_url.as_ref())?,
            http: Client::new(),
            cache: Mutex::new(None),
        })
    }

    /// Replaces the HTTP client, for callers that need custom transport
    /// settings such as proxies or timeouts.
    #[must_use]
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Returns a valid access token, refreshing if the cached one is
    /// missing or expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the refresh exchange fails or the returned
    /// token cannot be decoded.
    pub async fn authenticate(&self) -> Result<String> {
        if let Some(token) = self.cached() {
            return Ok(token);
        }

        let fresh = CachedToken::decode(self.refresh().await?)?;
        match fresh.expires_at {
            Some(expires_at) => debug!("Caching access token valid until {expires_at}"),
            None => warn!("Access token has no expiry claim, it will be refreshed on next use"),
        }

        let value = fresh.value.clone();
        *self.lock_cache() = Some(fresh);
        Ok(value)
    }

    /// Performs the refresh-token exchange and returns the new access
    /// token without touching the cache.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthExchange`] when the token endpoint answers
    /// with a non-success status, and [`Error::UnexpectedResponse`]
    /// when a success response carries no access token.
    pub async fn refresh(&self) -> Result<String> {
        debug!("Refreshing access token at {}", self.token_url);

        let response = self
            .http
            .post(self.token_url.clone())
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", self.credentials.refresh_token.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            warn!("Token endpoint rejected the refresh exchange with status {status}");
            return Err(Error::AuthExchange { status, body });
        }

        let parsed: TokenResponse = response.json().await?;
        parsed.access_token.ok_or_else(|| {
            Error::UnexpectedResponse("token response is missing access_token".into())
        })
    }

    /// Starts a report request against the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Url`] if `endpoint` is not a valid URL.
    pub fn request(&self, endpoint: impl AsRef<str>) -> Result<ReportRequest<'_>> {
        Ok(ReportRequest::new(self, Url::parse(endpoint.as_ref())?))
    }

    /// Returns the cached token if one is stored and still valid.
    fn cached(&self) -> Option<String> {
        self.lock_cache()
            .as_ref()
            .filter(|token| !token.is_expired())
            .map(|token| token.value.clone())
    }

    fn lock_cache(&self) -> MutexGuard<'_, Option<CachedToken>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new, clippy::needless_collect, clippy::unreadable_literal, clippy::used_underscore_items, clippy::similar_names)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("id", "secret", "refresh")
    }

    #[test]
    fn test_client_creation() {
        let client = AuthClient::new(credentials(), "https://auth.example.com/token").unwrap();
        assert!(client.cached().is_none());
        assert_eq!(client.token_url.as_str(), "https://auth.example.com/token");
    }

    #[test]
    fn test_invalid_token_url_is_rejected() {
        match AuthClient::new(credentials(), "not a url") {
            Err(Error::Url(_)) => {}
            other => panic!("Expected URL error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_report_endpoint_is_rejected() {
        let client = AuthClient::new(credentials(), "https://auth.example.com/token").unwrap();
        match client.request("::definitely::not::a::url::") {
            Err(Error::Url(_)) => {}
            other => panic!("Expected URL error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_http_client_builder() {
        let custom = Client::builder().build().unwrap();
        let client = AuthClient::new(credentials(), "https://auth.example.com/token")
            .unwrap()
            .with_http_client(custom);
        assert!(client.cached().is_none());
    }
}

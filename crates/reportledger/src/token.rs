//! Access token inspection and caching support.
//!
//! Access tokens issued by the reporting service are JWTs. Expiry is
//! read straight from the `exp` claim of the payload segment, so no
//! signature verification happens here. The client only needs to know
//! when to ask for a fresh token, not whether the token is authentic.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Subset of JWT claims used for expiry checking. Everything else in
/// the payload is ignored.
#[derive(Debug, Deserialize)]
struct Claims {
    exp: Option<i64>,
}

/// Extracts the expiry instant from a JWT access token.
///
/// Returns `None` when the payload decodes cleanly but carries no
/// `exp` claim.
///
/// # Errors
///
/// Returns [`Error::MalformedToken`] if the token is not a dot-separated
/// JWT, the payload segment is not base64url, or the decoded payload is
/// not JSON.
pub fn expiry(token: &str) -> Result<Option<DateTime<Utc>>> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| Error::MalformedToken("missing payload segment".into()))?;

    let decoded = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| Error::MalformedToken(format!("payload is not base64url: {e}")))?;

    let claims: Claims = serde_json::from_slice(&decoded)
        .map_err(|e| Error::MalformedToken(format!("payload is not valid JSON: {e}")))?;

    match claims.exp {
        Some(secs) => DateTime::from_timestamp(secs, 0)
            .map(Some)
            .ok_or_else(|| Error::MalformedToken(format!("expiry {secs} is out of range"))),
        None => Ok(None),
    }
}

/// Checks whether a JWT access token has expired.
///
/// A token without an `exp` claim is treated as expired, so the client
/// refreshes rather than sending a token of unknown lifetime.
///
/// # Errors
///
/// Returns [`Error::MalformedToken`] if the token cannot be decoded.
pub fn is_expired(token: &str) -> Result<bool> {
    Ok(expiry(token)?.is_none_or(|expires_at| Utc::now() >= expires_at))
}

/// Access token held by the client, with its expiry decoded once at
/// store time.
#[derive(Debug, Clone)]
pub(crate) struct CachedToken {
    /// Raw token string, sent as the bearer credential.
    pub(crate) value: String,
    /// Expiry instant from the `exp` claim, if the token carries one.
    pub(crate) expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Decodes the expiry claim and wraps the token for caching.
    pub(crate) fn decode(value: String) -> Result<Self> {
        let expires_at = expiry(&value)?;
        Ok(Self { value, expires_at })
    }

    /// Whether the token is past its expiry. No expiry claim counts as
    /// expired.
    pub(crate) fn is_expired(&self) -> bool {
        self.expires_at
            .is_none_or(|expires_at| Utc::now() >= expires_at)
    }
}

/// Token response from the `OAuth2` token endpoint.
///
/// All fields are optional so a malformed success response surfaces as
/// a protocol error instead of a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: Option<String>,
    /// Token type (usually "Bearer").
    pub token_type: Option<String>,
    /// Lifetime in seconds, as reported by the server.
    pub expires_in: Option<u64>,
    /// Scope granted by the authorization server.
    pub scope: Option<String>,
}

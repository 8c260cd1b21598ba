//! Credential material for the refresh-token grant.

/// `OAuth2` client credentials plus a long-lived refresh token.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// `OAuth2` client identifier.
    pub client_id: String,
    /// `OAuth2` client secret.
    pub client_secret: String,
    /// Long-lived refresh token issued for this client.
    pub refresh_token: String,
}

impl Credentials {
    /// Creates a new set of credentials.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

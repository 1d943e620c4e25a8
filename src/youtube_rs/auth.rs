use std::collections::HashMap;
use std::fmt;

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::youtube_rs::types::GoogleTokenResponse;

/// Full read/write access to the user's YouTube account.
pub const YOUTUBE_SCOPE: &str = "https://www.googleapis.com/auth/youtube";

/// A caller supplied OAuth access token.
///
/// Passed explicitly to every upstream call; nothing in the crate caches it.
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[derive(Debug, Clone)]
pub struct GoogleOAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Consent screen URL the browser is redirected to from `/login`.
pub fn authorization_url(auth_url: &Url, credentials: &GoogleOAuthCredentials) -> Url {
    let mut url = auth_url.clone();
    url.query_pairs_mut()
        .append_pair("client_id", &credentials.client_id)
        .append_pair("response_type", "code")
        .append_pair("redirect_uri", &credentials.redirect_uri)
        .append_pair("scope", YOUTUBE_SCOPE)
        .append_pair("access_type", "offline")
        .append_pair("prompt", "consent");
    url
}

#[derive(Debug, thiserror::Error)]
pub enum ExchangeCodeError {
    #[error("Invalid code: {reason}")]
    InvalidCode { reason: String },
    #[error("Failed to send http request: {0}")]
    FailedToSendRequest(reqwest::Error),
    #[error("Failed to parse response: {0}")]
    FailedToParseResponse(reqwest::Error),
}

/// Exchange an authorization code for an access token.
/// https://developers.google.com/identity/protocols/oauth2/web-server#exchange-authorization-code
pub async fn exchange_code_for_token(
    client: &Client,
    token_url: &Url,
    credentials: &GoogleOAuthCredentials,
    code: &str,
) -> Result<GoogleTokenResponse, ExchangeCodeError> {
    let mut params = HashMap::new();
    params.insert("grant_type", "authorization_code");
    params.insert("code", code);
    params.insert("client_id", credentials.client_id.as_str());
    params.insert("client_secret", credentials.client_secret.as_str());
    // Must match the redirect uri used to start the flow
    params.insert("redirect_uri", credentials.redirect_uri.as_str());

    let response = client
        .post(token_url.clone())
        .form(&params)
        .send()
        .await
        .map_err(ExchangeCodeError::FailedToSendRequest)?;

    if !response.status().is_success() {
        return Err(ExchangeCodeError::InvalidCode {
            reason: response
                .text()
                .await
                .unwrap_or("Failed to get error text".to_string()),
        });
    }

    response
        .json::<GoogleTokenResponse>()
        .await
        .map_err(ExchangeCodeError::FailedToParseResponse)
}

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;

use crate::http_server::error::ApiError;
use crate::http_server::state::AppState;
use crate::youtube_rs::auth::{authorization_url, exchange_code_for_token};

/// Send the browser to Google's consent screen.
pub async fn login(State(app_state): State<Arc<AppState>>) -> Result<Redirect, ApiError> {
    let oauth = app_state
        .oauth
        .as_ref()
        .ok_or(ApiError::OAuthNotConfigured)?;

    let url = authorization_url(&oauth.auth_url, &oauth.credentials);
    Ok(Redirect::to(url.as_str()))
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
}

/// Exchange the code and hand the token to the page through the query string.
///
/// Failures redirect to `/?error=...`; the page owns the token from then on.
pub async fn callback(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect, ApiError> {
    let oauth = app_state
        .oauth
        .as_ref()
        .ok_or(ApiError::OAuthNotConfigured)?;

    let Some(code) = params.code.filter(|code| !code.is_empty()) else {
        return Ok(Redirect::to("/?error=no_code"));
    };

    match exchange_code_for_token(
        &app_state.http_client,
        &oauth.token_url,
        &oauth.credentials,
        &code,
    )
    .await
    {
        Ok(token) => {
            tracing::info!("Exchanged authorization code for access token");
            Ok(Redirect::to(&format!(
                "/?access_token={}",
                urlencoding::encode(&token.access_token)
            )))
        }
        Err(error) => {
            tracing::error!(error = %error, "Failed to exchange authorization code");
            Ok(Redirect::to("/?error=auth_failed"))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;
    use url::Url;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http_server::app::router;
    use crate::http_server::state::{AppState, OAuthState};
    use crate::ports::youtube::MockYoutubeClient;
    use crate::test_utils::test_router;
    use crate::youtube_rs::auth::GoogleOAuthCredentials;

    fn oauth_router(token_url: Url) -> axum::Router {
        let oauth = OAuthState {
            credentials: GoogleOAuthCredentials {
                client_id: "client-123".to_string(),
                client_secret: "secret".to_string(),
                redirect_uri: "http://localhost:3000/callback".to_string(),
            },
            auth_url: Url::parse("https://accounts.google.com/o/oauth2/v2/auth").unwrap(),
            token_url,
        };
        let state = AppState::for_client(Arc::new(MockYoutubeClient::new())).with_oauth(Some(oauth));
        router(Arc::new(state))
    }

    async fn location(router: axum::Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|value| value.to_str().unwrap().to_string())
            .unwrap_or_default();
        (response.status(), location)
    }

    #[tokio::test]
    async fn test_login_redirects_to_consent_screen() {
        let router = oauth_router(Url::parse("http://127.0.0.1:1/token").unwrap());

        let (status, location) = location(router, "/login").await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert!(location.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(location.contains("client_id=client-123"));
        assert!(location.contains("prompt=consent"));
    }

    #[tokio::test]
    async fn test_login_without_oauth_config() {
        let response = test_router(MockYoutubeClient::new())
            .oneshot(Request::get("/login").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_callback_without_code() {
        let router = oauth_router(Url::parse("http://127.0.0.1:1/token").unwrap());

        let (_, location) = location(router, "/callback").await;

        assert_eq!(location, "/?error=no_code");
    }

    #[tokio::test]
    async fn test_callback_exchanges_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("code=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "ya29.a/b",
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;
        let router = oauth_router(Url::parse(&format!("{}/token", server.uri())).unwrap());

        let (_, location) = location(router, "/callback?code=abc").await;

        assert_eq!(location, "/?access_token=ya29.a%2Fb");
    }

    #[tokio::test]
    async fn test_callback_exchange_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
            .mount(&server)
            .await;
        let router = oauth_router(Url::parse(&format!("{}/token", server.uri())).unwrap());

        let (_, location) = location(router, "/callback?code=stale").await;

        assert_eq!(location, "/?error=auth_failed");
    }
}

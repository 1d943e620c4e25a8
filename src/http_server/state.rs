use std::path::PathBuf;
use std::sync::Arc;

use url::Url;

use crate::ports::youtube::YoutubeClient;
use crate::youtube_rs::auth::GoogleOAuthCredentials;

/// Everything needed to run the Google login redirect and code exchange.
#[derive(Debug, Clone)]
pub struct OAuthState {
    pub credentials: GoogleOAuthCredentials,
    pub auth_url: Url,
    pub token_url: Url,
}

/// Shared, read-only state. Request specific data (the access token) never lives here.
pub struct AppState {
    pub youtube: Arc<dyn YoutubeClient>,
    pub http_client: reqwest::Client,
    pub oauth: Option<OAuthState>,
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    pub fn for_client(youtube: Arc<dyn YoutubeClient>) -> Self {
        Self {
            youtube,
            http_client: reqwest::Client::new(),
            oauth: None,
            static_dir: None,
        }
    }

    pub fn with_oauth(mut self, oauth: Option<OAuthState>) -> Self {
        self.oauth = oauth;
        self
    }

    pub fn with_static_dir(mut self, static_dir: Option<PathBuf>) -> Self {
        self.static_dir = static_dir;
        self
    }
}

use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::youtube_rs::auth::GoogleOAuthCredentials;
use crate::youtube_rs::types::PrivacyStatus;

const DEFAULT_YOUTUBE_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";
const DEFAULT_MUSIC_PLAYLIST_URL: &str = "https://music.youtube.com/playlist";
const DEFAULT_GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const DEFAULT_GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub port: u16,
    /// Public URL of this service, used to build the OAuth redirect uri
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<String>,
    /// Per request timeout for upstream calls, e.g. "10s"
    pub request_timeout: String,
    pub youtube: YoutubeSettings,
    pub google_oauth: GoogleOAuthSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    pub api_base_url: String,
    pub music_playlist_url: String,
    pub privacy_status: PrivacyStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleOAuthSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
    pub auth_url: String,
    pub token_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            static_dir: None,
            request_timeout: "10s".to_string(),
            youtube: YoutubeSettings::default(),
            google_oauth: GoogleOAuthSettings::default(),
        }
    }
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_YOUTUBE_API_BASE_URL.to_string(),
            music_playlist_url: DEFAULT_MUSIC_PLAYLIST_URL.to_string(),
            privacy_status: PrivacyStatus::Private,
        }
    }
}

impl Default for GoogleOAuthSettings {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            auth_url: DEFAULT_GOOGLE_AUTH_URL.to_string(),
            token_url: DEFAULT_GOOGLE_TOKEN_URL.to_string(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .wrap_err_with(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Default location of the config file
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join("playlist-porter").join("config.toml"))
    }

    /// Load the default config file, or built-in defaults when there is none
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Write the default config to the default location unless a file is already there
    pub fn create_default() -> Result<PathBuf> {
        let path = Self::config_path().ok_or_else(|| eyre!("No config directory available"))?;
        Self::create_default_at(&path)?;
        Ok(path)
    }

    pub fn create_default_at(path: &Path) -> Result<()> {
        if path.exists() {
            tracing::info!("Config file already exists at {}", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents =
            toml::to_string_pretty(&Self::default()).wrap_err("Failed to serialize config")?;
        std::fs::write(path, contents)
            .wrap_err_with(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Expand ~ to home directory
    fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/")
            && let Some(home) = dirs::home_dir()
        {
            return home.join(rest);
        }
        PathBuf::from(path)
    }

    pub fn static_dir_path(&self) -> Option<PathBuf> {
        self.static_dir.as_deref().map(Self::expand_path)
    }

    pub fn request_timeout(&self) -> Result<Duration> {
        humantime::parse_duration(&self.request_timeout)
            .wrap_err_with(|| format!("Invalid request_timeout: {}", self.request_timeout))
    }

    /// OAuth credentials, when both client id and secret are configured.
    pub fn oauth_credentials(&self) -> Option<GoogleOAuthCredentials> {
        let oauth = &self.google_oauth;
        let client_id = oauth.client_id.clone().filter(|id| !id.is_empty())?;
        let client_secret = oauth.client_secret.clone().filter(|secret| !secret.is_empty())?;
        let redirect_uri = oauth.redirect_uri.clone().unwrap_or_else(|| {
            format!("{}/callback", self.base_url.trim_end_matches('/'))
        });

        Some(GoogleOAuthCredentials {
            client_id,
            client_secret,
            redirect_uri,
        })
    }
}

impl YoutubeSettings {
    pub fn api_base_url(&self) -> Result<Url> {
        Url::parse(&self.api_base_url)
            .wrap_err_with(|| format!("Invalid youtube.api_base_url: {}", self.api_base_url))
    }

    pub fn music_playlist_url(&self) -> Result<Url> {
        Url::parse(&self.music_playlist_url).wrap_err_with(|| {
            format!(
                "Invalid youtube.music_playlist_url: {}",
                self.music_playlist_url
            )
        })
    }
}

impl GoogleOAuthSettings {
    pub fn auth_url(&self) -> Result<Url> {
        Url::parse(&self.auth_url)
            .wrap_err_with(|| format!("Invalid google_oauth.auth_url: {}", self.auth_url))
    }

    pub fn token_url(&self) -> Result<Url> {
        Url::parse(&self.token_url)
            .wrap_err_with(|| format!("Invalid google_oauth.token_url: {}", self.token_url))
    }
}

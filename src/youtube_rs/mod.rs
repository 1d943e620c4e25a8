//! Thin typed wrappers over the YouTube Data API v3 and Google OAuth endpoints.

use url::Url;

pub mod auth;
pub mod error;
pub mod playlist_items;
pub mod playlists;
pub mod types;

/// Upper bound on results requested from any list endpoint. Only one page is ever fetched.
pub const PAGE_SIZE: u32 = 50;

/// Join `path` onto the API base, treating the base as a directory even without a trailing slash.
pub(crate) fn endpoint(base_url: &Url, path: &str) -> Result<Url, url::ParseError> {
    if base_url.path().ends_with('/') {
        return base_url.join(path);
    }

    let mut base = base_url.clone();
    base.set_path(&format!("{}/", base_url.path()));
    base.join(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_with_and_without_trailing_slash() {
        let with = Url::parse("https://www.googleapis.com/youtube/v3/").unwrap();
        let without = Url::parse("https://www.googleapis.com/youtube/v3").unwrap();

        assert_eq!(
            endpoint(&with, "playlists").unwrap().as_str(),
            "https://www.googleapis.com/youtube/v3/playlists"
        );
        assert_eq!(
            endpoint(&without, "playlistItems").unwrap().as_str(),
            "https://www.googleapis.com/youtube/v3/playlistItems"
        );
    }
}

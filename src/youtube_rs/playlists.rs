use reqwest::Client;
use url::Url;

use crate::youtube_rs::auth::AccessToken;
use crate::youtube_rs::error::{YoutubeApiError, ensure_success};
use crate::youtube_rs::types::{
    InsertPlaylistRequest, InsertPlaylistSnippet, InsertPlaylistStatus, InsertedResource,
    PrivacyStatus, YoutubeListResponse, YoutubePlaylist,
};
use crate::youtube_rs::{PAGE_SIZE, endpoint};

/// First page of the authenticated user's playlists.
pub async fn list_my_playlists(
    client: &Client,
    base_url: &Url,
    token: &AccessToken,
) -> Result<Vec<YoutubePlaylist>, YoutubeApiError> {
    let url = endpoint(base_url, "playlists")?;
    let max_results = PAGE_SIZE.to_string();

    let response = client
        .get(url)
        .bearer_auth(token.secret())
        .query(&[
            ("part", "snippet,contentDetails"),
            ("mine", "true"),
            ("maxResults", max_results.as_str()),
        ])
        .send()
        .await
        .map_err(YoutubeApiError::FailedToSendRequest)?;

    let page = ensure_success(response)
        .await?
        .json::<YoutubeListResponse<YoutubePlaylist>>()
        .await
        .map_err(YoutubeApiError::FailedToParseResponse)?;

    if page.next_page_token.is_some() {
        tracing::debug!("More than one page of playlists, only the first is returned");
    }

    Ok(page.items)
}

/// Create an empty playlist. Every call creates a new playlist.
pub async fn insert_playlist(
    client: &Client,
    base_url: &Url,
    token: &AccessToken,
    title: &str,
    description: &str,
    privacy_status: PrivacyStatus,
) -> Result<InsertedResource, YoutubeApiError> {
    let url = endpoint(base_url, "playlists")?;
    let body = InsertPlaylistRequest {
        snippet: InsertPlaylistSnippet { title, description },
        status: InsertPlaylistStatus { privacy_status },
    };

    let response = client
        .post(url)
        .bearer_auth(token.secret())
        .query(&[("part", "snippet,status")])
        .json(&body)
        .send()
        .await
        .map_err(YoutubeApiError::FailedToSendRequest)?;

    ensure_success(response)
        .await?
        .json::<InsertedResource>()
        .await
        .map_err(YoutubeApiError::FailedToParseResponse)
}

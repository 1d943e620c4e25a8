use reqwest::Client;
use url::Url;

use crate::youtube_rs::auth::AccessToken;
use crate::youtube_rs::error::{YoutubeApiError, ensure_success};
use crate::youtube_rs::types::{
    InsertPlaylistItemRequest, InsertPlaylistItemSnippet, ResourceId,
    YoutubeListResponse, YoutubePlaylistItem,
};
use crate::youtube_rs::{PAGE_SIZE, endpoint};

pub const VIDEO_KIND: &str = "youtube#video";

/// First page (at most [`PAGE_SIZE`]) of a playlist's items, in playlist order.
pub async fn list_playlist_items(
    client: &Client,
    base_url: &Url,
    token: &AccessToken,
    playlist_id: &str,
) -> Result<Vec<YoutubePlaylistItem>, YoutubeApiError> {
    let url = endpoint(base_url, "playlistItems")?;
    let max_results = PAGE_SIZE.to_string();

    let response = client
        .get(url)
        .bearer_auth(token.secret())
        .query(&[
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ])
        .send()
        .await
        .map_err(YoutubeApiError::FailedToSendRequest)?;

    let page = ensure_success(response)
        .await?
        .json::<YoutubeListResponse<YoutubePlaylistItem>>()
        .await
        .map_err(YoutubeApiError::FailedToParseResponse)?;

    if page.next_page_token.is_some() {
        tracing::debug!(
            playlist_id,
            "Playlist has more than {PAGE_SIZE} items, only the first page is returned"
        );
    }

    Ok(page.items)
}

/// Append one video to a playlist. The API accepts a single resource per call.
pub async fn insert_playlist_item(
    client: &Client,
    base_url: &Url,
    token: &AccessToken,
    playlist_id: &str,
    video_id: &str,
) -> Result<(), YoutubeApiError> {
    let url = endpoint(base_url, "playlistItems")?;
    let body = InsertPlaylistItemRequest {
        snippet: InsertPlaylistItemSnippet {
            playlist_id,
            resource_id: ResourceId {
                kind: VIDEO_KIND.to_string(),
                video_id: Some(video_id.to_string()),
            },
        },
    };

    let response = client
        .post(url)
        .bearer_auth(token.secret())
        .query(&[("part", "snippet")])
        .json(&body)
        .send()
        .await
        .map_err(YoutubeApiError::FailedToSendRequest)?;

    // Any 2xx means the video was appended, whatever the body looks like
    ensure_success(response).await?;
    Ok(())
}

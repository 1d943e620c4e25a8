use std::sync::Arc;

use serde::Serialize;

use crate::migration::types::{CreatedPlaylist, ItemReference, PlaylistDescriptor};
use crate::youtube_rs::auth::AccessToken;
use crate::youtube_rs::error::YoutubeApiError;

/// Decoupled representation of a YouTube playlist from the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeApiPlaylist {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub item_count: u32,
}

/// Decoupled representation of one entry of a YouTube playlist.
///
/// `video_id` is `None` for entries whose video was removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeApiPlaylistItem {
    pub id: String,
    pub video_id: Option<String>,
    pub title: String,
    pub channel_title: Option<String>,
    pub position: Option<u32>,
}

/// Port trait wrapping the YouTube API capabilities used by business logic.
///
/// Every call takes the caller's access token explicitly. Implementations live
/// in `services::youtube::client` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait YoutubeClient: Send + Sync {
    async fn my_playlists(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<YoutubeApiPlaylist>, YoutubeApiError>;

    async fn playlist_items(
        &self,
        token: &AccessToken,
        playlist_id: &str,
    ) -> Result<Vec<YoutubeApiPlaylistItem>, YoutubeApiError>;

    async fn create_playlist(
        &self,
        token: &AccessToken,
        descriptor: &PlaylistDescriptor,
    ) -> Result<CreatedPlaylist, YoutubeApiError>;

    async fn add_playlist_item(
        &self,
        token: &AccessToken,
        playlist_id: &str,
        item: &ItemReference,
    ) -> Result<(), YoutubeApiError>;
}

#[async_trait::async_trait]
impl<T: YoutubeClient + ?Sized> YoutubeClient for Arc<T> {
    async fn my_playlists(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<YoutubeApiPlaylist>, YoutubeApiError> {
        (**self).my_playlists(token).await
    }

    async fn playlist_items(
        &self,
        token: &AccessToken,
        playlist_id: &str,
    ) -> Result<Vec<YoutubeApiPlaylistItem>, YoutubeApiError> {
        (**self).playlist_items(token, playlist_id).await
    }

    async fn create_playlist(
        &self,
        token: &AccessToken,
        descriptor: &PlaylistDescriptor,
    ) -> Result<CreatedPlaylist, YoutubeApiError> {
        (**self).create_playlist(token, descriptor).await
    }

    async fn add_playlist_item(
        &self,
        token: &AccessToken,
        playlist_id: &str,
        item: &ItemReference,
    ) -> Result<(), YoutubeApiError> {
        (**self).add_playlist_item(token, playlist_id, item).await
    }
}

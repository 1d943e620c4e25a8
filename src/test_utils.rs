use std::sync::Arc;

use axum::Router;

use crate::http_server::app::router;
use crate::http_server::state::AppState;
use crate::migration::types::{CreatedPlaylist, ItemReference};
use crate::ports::youtube::{MockYoutubeClient, YoutubeApiPlaylistItem};
use crate::youtube_rs::error::YoutubeApiError;

pub fn playlist_item(video_id: &str) -> YoutubeApiPlaylistItem {
    YoutubeApiPlaylistItem {
        id: format!("item-{video_id}"),
        video_id: Some(video_id.to_string()),
        title: format!("Video {video_id}"),
        channel_title: Some("Some Channel".to_string()),
        position: None,
    }
}

pub fn created_playlist(id: &str) -> CreatedPlaylist {
    CreatedPlaylist {
        id: id.to_string(),
        url: format!("https://music.youtube.com/playlist?list={id}"),
    }
}

pub fn item_references(video_ids: &[&str]) -> Vec<ItemReference> {
    video_ids.iter().map(|id| ItemReference::from(*id)).collect()
}

pub fn unauthorized() -> YoutubeApiError {
    YoutubeApiError::Unauthorized {
        status: 401,
        message: Some("Invalid Credentials".to_string()),
    }
}

pub fn rejected(status: u16, message: &str) -> YoutubeApiError {
    YoutubeApiError::Rejected {
        status,
        message: Some(message.to_string()),
        reason: None,
    }
}

/// An error with no upstream message, like a dropped connection.
pub fn transport_error() -> YoutubeApiError {
    YoutubeApiError::InvalidUrl(url::ParseError::EmptyHost)
}

/// Router wired to a mocked YouTube client, without OAuth or static files.
pub fn test_router(client: MockYoutubeClient) -> Router {
    let state = AppState::for_client(Arc::new(client));
    router(Arc::new(state))
}

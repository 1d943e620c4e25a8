use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr};
use reqwest::Client;
use url::Url;

use crate::config::YoutubeSettings;
use crate::migration::types::{CreatedPlaylist, ItemReference, PlaylistDescriptor};
use crate::ports::youtube::{YoutubeApiPlaylist, YoutubeApiPlaylistItem, YoutubeClient};
use crate::youtube_rs::auth::AccessToken;
use crate::youtube_rs::error::YoutubeApiError;
use crate::youtube_rs::playlist_items::{insert_playlist_item, list_playlist_items};
use crate::youtube_rs::playlists::{insert_playlist, list_my_playlists};
use crate::youtube_rs::types::{PrivacyStatus, YoutubePlaylist, YoutubePlaylistItem};

/// Production [`YoutubeClient`] backed by the YouTube Data API.
pub struct YoutubeHttpAdapter {
    client: Client,
    api_base_url: Url,
    music_playlist_url: Url,
    privacy_status: PrivacyStatus,
}

impl YoutubeHttpAdapter {
    pub fn new(settings: &YoutubeSettings, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .wrap_err("Failed to build http client")?;

        Ok(Self {
            client,
            api_base_url: settings.api_base_url()?,
            music_playlist_url: settings.music_playlist_url()?,
            privacy_status: settings.privacy_status,
        })
    }

    /// Link that opens the playlist in YouTube Music.
    fn playlist_link(&self, playlist_id: &str) -> String {
        let mut url = self.music_playlist_url.clone();
        url.query_pairs_mut().append_pair("list", playlist_id);
        url.to_string()
    }
}

impl From<YoutubePlaylist> for YoutubeApiPlaylist {
    fn from(playlist: YoutubePlaylist) -> Self {
        Self {
            thumbnail_url: playlist
                .snippet
                .thumbnails
                .as_ref()
                .and_then(|thumbnails| thumbnails.preferred_url())
                .map(str::to_string),
            item_count: playlist
                .content_details
                .map(|details| details.item_count)
                .unwrap_or_default(),
            id: playlist.id,
            title: playlist.snippet.title,
            description: playlist.snippet.description,
        }
    }
}

impl From<YoutubePlaylistItem> for YoutubeApiPlaylistItem {
    fn from(item: YoutubePlaylistItem) -> Self {
        let snippet = item.snippet.unwrap_or_default();

        Self {
            id: item.id,
            video_id: snippet
                .resource_id
                .and_then(|resource_id| resource_id.video_id),
            title: snippet.title,
            // The uploader of the video, not the owner of the playlist
            channel_title: snippet.video_owner_channel_title.or(snippet.channel_title),
            position: snippet.position,
        }
    }
}

#[async_trait::async_trait]
impl YoutubeClient for YoutubeHttpAdapter {
    async fn my_playlists(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<YoutubeApiPlaylist>, YoutubeApiError> {
        let playlists = list_my_playlists(&self.client, &self.api_base_url, token).await?;
        Ok(playlists.into_iter().map(YoutubeApiPlaylist::from).collect())
    }

    async fn playlist_items(
        &self,
        token: &AccessToken,
        playlist_id: &str,
    ) -> Result<Vec<YoutubeApiPlaylistItem>, YoutubeApiError> {
        let items =
            list_playlist_items(&self.client, &self.api_base_url, token, playlist_id).await?;
        Ok(items.into_iter().map(YoutubeApiPlaylistItem::from).collect())
    }

    async fn create_playlist(
        &self,
        token: &AccessToken,
        descriptor: &PlaylistDescriptor,
    ) -> Result<CreatedPlaylist, YoutubeApiError> {
        let inserted = insert_playlist(
            &self.client,
            &self.api_base_url,
            token,
            &descriptor.name,
            &descriptor.description,
            self.privacy_status,
        )
        .await?;

        Ok(CreatedPlaylist {
            url: self.playlist_link(&inserted.id),
            id: inserted.id,
        })
    }

    async fn add_playlist_item(
        &self,
        token: &AccessToken,
        playlist_id: &str,
        item: &ItemReference,
    ) -> Result<(), YoutubeApiError> {
        insert_playlist_item(
            &self.client,
            &self.api_base_url,
            token,
            playlist_id,
            item.as_str(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter(server: &MockServer) -> YoutubeHttpAdapter {
        let settings = YoutubeSettings {
            api_base_url: format!("{}/youtube/v3/", server.uri()),
            ..YoutubeSettings::default()
        };
        YoutubeHttpAdapter::new(&settings, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_create_playlist_builds_music_link() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/youtube/v3/playlists"))
            .and(body_partial_json(serde_json::json!({
                "status": { "privacyStatus": "private" }
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "PLabc" })),
            )
            .mount(&server)
            .await;

        let created = adapter(&server)
            .create_playlist(
                &AccessToken::new("t"),
                &PlaylistDescriptor::new("Mix", None),
            )
            .await
            .unwrap();

        assert_eq!(
            created,
            CreatedPlaylist {
                id: "PLabc".to_string(),
                url: "https://music.youtube.com/playlist?list=PLabc".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_playlist_items_map_video_ids_and_uploader() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/playlistItems"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    {
                        "id": "i1",
                        "snippet": {
                            "title": "Song",
                            "channelTitle": "Playlist Owner",
                            "videoOwnerChannelTitle": "Artist - Topic",
                            "position": 0,
                            "resourceId": { "kind": "youtube#video", "videoId": "v1" }
                        }
                    },
                    { "id": "i2" }
                ]
            })))
            .mount(&server)
            .await;

        let items = adapter(&server)
            .playlist_items(&AccessToken::new("t"), "PL1")
            .await
            .unwrap();

        assert_eq!(items[0].video_id.as_deref(), Some("v1"));
        assert_eq!(items[0].channel_title.as_deref(), Some("Artist - Topic"));
        assert_eq!(items[0].position, Some(0));
        assert_eq!(items[1].video_id, None);
    }

    #[tokio::test]
    async fn test_my_playlists_maps_thumbnail_and_count() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/playlists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{
                    "id": "PL1",
                    "snippet": {
                        "title": "Road trip",
                        "thumbnails": { "medium": { "url": "https://i.ytimg.com/m.jpg" } }
                    },
                    "contentDetails": { "itemCount": 3 }
                }]
            })))
            .mount(&server)
            .await;

        let playlists = adapter(&server)
            .my_playlists(&AccessToken::new("t"))
            .await
            .unwrap();

        assert_eq!(
            playlists,
            vec![YoutubeApiPlaylist {
                id: "PL1".to_string(),
                title: "Road trip".to_string(),
                description: String::new(),
                thumbnail_url: Some("https://i.ytimg.com/m.jpg".to_string()),
                item_count: 3,
            }]
        );
    }

    #[tokio::test]
    async fn test_add_playlist_item_surfaces_upstream_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/youtube/v3/playlistItems"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": {
                    "code": 403,
                    "message": "The request is not properly authorized to retrieve the specified playlist.",
                    "errors": [{ "reason": "videoNotFound" }]
                }
            })))
            .mount(&server)
            .await;

        let error = adapter(&server)
            .add_playlist_item(&AccessToken::new("t"), "PLabc", &"v1".into())
            .await
            .unwrap_err();

        assert!(
            error
                .upstream_message()
                .unwrap()
                .starts_with("The request is not properly authorized")
        );
    }
}

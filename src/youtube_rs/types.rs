use serde::{Deserialize, Serialize};

/* ---------- Response envelope ---------- */

/// Paged list response returned by every `list` endpoint of the Data API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct YoutubeListResponse<T> {
    #[serde(default)]
    pub items: Vec<T>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/* ---------- Playlists ---------- */

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubePlaylist {
    pub id: String,
    pub snippet: PlaylistSnippet,
    #[serde(default)]
    pub content_details: Option<PlaylistContentDetails>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistContentDetails {
    #[serde(default)]
    pub item_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnails {
    #[serde(default)]
    pub default: Option<Thumbnail>,
    #[serde(default)]
    pub medium: Option<Thumbnail>,
    #[serde(default)]
    pub high: Option<Thumbnail>,
}

impl Thumbnails {
    /// Medium is what the playlist cards show; fall back to whatever exists.
    pub fn preferred_url(&self) -> Option<&str> {
        self.medium
            .as_ref()
            .or(self.high.as_ref())
            .or(self.default.as_ref())
            .map(|thumbnail| thumbnail.url.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

/// Body for `POST playlists?part=snippet,status`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertPlaylistRequest<'a> {
    pub snippet: InsertPlaylistSnippet<'a>,
    pub status: InsertPlaylistStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsertPlaylistSnippet<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertPlaylistStatus {
    pub privacy_status: PrivacyStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyStatus {
    #[default]
    Private,
    Unlisted,
    Public,
}

/// The only field we read back from an inserted resource.
#[derive(Debug, Clone, Deserialize)]
pub struct InsertedResource {
    pub id: String,
}

/* ---------- Playlist items ---------- */

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubePlaylistItem {
    pub id: String,
    #[serde(default)]
    pub snippet: Option<PlaylistItemSnippet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub channel_title: Option<String>,
    #[serde(default)]
    pub video_owner_channel_title: Option<String>,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub resource_id: Option<ResourceId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

/// Body for `POST playlistItems?part=snippet`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertPlaylistItemRequest<'a> {
    pub snippet: InsertPlaylistItemSnippet<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertPlaylistItemSnippet<'a> {
    pub playlist_id: &'a str,
    pub resource_id: ResourceId,
}

/* ---------- Errors ---------- */

/// Google's JSON error envelope: `{"error": {"code", "message", "errors": [...]}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorEnvelope {
    pub error: GoogleErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<GoogleErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorDetail {
    #[serde(default)]
    pub reason: Option<String>,
}

/* ---------- OAuth ---------- */

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_items_default_to_empty() {
        let page: YoutubeListResponse<YoutubePlaylist> =
            serde_json::from_str(r#"{"kind": "youtube#playlistListResponse"}"#).unwrap();
        assert!(page.items.is_empty());
        assert!(page.next_page_token.is_none());

        let page: YoutubeListResponse<YoutubePlaylistItem> = serde_json::from_str(
            r#"{"nextPageToken": "CDIQAA", "items": [{"id": "i1", "snippet": {"title": "One"}}]}"#,
        )
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.next_page_token.as_deref(), Some("CDIQAA"));
    }

    #[test]
    fn test_playlist_item_without_video_id_deserializes() {
        let json = r#"{
            "id": "item1",
            "snippet": {
                "title": "Deleted video",
                "resourceId": { "kind": "youtube#video" }
            }
        }"#;
        let item: YoutubePlaylistItem = serde_json::from_str(json).unwrap();
        let resource_id = item.snippet.unwrap().resource_id.unwrap();
        assert_eq!(resource_id.kind, "youtube#video");
        assert!(resource_id.video_id.is_none());
    }

    #[test]
    fn test_insert_playlist_item_request_shape() {
        let request = InsertPlaylistItemRequest {
            snippet: InsertPlaylistItemSnippet {
                playlist_id: "PL123",
                resource_id: ResourceId {
                    kind: "youtube#video".to_string(),
                    video_id: Some("v1".to_string()),
                },
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "snippet": {
                    "playlistId": "PL123",
                    "resourceId": { "kind": "youtube#video", "videoId": "v1" }
                }
            })
        );
    }

    #[test]
    fn test_insert_playlist_request_uses_lowercase_privacy() {
        let request = InsertPlaylistRequest {
            snippet: InsertPlaylistSnippet {
                title: "Mix",
                description: "",
            },
            status: InsertPlaylistStatus {
                privacy_status: PrivacyStatus::Unlisted,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["status"]["privacyStatus"], "unlisted");
        assert_eq!(value["snippet"]["title"], "Mix");
    }

    #[test]
    fn test_thumbnails_prefer_medium() {
        let thumbnails: Thumbnails = serde_json::from_str(
            r#"{"default": {"url": "d"}, "medium": {"url": "m"}, "high": {"url": "h"}}"#,
        )
        .unwrap();
        assert_eq!(thumbnails.preferred_url(), Some("m"));

        let thumbnails: Thumbnails = serde_json::from_str(r#"{"default": {"url": "d"}}"#).unwrap();
        assert_eq!(thumbnails.preferred_url(), Some("d"));
    }
}

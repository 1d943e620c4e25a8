use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::{
    TypedHeader,
    extract::WithRejection,
    headers::{Authorization, authorization::Bearer},
};
use serde::Deserialize;

use crate::http_server::error::ApiError;
use crate::http_server::state::AppState;
use crate::migration::MigrationPipeline;
use crate::migration::create_destination::create_destination;
use crate::migration::populate::populate_playlist;
use crate::migration::types::{
    CreatedPlaylist, ItemReference, MigrationRequest, MigrationSummary, PlaylistDescriptor,
    PopulationOutcome,
};
use crate::ports::youtube::{YoutubeApiPlaylist, YoutubeApiPlaylistItem};
use crate::youtube_rs::auth::AccessToken;

type BearerHeader = WithRejection<TypedHeader<Authorization<Bearer>>, ApiError>;

fn bearer_token(header: BearerHeader) -> AccessToken {
    let WithRejection(TypedHeader(Authorization(bearer)), _) = header;
    AccessToken::new(bearer.token())
}

/// Treat blank strings the same as missing fields.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistInput {
    access_token: Option<String>,
    name: Option<String>,
    description: Option<String>,
    /// Accepted for clients that send the batch up front; videos are added via `/api/add-to-playlist`.
    #[serde(default)]
    video_ids: Vec<ItemReference>,
}

pub async fn create_playlist(
    State(app_state): State<Arc<AppState>>,
    WithRejection(Json(input), _): WithRejection<Json<CreatePlaylistInput>, ApiError>,
) -> Result<Json<CreatedPlaylist>, ApiError> {
    let (Some(access_token), Some(name)) = (present(input.access_token), present(input.name))
    else {
        return Err(ApiError::BadRequest(
            "Missing required fields: accessToken and name".to_string(),
        ));
    };

    if !input.video_ids.is_empty() {
        tracing::debug!(
            count = input.video_ids.len(),
            "Videos noted for the new playlist"
        );
    }

    let created = create_destination(
        app_state.youtube.as_ref(),
        &AccessToken::new(access_token),
        &PlaylistDescriptor::new(name, input.description),
    )
    .await?;

    Ok(Json(created))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToPlaylistInput {
    access_token: Option<String>,
    playlist_id: Option<String>,
    video_ids: Option<Vec<ItemReference>>,
}

/// Always answers 200 once the batch has started, whatever happened to individual videos.
pub async fn add_to_playlist(
    State(app_state): State<Arc<AppState>>,
    WithRejection(Json(input), _): WithRejection<Json<AddToPlaylistInput>, ApiError>,
) -> Result<Json<PopulationOutcome>, ApiError> {
    let (Some(access_token), Some(playlist_id), Some(video_ids)) = (
        present(input.access_token),
        present(input.playlist_id),
        input.video_ids,
    ) else {
        return Err(ApiError::BadRequest(
            "Missing required fields: accessToken, playlistId, and videoIds array".to_string(),
        ));
    };

    let outcome = populate_playlist(
        app_state.youtube.as_ref(),
        &AccessToken::new(access_token),
        &playlist_id,
        &video_ids,
    )
    .await?;

    Ok(Json(outcome))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertInput {
    access_token: Option<String>,
    source_playlist_id: Option<String>,
    name: Option<String>,
    description: Option<String>,
}

/// Run the whole conversion in one request.
pub async fn convert(
    State(app_state): State<Arc<AppState>>,
    WithRejection(Json(input), _): WithRejection<Json<ConvertInput>, ApiError>,
) -> Result<Json<MigrationSummary>, ApiError> {
    let (Some(access_token), Some(source_playlist_id), Some(name)) = (
        present(input.access_token),
        present(input.source_playlist_id),
        present(input.name),
    ) else {
        return Err(ApiError::BadRequest(
            "Missing required fields: accessToken, sourcePlaylistId and name".to_string(),
        ));
    };

    let request = MigrationRequest {
        access_token: AccessToken::new(access_token),
        source_playlist_id,
        descriptor: PlaylistDescriptor::new(name, input.description),
    };

    let summary = MigrationPipeline::new(app_state.youtube.clone())
        .run(&request)
        .await?;

    Ok(Json(summary))
}

pub async fn list_playlists(
    State(app_state): State<Arc<AppState>>,
    bearer: BearerHeader,
) -> Result<Json<Vec<YoutubeApiPlaylist>>, ApiError> {
    let playlists = app_state.youtube.my_playlists(&bearer_token(bearer)).await?;
    Ok(Json(playlists))
}

pub async fn list_playlist_items(
    State(app_state): State<Arc<AppState>>,
    Path(playlist_id): Path<String>,
    bearer: BearerHeader,
) -> Result<Json<Vec<YoutubeApiPlaylistItem>>, ApiError> {
    let items = app_state
        .youtube
        .playlist_items(&bearer_token(bearer), &playlist_id)
        .await?;
    Ok(Json(items))
}

use crate::youtube_rs::error::YoutubeApiError;

/// Fatal pipeline errors. Per-item failures never show up here; they are
/// collected in [`PopulationOutcome`](super::types::PopulationOutcome).
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Authorization failed: {0}")]
    Authorization(#[source] YoutubeApiError),
    #[error("Upstream request failed: {0}")]
    Upstream(#[source] YoutubeApiError),
    #[error("Playlist name must not be empty")]
    EmptyPlaylistName,
    #[error("Destination playlist id must not be empty")]
    InvalidDestination,
    #[error("No videos found in playlist {playlist_id}")]
    EmptySource { playlist_id: String },
}

impl From<YoutubeApiError> for MigrationError {
    fn from(error: YoutubeApiError) -> Self {
        if error.is_unauthorized() {
            Self::Authorization(error)
        } else {
            Self::Upstream(error)
        }
    }
}

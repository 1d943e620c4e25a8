use crate::migration::error::MigrationError;
use crate::migration::types::{CreatedPlaylist, PlaylistDescriptor};
use crate::ports::youtube::YoutubeClient;
use crate::youtube_rs::auth::AccessToken;

/// Create the destination playlist.
///
/// Not idempotent: each call creates a new playlist, even for an identical descriptor.
#[tracing::instrument(skip(client, token), fields(name = %descriptor.name))]
pub async fn create_destination<C>(
    client: &C,
    token: &AccessToken,
    descriptor: &PlaylistDescriptor,
) -> Result<CreatedPlaylist, MigrationError>
where
    C: YoutubeClient + ?Sized,
{
    let descriptor = descriptor.trimmed();
    if descriptor.name.is_empty() {
        return Err(MigrationError::EmptyPlaylistName);
    }

    let created = client.create_playlist(token, &descriptor).await?;
    if created.id.trim().is_empty() {
        return Err(MigrationError::InvalidDestination);
    }

    tracing::info!(playlist_id = %created.id, url = %created.url, "Created destination playlist");
    Ok(created)
}

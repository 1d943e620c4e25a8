use crate::migration::error::MigrationError;
use crate::migration::types::ItemReference;
use crate::ports::youtube::YoutubeClient;
use crate::youtube_rs::PAGE_SIZE;
use crate::youtube_rs::auth::AccessToken;

/// List the video ids of a source playlist, in the playlist's own order.
///
/// Reads a single page, so at most [`PAGE_SIZE`] references come back.
/// Entries without a video id (removed videos) are skipped. An empty
/// playlist is an `Ok` with no items, not an error.
#[tracing::instrument(skip(client, token))]
pub async fn enumerate_source_items<C>(
    client: &C,
    token: &AccessToken,
    source_playlist_id: &str,
) -> Result<Vec<ItemReference>, MigrationError>
where
    C: YoutubeClient + ?Sized,
{
    let items = client.playlist_items(token, source_playlist_id).await?;
    let listed = items.len();

    let references: Vec<ItemReference> = items
        .into_iter()
        .filter_map(|item| item.video_id)
        .filter(|video_id| !video_id.is_empty())
        .map(ItemReference::new)
        .take(PAGE_SIZE as usize)
        .collect();

    tracing::debug!(
        listed,
        enumerated = references.len(),
        "Enumerated source playlist items"
    );

    Ok(references)
}

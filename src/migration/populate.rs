use crate::migration::error::MigrationError;
use crate::migration::types::{ItemReference, PopulationOutcome};
use crate::ports::youtube::YoutubeClient;
use crate::youtube_rs::auth::AccessToken;

/// Reason recorded when upstream rejected an item without a message.
pub const UNKNOWN_ERROR_REASON: &str = "Unknown error";

/// Add `items` to `playlist_id` one at a time, in input order.
///
/// A rejected item is recorded in `failed` and the batch moves on; the only
/// error returned is for a batch that cannot start at all. One request is
/// outstanding at a time, so `failed` keeps the input's relative order.
#[tracing::instrument(skip(client, token, items), fields(total = items.len()))]
pub async fn populate_playlist<C>(
    client: &C,
    token: &AccessToken,
    playlist_id: &str,
    items: &[ItemReference],
) -> Result<PopulationOutcome, MigrationError>
where
    C: YoutubeClient + ?Sized,
{
    if playlist_id.trim().is_empty() {
        return Err(MigrationError::InvalidDestination);
    }

    let mut outcome = PopulationOutcome::default();
    for item in items {
        match client.add_playlist_item(token, playlist_id, item).await {
            Ok(()) => outcome.record_added(),
            Err(error) => {
                tracing::warn!(video_id = %item, error = %error, "Failed to add video to playlist");
                let reason = error
                    .upstream_message()
                    .unwrap_or(UNKNOWN_ERROR_REASON)
                    .to_string();
                outcome.record_failed(item.clone(), reason);
            }
        }
    }

    debug_assert_eq!(outcome.processed(), items.len());
    tracing::info!(
        added = outcome.added,
        failed = outcome.failed.len(),
        "Finished populating playlist"
    );

    Ok(outcome)
}

//! Copies one YouTube playlist into a new YouTube Music playlist.
//!
//! A run is strictly sequential: enumerate the source, create the
//! destination, add every item, summarize. Enumerate and create failures are
//! fatal; once population starts the run always finishes with a summary.

use tokio::sync::watch;

use crate::ports::youtube::YoutubeClient;

pub mod create_destination;
pub mod enumerate;
pub mod error;
pub mod populate;
pub mod summary;
pub mod types;

use create_destination::create_destination;
use enumerate::enumerate_source_items;
use error::MigrationError;
use populate::populate_playlist;
use summary::summarize;
use types::{MigrationRequest, MigrationSummary, PipelineState};

pub struct MigrationPipeline<C: YoutubeClient> {
    client: C,
}

impl<C: YoutubeClient> MigrationPipeline<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub async fn run(&self, request: &MigrationRequest) -> Result<MigrationSummary, MigrationError> {
        let (progress, _) = watch::channel(PipelineState::Idle);
        self.run_with_progress(request, &progress).await
    }

    /// Run the pipeline, publishing each state transition on `progress`.
    ///
    /// The last value sent is always `Done` or `Failed`.
    #[tracing::instrument(skip_all, fields(source_playlist_id = %request.source_playlist_id))]
    pub async fn run_with_progress(
        &self,
        request: &MigrationRequest,
        progress: &watch::Sender<PipelineState>,
    ) -> Result<MigrationSummary, MigrationError> {
        match self.execute(request, progress).await {
            Ok(summary) => {
                tracing::info!(
                    playlist_id = %summary.playlist.id,
                    added = summary.added,
                    failed = summary.failed.len(),
                    "Playlist conversion finished"
                );
                progress.send_replace(PipelineState::Done {
                    summary: summary.clone(),
                });
                Ok(summary)
            }
            Err(error) => {
                tracing::error!(error = %error, "Playlist conversion failed");
                progress.send_replace(PipelineState::Failed {
                    reason: error.to_string(),
                });
                Err(error)
            }
        }
    }

    async fn execute(
        &self,
        request: &MigrationRequest,
        progress: &watch::Sender<PipelineState>,
    ) -> Result<MigrationSummary, MigrationError> {
        let token = &request.access_token;

        progress.send_replace(PipelineState::Enumerating);
        let items =
            enumerate_source_items(&self.client, token, &request.source_playlist_id).await?;
        if items.is_empty() {
            return Err(MigrationError::EmptySource {
                playlist_id: request.source_playlist_id.clone(),
            });
        }

        progress.send_replace(PipelineState::Creating);
        let playlist = create_destination(&self.client, token, &request.descriptor).await?;

        progress.send_replace(PipelineState::Populating {
            playlist: playlist.clone(),
            total: items.len(),
        });
        let outcome = populate_playlist(&self.client, token, &playlist.id, &items).await?;

        Ok(summarize(playlist, outcome))
    }
}

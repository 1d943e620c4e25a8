use crate::migration::types::{CreatedPlaylist, MigrationSummary, PopulationOutcome};

fn videos(count: usize) -> String {
    if count == 1 {
        "1 video".to_string()
    } else {
        format!("{count} videos")
    }
}

/// Turn a finished batch into the message shown to the user.
///
/// Some items failing is still a success; the failures only add a warning.
pub fn summarize(playlist: CreatedPlaylist, outcome: PopulationOutcome) -> MigrationSummary {
    let message = format!(
        "Successfully created playlist with {}!",
        videos(outcome.added)
    );
    let warning = (!outcome.failed.is_empty()).then(|| {
        format!(
            "{} could not be added (may be deleted or private)",
            videos(outcome.failed.len())
        )
    });

    MigrationSummary {
        playlist,
        added: outcome.added,
        failed: outcome.failed,
        message,
        warning,
    }
}

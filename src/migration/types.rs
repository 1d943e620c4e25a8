use std::fmt;

use serde::{Deserialize, Serialize};

use crate::youtube_rs::auth::AccessToken;

/// Opaque id of one playable item (a video id) in the source playlist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemReference(String);

impl ItemReference {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ItemReference {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ItemReference {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ItemReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name and description for the playlist about to be created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl PlaylistDescriptor {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description: description.unwrap_or_default(),
        }
    }

    /// Copy with surrounding whitespace removed from both fields.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}

/// The destination playlist. Serialized as `{"playlistId", "url"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedPlaylist {
    #[serde(rename = "playlistId")]
    pub id: String,
    pub url: String,
}

/// One item that could not be added, with the reason upstream gave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    #[serde(rename = "videoId")]
    pub item_reference: ItemReference,
    #[serde(rename = "error")]
    pub error_reason: String,
}

/// Per-item results of one populate batch.
///
/// `added + failed.len()` always equals the number of items processed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PopulationOutcome {
    pub added: usize,
    pub failed: Vec<ItemFailure>,
}

impl PopulationOutcome {
    pub(super) fn record_added(&mut self) {
        self.added += 1;
    }

    pub(super) fn record_failed(&mut self, item_reference: ItemReference, error_reason: String) {
        self.failed.push(ItemFailure {
            item_reference,
            error_reason,
        });
    }

    pub fn processed(&self) -> usize {
        self.added + self.failed.len()
    }
}

/// Everything one conversion needs.
#[derive(Debug, Clone)]
pub struct MigrationRequest {
    pub access_token: AccessToken,
    pub source_playlist_id: String,
    pub descriptor: PlaylistDescriptor,
}

/// User facing result of a finished conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationSummary {
    #[serde(flatten)]
    pub playlist: CreatedPlaylist,
    pub added: usize,
    pub failed: Vec<ItemFailure>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Progress of one pipeline run, as published to observers.
///
/// `Failed` is only entered from `Enumerating` or `Creating`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum PipelineState {
    Idle,
    Enumerating,
    Creating,
    Populating {
        playlist: CreatedPlaylist,
        total: usize,
    },
    Done {
        summary: MigrationSummary,
    },
    Failed {
        reason: String,
    },
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Failed { .. })
    }
}

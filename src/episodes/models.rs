//! Data models for the episode library

use serde::{Deserialize, Serialize};

/// A single playable episode.
///
/// Immutable once placed in the play queue; the player only ever replaces
/// the queue wholesale.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Episode {
    pub id: String,
    pub title: String,
    /// Credited hosts and guests, as a single display string
    pub members: String,
    /// Artwork URL
    pub thumbnail: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Duration in whole seconds
    pub duration: u64,
    /// Playable media URL
    pub url: String,
}

/// Top-level shape of a library file
#[derive(Deserialize, Serialize, Debug)]
pub struct LibraryFile {
    pub episodes: Vec<Episode>,
}

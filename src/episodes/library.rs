//! Loading the episode library from disk

use std::error::Error;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use super::models::{Episode, LibraryFile};

const LOG_TARGET: &str = "podcli::episodes";

/// Error types for library operations
#[derive(Debug)]
pub enum LibraryError {
    IoError(io::Error),
    ParseError(String),
    EmptyLibrary,
}

impl From<io::Error> for LibraryError {
    fn from(err: io::Error) -> Self {
        LibraryError::IoError(err)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::ParseError(err.to_string())
    }
}

impl std::fmt::Display for LibraryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LibraryError::IoError(e) => write!(f, "I/O error: {}", e),
            LibraryError::ParseError(s) => write!(f, "Parse error: {}", s),
            LibraryError::EmptyLibrary => write!(f, "Library contains no episodes"),
        }
    }
}

impl Error for LibraryError {}

/// Episode library backed by a JSON file on disk.
///
/// The library is the content source; nothing here validates that media
/// URLs are reachable or that durations are accurate.
pub struct Library {
    episodes: Vec<Episode>,
}

impl Library {
    /// Load the library from a JSON file.
    pub fn load(path: &Path) -> Result<Self, LibraryError> {
        info!(target: LOG_TARGET, "Loading episode library from {}", path.display());

        let content = fs::read_to_string(path)?;
        let file: LibraryFile = serde_json::from_str(&content)?;

        if file.episodes.is_empty() {
            return Err(LibraryError::EmptyLibrary);
        }

        debug!(target: LOG_TARGET, "Loaded {} episodes.", file.episodes.len());
        Ok(Library {
            episodes: file.episodes,
        })
    }

    /// All episodes, in library order.
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }
}

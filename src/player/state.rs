use tokio::sync::oneshot;

use crate::episodes::Episode;

/// Commands that can be sent to the Player task.
#[derive(Debug)]
pub enum PlayerCommand {
    /// Replace the queue with a single episode and start playing it.
    PlaySingle(Episode),
    /// Replace the queue with a list and start playing at `start_index`.
    ///
    /// The index is not validated here; an out-of-range value leaves the
    /// player with no current episode.
    PlayList {
        episodes: Vec<Episode>,
        start_index: usize,
    },
    /// Flip between playing and paused.
    TogglePlay,
    /// Force the playing flag to match the media element's native state.
    SetPlaying(bool),
    ToggleLoop,
    ToggleShuffle,
    Next,
    Previous,
    /// Move the playback position of the current episode, in seconds.
    Seek(u64),
    /// Reset the queue to empty.
    Clear,
    /// The media element reported the current episode played to the end.
    TrackFinished,
    GetFullState(oneshot::Sender<PlayerStateSnapshot>),
    Shutdown,
}

/// Point-in-time view of the player, with the derived transport flags.
#[derive(Debug, Clone)]
pub struct PlayerStateSnapshot {
    pub queue: Vec<Episode>,
    pub current_index: usize,
    pub is_playing: bool,
    pub is_looping: bool,
    pub is_shuffling: bool,
    pub has_next: bool,
    pub has_previous: bool,
    /// Playback position of the media element, in whole seconds.
    pub position: u64,
}

impl PlayerStateSnapshot {
    /// The episode the queue index points at, if the index is valid.
    pub fn current_episode(&self) -> Option<&Episode> {
        self.queue.get(self.current_index)
    }
}

/// Updates broadcast by the Player task about its state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerStateUpdate {
    Playing {
        episode: Episode,
        queue_index: usize,
    },
    Paused {
        episode: Episode,
        queue_index: usize,
    },
    QueueChanged {
        queue_len: usize,
        current_index: usize,
    },
    LoopChanged(bool),
    ShuffleChanged(bool),
    Stopped,
    Error(String),
}

//! The player task: queue, transport flags, and the media element seam.

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, instrument, trace};

use crate::episodes::Episode;
use crate::media::SharedMediaElement;

mod command_handler;
mod playback_starter;
mod run_loop;
mod state;

// Re-export key types for convenience
pub use state::{PlayerCommand, PlayerStateSnapshot, PlayerStateUpdate};

const PLAYER_LOG_TARGET: &str = "podcli::player";

/// Manages the play queue, playback flags, and interaction with the media
/// element.
///
/// There is exactly one writer: the task running [`Player::run`]. Everyone
/// else talks to it through the command channel and observes it through
/// the state-update broadcast, so transitions apply in the order their
/// commands arrive.
pub struct Player {
    // --- State ---
    queue: Vec<Episode>,
    current_index: usize,
    is_playing: bool,
    is_looping: bool,
    is_shuffling: bool,

    // --- Communication ---
    command_rx: mpsc::Receiver<PlayerCommand>,
    state_update_tx: broadcast::Sender<PlayerStateUpdate>,

    // --- Media surface ---
    // Injected rather than constructed here so tests can substitute a
    // scripted element.
    media: SharedMediaElement,
}

impl Player {
    /// Creates a new Player instance and the command channel sender.
    /// The Player itself should be run in a separate task using `Player::run`.
    pub fn new(
        media: SharedMediaElement,
        state_update_capacity: usize,
        command_buffer_size: usize,
    ) -> (Self, mpsc::Sender<PlayerCommand>) {
        let (command_tx, command_rx) = mpsc::channel(command_buffer_size);
        let (state_update_tx, _) = broadcast::channel(state_update_capacity);

        let player = Player {
            queue: Vec::new(),
            current_index: 0,
            is_playing: false,
            is_looping: false,
            is_shuffling: false,
            command_rx,
            state_update_tx,
            media,
        };

        (player, command_tx)
    }

    /// Subscribes to player state updates.
    pub fn subscribe_state_updates(&self) -> broadcast::Receiver<PlayerStateUpdate> {
        self.state_update_tx.subscribe()
    }

    /// True when advancing is possible: shuffling can always pick another
    /// index, otherwise there must be a later queue entry.
    fn has_next(&self) -> bool {
        self.is_shuffling || self.current_index + 1 < self.queue.len()
    }

    fn has_previous(&self) -> bool {
        self.current_index > 0
    }

    /// The episode the queue index points at. An out-of-range index (a
    /// caller passed a bad start index) reads as no current episode.
    fn current_episode(&self) -> Option<&Episode> {
        self.queue.get(self.current_index)
    }

    /// Sends a state update via the broadcast channel, logging when nobody
    /// is listening.
    fn broadcast_update(&self, update: PlayerStateUpdate) {
        trace!(target: PLAYER_LOG_TARGET, "Broadcasting state update: {:?}", update);
        if self.state_update_tx.send(update.clone()).is_err() {
            debug!(target: PLAYER_LOG_TARGET, "No active listeners for state update: {:?}", update);
        }
    }

    /// Constructs the full current state object.
    async fn full_snapshot(&self) -> PlayerStateSnapshot {
        PlayerStateSnapshot {
            queue: self.queue.clone(),
            current_index: self.current_index,
            is_playing: self.is_playing,
            is_looping: self.is_looping,
            is_shuffling: self.is_shuffling,
            has_next: self.has_next(),
            has_previous: self.has_previous(),
            position: self.media.lock().await.position().await,
        }
    }

    /// Runs the player's command processing loop. This should be spawned
    /// as a Tokio task.
    #[instrument(skip(self))]
    pub async fn run(&mut self) {
        run_loop::run_player_loop(self).await;
    }
}

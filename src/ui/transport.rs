//! The player transport: renders the current episode and its seek bar,
//! and translates key presses and native media events into player
//! commands.

use std::error::Error;
use std::io;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::format::format_timestamp;
use crate::episodes::Episode;
use crate::media::MediaEvent;
use crate::player::{PlayerCommand, PlayerStateSnapshot, PlayerStateUpdate};

const LOG_TARGET: &str = "podcli::ui::transport";

/// Forwards native media events into player commands.
///
/// The bridge stays alive for the whole session, so end-of-episode
/// advancement keeps working while the interactive view is closed.
pub fn spawn_media_bridge(
    mut media_events: broadcast::Receiver<MediaEvent>,
    command_tx: mpsc::Sender<PlayerCommand>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!(target: LOG_TARGET, "Media bridge started.");
        loop {
            match media_events.recv().await {
                Ok(MediaEvent::Play) => {
                    send_command(&command_tx, PlayerCommand::SetPlaying(true)).await
                }
                Ok(MediaEvent::Pause) => {
                    send_command(&command_tx, PlayerCommand::SetPlaying(false)).await
                }
                Ok(MediaEvent::Ended) => {
                    send_command(&command_tx, PlayerCommand::TrackFinished).await
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(target: LOG_TARGET, "Media bridge lagged, skipped {} events.", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        debug!(target: LOG_TARGET, "Media bridge finished.");
    })
}

async fn send_command(command_tx: &mpsc::Sender<PlayerCommand>, command: PlayerCommand) {
    if let Err(e) = command_tx.send(command).await {
        warn!(target: LOG_TARGET, "Failed to send player command: {}", e);
    }
}

/// Local mirror of the pieces of player state the view renders from.
#[derive(Debug, Default)]
struct ViewState {
    episode: Option<Episode>,
    queue_len: usize,
    current_index: usize,
    is_playing: bool,
    is_looping: bool,
    is_shuffling: bool,
    progress: u64,
}

impl ViewState {
    fn has_next(&self) -> bool {
        self.is_shuffling || self.current_index + 1 < self.queue_len
    }

    fn has_previous(&self) -> bool {
        self.current_index > 0
    }

    fn apply_snapshot(&mut self, snapshot: PlayerStateSnapshot) {
        self.episode = snapshot.current_episode().cloned();
        self.queue_len = snapshot.queue.len();
        self.current_index = snapshot.current_index;
        self.is_playing = snapshot.is_playing;
        self.is_looping = snapshot.is_looping;
        self.is_shuffling = snapshot.is_shuffling;
        self.progress = snapshot.position;
    }
}

/// One delivered input for the view loop.
enum Incoming {
    Key(Option<io::Result<Event>>),
    State(Result<PlayerStateUpdate, broadcast::error::RecvError>),
    Media(Result<MediaEvent, broadcast::error::RecvError>),
}

/// Restores the terminal even when the view exits through `?`.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!(target: LOG_TARGET, "Failed to disable terminal raw mode: {}", e);
        }
    }
}

/// Interactive transport view.
///
/// Keys: space = play/pause, `n` = next, `b` = previous, `s` = shuffle,
/// `l` = loop, left/right = seek, `q`/Esc = back to the menu. A key whose
/// control would be disabled is ignored.
pub struct Transport {
    command_tx: mpsc::Sender<PlayerCommand>,
    state_rx: broadcast::Receiver<PlayerStateUpdate>,
    media_events: broadcast::Receiver<MediaEvent>,
    seek_step: u64,
    view: ViewState,
    bar: ProgressBar,
}

impl Transport {
    pub fn new(
        command_tx: mpsc::Sender<PlayerCommand>,
        state_rx: broadcast::Receiver<PlayerStateUpdate>,
        media_events: broadcast::Receiver<MediaEvent>,
        seek_step: u64,
    ) -> Self {
        Transport {
            command_tx,
            state_rx,
            media_events,
            seek_step,
            view: ViewState::default(),
            bar: ProgressBar::hidden(),
        }
    }

    /// Runs the interactive transport until the user leaves it.
    pub async fn run(&mut self) -> Result<(), Box<dyn Error>> {
        self.refresh_from_player().await?;

        println!("\nNow playing");
        println!(
            "[space] play/pause  [n] next  [b] previous  [s] shuffle  [l] loop  [←/→] seek  [q] back"
        );
        self.render_current_episode();

        let _raw_mode = RawModeGuard::enable()?;
        let mut keys = EventStream::new();

        loop {
            let incoming = tokio::select! {
                maybe_event = keys.next() => Incoming::Key(maybe_event),
                update = self.state_rx.recv() => Incoming::State(update),
                event = self.media_events.recv() => Incoming::Media(event),
            };

            match incoming {
                Incoming::Key(Some(Ok(Event::Key(key)))) => {
                    if self.handle_key(key).await {
                        break;
                    }
                }
                Incoming::Key(Some(Ok(_))) => {}
                Incoming::Key(Some(Err(e))) => {
                    warn!(target: LOG_TARGET, "Failed to read terminal event: {}", e);
                }
                Incoming::Key(None) => break,
                Incoming::State(Ok(update)) => self.handle_update(update),
                Incoming::Media(Ok(event)) => self.handle_media_event(event),
                Incoming::State(Err(broadcast::error::RecvError::Lagged(_)))
                | Incoming::Media(Err(broadcast::error::RecvError::Lagged(_))) => {
                    // Fell behind; resync from the source of truth.
                    self.refresh_from_player().await?;
                    self.render_current_episode();
                }
                Incoming::State(Err(broadcast::error::RecvError::Closed))
                | Incoming::Media(Err(broadcast::error::RecvError::Closed)) => break,
            }
        }

        self.bar.finish_and_clear();
        Ok(())
    }

    /// Seeds the local mirror from a full player snapshot.
    async fn refresh_from_player(&mut self) -> Result<(), Box<dyn Error>> {
        let (tx, rx) = oneshot::channel();
        self.command_tx.send(PlayerCommand::GetFullState(tx)).await?;
        let snapshot = rx.await?;
        self.view.apply_snapshot(snapshot);
        Ok(())
    }

    /// Handles one key press. Returns true when the view should close.
    async fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char(' ') => {
                if self.view.episode.is_some() {
                    send_command(&self.command_tx, PlayerCommand::TogglePlay).await;
                }
            }
            KeyCode::Char('n') => {
                if self.view.episode.is_some() && self.view.has_next() {
                    send_command(&self.command_tx, PlayerCommand::Next).await;
                }
            }
            KeyCode::Char('b') => {
                if self.view.episode.is_some() && self.view.has_previous() {
                    send_command(&self.command_tx, PlayerCommand::Previous).await;
                }
            }
            KeyCode::Char('s') => {
                if self.view.episode.is_some() && self.view.queue_len > 1 {
                    send_command(&self.command_tx, PlayerCommand::ToggleShuffle).await;
                }
            }
            KeyCode::Char('l') => {
                if self.view.episode.is_some() {
                    send_command(&self.command_tx, PlayerCommand::ToggleLoop).await;
                }
            }
            KeyCode::Right => {
                if let Some(duration) = self.view.episode.as_ref().map(|e| e.duration) {
                    let target = (self.view.progress + self.seek_step).min(duration);
                    self.apply_seek(target).await;
                }
            }
            KeyCode::Left => {
                if self.view.episode.is_some() {
                    let target = self.view.progress.saturating_sub(self.seek_step);
                    self.apply_seek(target).await;
                }
            }
            _ => {}
        }

        false
    }

    /// Seeks and moves the displayed progress immediately instead of
    /// waiting for the element to confirm.
    async fn apply_seek(&mut self, target: u64) {
        send_command(&self.command_tx, PlayerCommand::Seek(target)).await;
        self.view.progress = target;
        self.render_transport_line();
    }

    fn handle_update(&mut self, update: PlayerStateUpdate) {
        match update {
            PlayerStateUpdate::Playing {
                episode,
                queue_index,
            } => {
                let changed = self.view.episode.as_ref() != Some(&episode);
                self.view.current_index = queue_index;
                self.view.is_playing = true;
                self.view.episode = Some(episode);
                if changed {
                    self.render_current_episode();
                } else {
                    self.render_transport_line();
                }
            }
            PlayerStateUpdate::Paused {
                episode,
                queue_index,
            } => {
                self.view.current_index = queue_index;
                self.view.is_playing = false;
                self.view.episode = Some(episode);
                self.render_transport_line();
            }
            PlayerStateUpdate::QueueChanged {
                queue_len,
                current_index,
            } => {
                self.view.queue_len = queue_len;
                self.view.current_index = current_index;
                if queue_len == 0 {
                    self.view.episode = None;
                    self.render_current_episode();
                }
            }
            PlayerStateUpdate::LoopChanged(looping) => {
                self.view.is_looping = looping;
                self.render_transport_line();
            }
            PlayerStateUpdate::ShuffleChanged(shuffling) => {
                self.view.is_shuffling = shuffling;
                self.render_transport_line();
            }
            PlayerStateUpdate::Stopped => {
                self.view.is_playing = false;
                self.view.episode = None;
                self.render_current_episode();
            }
            PlayerStateUpdate::Error(message) => {
                self.bar.println(format!("Error: {}", message));
            }
        }
    }

    fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::LoadedMetadata { duration } => {
                // New source: progress tracking restarts from zero.
                self.view.progress = 0;
                self.bar.set_length(duration.max(1));
                self.render_transport_line();
            }
            MediaEvent::TimeUpdate { position } => {
                self.view.progress = position;
                self.render_transport_line();
            }
            // Play/Pause/Ended reach the player through the media bridge
            // and come back as state updates.
            _ => {}
        }
    }

    /// Redraws the episode block and swaps the seek bar for the current
    /// episode (or the empty-state placeholder).
    fn render_current_episode(&mut self) {
        self.bar.finish_and_clear();
        match &self.view.episode {
            Some(episode) => {
                self.bar = make_seek_bar(episode.duration);
                self.bar.println(format!("♪ {}", episode.title));
                self.bar.println(format!("  {}", episode.members));
                self.bar.println(format!("  artwork: {}", episode.thumbnail));
                self.render_transport_line();
            }
            None => {
                self.bar = ProgressBar::hidden();
                println!("Pick an episode to listen to.");
            }
        }
    }

    /// Updates the seek bar position and the status text.
    fn render_transport_line(&self) {
        if self.view.episode.is_none() {
            return;
        }
        self.bar.set_position(self.view.progress);
        self.bar.set_message(self.status_line());
    }

    fn status_line(&self) -> String {
        let state = if self.view.is_playing {
            "playing"
        } else {
            "paused "
        };
        let mut line = format!("{} {}", state, format_timestamp(self.view.progress));
        if self.view.is_shuffling {
            line.push_str(" [shuffle]");
        }
        if self.view.is_looping {
            line.push_str(" [loop]");
        }
        line
    }
}

fn make_seek_bar(duration: u64) -> ProgressBar {
    let bar = ProgressBar::new(duration.max(1));
    bar.set_style(
        ProgressStyle::with_template("{msg} [{wide_bar}] {prefix}")
            .expect("static progress template"),
    );
    bar.set_prefix(format_timestamp(duration));
    bar
}

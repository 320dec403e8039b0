use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex as TokioMutex};

use super::error::MediaError;

/// Notifications emitted by a media element about its native state.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Native playback started.
    Play,
    /// Native playback paused.
    Pause,
    /// A new source finished loading; the position is back at zero.
    LoadedMetadata { duration: u64 },
    /// Elapsed playback time crossed a whole-second boundary.
    TimeUpdate { position: u64 },
    /// The current source played to the end. Not emitted while looping.
    Ended,
}

/// Shared handle to a media element implementation.
pub type SharedMediaElement = Arc<TokioMutex<dyn MediaElement>>;

/// Trait defining the controls of a media playback surface.
///
/// The element is a black box: it accepts a source and transport commands,
/// tracks its own playback position, and reports native state changes
/// through a broadcast event stream. Consumers must not assume a command
/// succeeded; the event stream is the source of truth for native state.
#[async_trait]
pub trait MediaElement: Send + Sync {
    /// Replaces the current source. Resets the position to zero and emits
    /// `LoadedMetadata` once the new source is ready.
    async fn load(&mut self, url: &str, duration: u64) -> Result<(), MediaError>;

    /// Drops the current source and stops position tracking.
    async fn unload(&mut self) -> Result<(), MediaError>;

    /// Starts or resumes playback of the loaded source.
    async fn play(&mut self) -> Result<(), MediaError>;

    /// Pauses playback, keeping the position.
    async fn pause(&mut self) -> Result<(), MediaError>;

    /// Moves the playback position, clamped to the source duration.
    async fn seek(&mut self, position: u64) -> Result<(), MediaError>;

    /// Current playback position in whole seconds.
    async fn position(&self) -> u64;

    /// Sets whether the element restarts a finished source at zero instead
    /// of reporting `Ended`.
    async fn set_looping(&mut self, looping: bool);

    /// Subscribes to native media events.
    fn subscribe_events(&self) -> broadcast::Receiver<MediaEvent>;

    /// Stops the element's internal tasks. Must be called before drop for
    /// a graceful exit.
    async fn shutdown(&mut self) -> Result<(), MediaError>;
}

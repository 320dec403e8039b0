//! A wall-clock driven media element.
//!
//! The position advances on a timer while the element is playing; no
//! decoding or audio output happens here. Events are emitted the way a
//! browser audio element reports them: `LoadedMetadata` after a source
//! swap, `TimeUpdate` on whole-second boundaries, `Ended` at the end of a
//! non-looping source.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex as TokioMutex};
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, info, trace, warn};

use super::element::{MediaElement, MediaEvent};
use super::error::MediaError;

const LOG_TARGET: &str = "podcli::media::clock";

/// Tick cadence of the internal position clock.
pub const CLOCK_TICK: StdDuration = StdDuration::from_millis(250);

#[derive(Debug, Default)]
struct ClockState {
    url: Option<String>,
    duration_ms: u64,
    position_ms: u64,
    playing: bool,
    looping: bool,
}

/// Media element whose position is driven by a timer task.
pub struct ClockedElement {
    state: Arc<TokioMutex<ClockState>>,
    events_tx: broadcast::Sender<MediaEvent>,
    clock_handle: Option<JoinHandle<()>>,
    shutdown_tx: broadcast::Sender<()>,
}

impl ClockedElement {
    /// Creates the element and starts its clock task.
    pub fn new(event_capacity: usize) -> Self {
        let state = Arc::new(TokioMutex::new(ClockState::default()));
        let (events_tx, _) = broadcast::channel(event_capacity);
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let clock_handle = spawn_clock_task(state.clone(), events_tx.clone(), shutdown_rx);

        ClockedElement {
            state,
            events_tx,
            clock_handle: Some(clock_handle),
            shutdown_tx,
        }
    }

    /// Sends a media event, logging when nobody is listening.
    fn emit(&self, event: MediaEvent) {
        if self.events_tx.send(event.clone()).is_err() {
            trace!(target: LOG_TARGET, "No listeners for media event: {:?}", event);
        }
    }
}

/// Spawns the position clock. The task advances the position while the
/// element is playing and handles end-of-source, honoring the loop flag.
fn spawn_clock_task(
    state: Arc<TokioMutex<ClockState>>,
    events_tx: broadcast::Sender<MediaEvent>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!(target: LOG_TARGET, "Media clock task started.");
        let mut ticker = interval(CLOCK_TICK);

        loop {
            tokio::select! {
                biased;

                _ = shutdown_rx.recv() => {
                    debug!(target: LOG_TARGET, "Media clock task received shutdown signal.");
                    break;
                }

                _ = ticker.tick() => {
                    let mut state = state.lock().await;
                    if !state.playing || state.url.is_none() {
                        continue;
                    }

                    let previous_second = state.position_ms / 1000;
                    state.position_ms += CLOCK_TICK.as_millis() as u64;

                    if state.position_ms >= state.duration_ms {
                        if state.looping {
                            trace!(target: LOG_TARGET, "Source finished, restarting (loop enabled).");
                            state.position_ms = 0;
                            let _ = events_tx.send(MediaEvent::TimeUpdate { position: 0 });
                        } else {
                            state.position_ms = state.duration_ms;
                            state.playing = false;
                            let final_second = state.duration_ms / 1000;
                            let _ = events_tx.send(MediaEvent::TimeUpdate { position: final_second });
                            let _ = events_tx.send(MediaEvent::Ended);
                        }
                        continue;
                    }

                    let current_second = state.position_ms / 1000;
                    if current_second != previous_second {
                        let _ = events_tx.send(MediaEvent::TimeUpdate { position: current_second });
                    }
                }
            }
        }

        debug!(target: LOG_TARGET, "Media clock task finished.");
    })
}

#[async_trait]
impl MediaElement for ClockedElement {
    async fn load(&mut self, url: &str, duration: u64) -> Result<(), MediaError> {
        info!(target: LOG_TARGET, "Loading media source: {}", url);
        let mut state = self.state.lock().await;
        state.url = Some(url.to_string());
        state.duration_ms = duration.saturating_mul(1000);
        state.position_ms = 0;
        state.playing = false;
        drop(state);

        self.emit(MediaEvent::LoadedMetadata { duration });
        Ok(())
    }

    async fn unload(&mut self) -> Result<(), MediaError> {
        debug!(target: LOG_TARGET, "Unloading media source.");
        let mut state = self.state.lock().await;
        let was_playing = state.playing;
        state.url = None;
        state.duration_ms = 0;
        state.position_ms = 0;
        state.playing = false;
        drop(state);

        if was_playing {
            self.emit(MediaEvent::Pause);
        }
        Ok(())
    }

    async fn play(&mut self) -> Result<(), MediaError> {
        let mut state = self.state.lock().await;
        if state.url.is_none() {
            warn!(target: LOG_TARGET, "Play requested with no source loaded.");
            return Err(MediaError::NoSource);
        }
        if !state.playing {
            state.playing = true;
            drop(state);
            self.emit(MediaEvent::Play);
        }
        Ok(())
    }

    async fn pause(&mut self) -> Result<(), MediaError> {
        let mut state = self.state.lock().await;
        if state.playing {
            state.playing = false;
            drop(state);
            self.emit(MediaEvent::Pause);
        }
        Ok(())
    }

    async fn seek(&mut self, position: u64) -> Result<(), MediaError> {
        let mut state = self.state.lock().await;
        if state.url.is_none() {
            return Err(MediaError::NoSource);
        }
        let clamped_ms = position.saturating_mul(1000).min(state.duration_ms);
        state.position_ms = clamped_ms;
        drop(state);

        self.emit(MediaEvent::TimeUpdate {
            position: clamped_ms / 1000,
        });
        Ok(())
    }

    async fn position(&self) -> u64 {
        self.state.lock().await.position_ms / 1000
    }

    async fn set_looping(&mut self, looping: bool) {
        self.state.lock().await.looping = looping;
    }

    fn subscribe_events(&self) -> broadcast::Receiver<MediaEvent> {
        self.events_tx.subscribe()
    }

    async fn shutdown(&mut self) -> Result<(), MediaError> {
        info!(target: LOG_TARGET, "Shutting down media clock.");
        let _ = self.shutdown_tx.send(());
        if let Some(handle) = self.clock_handle.take() {
            handle.await?;
        }
        Ok(())
    }
}

impl Drop for ClockedElement {
    fn drop(&mut self) {
        // The clock task holds no resources worth draining; abort is safe
        // when shutdown() was skipped.
        if let Some(handle) = self.clock_handle.take() {
            handle.abort();
        }
    }
}

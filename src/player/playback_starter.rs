//! Starting playback of the episode at the current queue index.

use tracing::{error, info, instrument};

use super::{Player, PlayerStateUpdate, PLAYER_LOG_TARGET};
use crate::episodes::Episode;

/// Validates the queue index and returns the episode to play.
#[instrument(skip(player), fields(queue_index = player.current_index))]
async fn prepare_playback(player: &mut Player) -> Result<Episode, ()> {
    match player.current_episode().cloned() {
        Some(episode) => {
            info!(
                target: PLAYER_LOG_TARGET,
                "Preparing to play episode: {} ({})", episode.title, episode.id
            );
            Ok(episode)
        }
        None => {
            error!(
                target: PLAYER_LOG_TARGET,
                "Cannot play episode at index {}: index out of bounds.", player.current_index
            );
            player.broadcast_update(PlayerStateUpdate::Error("Invalid queue index".to_string()));
            player.is_playing = false;
            Err(())
        }
    }
}

/// Loads the episode at the current queue index into the media element and
/// starts it. An out-of-range index surfaces as a stopped player instead
/// of a current episode.
#[instrument(skip(player), fields(queue_index = player.current_index))]
pub async fn play_current_episode(player: &mut Player) {
    let episode = match prepare_playback(player).await {
        Ok(episode) => episode,
        Err(()) => {
            player.broadcast_update(PlayerStateUpdate::Stopped);
            info!(target: PLAYER_LOG_TARGET, "Playback preparation failed, ensuring stopped state.");
            return;
        }
    };

    let start_result = {
        let mut media = player.media.lock().await;
        match media.load(&episode.url, episode.duration).await {
            Ok(()) => {
                media.set_looping(player.is_looping).await;
                media.play().await
            }
            Err(e) => Err(e),
        }
    };

    if let Err(e) = start_result {
        error!(
            target: PLAYER_LOG_TARGET,
            "Failed to start playback for {}: {}", episode.id, e
        );
        player.is_playing = false;
        player.broadcast_update(PlayerStateUpdate::Error(format!(
            "Failed to start playback: {}",
            e
        )));
        player.broadcast_update(PlayerStateUpdate::Stopped);
        return;
    }

    player.is_playing = true;
    player.broadcast_update(PlayerStateUpdate::Playing {
        episode,
        queue_index: player.current_index,
    });
}

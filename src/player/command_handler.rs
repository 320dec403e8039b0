use rand::Rng;
use tracing::{info, instrument, warn};

use super::{playback_starter, Player, PlayerStateUpdate, PLAYER_LOG_TARGET};
use crate::episodes::Episode;

#[instrument(skip(player, episode), fields(title = %episode.title))]
pub async fn handle_play_single(player: &mut Player, episode: Episode) {
    info!(target: PLAYER_LOG_TARGET, "Handling PlaySingle command: {}", episode.title);

    player.queue = vec![episode];
    player.current_index = 0;
    player.broadcast_update(PlayerStateUpdate::QueueChanged {
        queue_len: 1,
        current_index: 0,
    });

    playback_starter::play_current_episode(player).await;
}

#[instrument(skip(player, episodes), fields(count = episodes.len(), start_index = start_index))]
pub async fn handle_play_list(player: &mut Player, episodes: Vec<Episode>, start_index: usize) {
    info!(
        target: PLAYER_LOG_TARGET,
        "Handling PlayList command with {} episodes, starting at index {}.",
        episodes.len(),
        start_index
    );

    // The start index is taken as given; play_current_episode surfaces an
    // out-of-range value as "no current episode".
    player.queue = episodes;
    player.current_index = start_index;
    player.broadcast_update(PlayerStateUpdate::QueueChanged {
        queue_len: player.queue.len(),
        current_index: player.current_index,
    });

    playback_starter::play_current_episode(player).await;
}

#[instrument(skip(player))]
pub async fn handle_toggle_play(player: &mut Player) {
    info!(target: PLAYER_LOG_TARGET, "Handling TogglePlay command.");
    if player.current_episode().is_none() {
        warn!(target: PLAYER_LOG_TARGET, "TogglePlay: No current episode, nothing to toggle.");
        return;
    }
    set_playing(player, !player.is_playing).await;
}

#[instrument(skip(player))]
pub async fn handle_set_playing(player: &mut Player, playing: bool) {
    // Keeps the flag consistent with what the element actually did rather
    // than assuming a toggle succeeded.
    set_playing(player, playing).await;
}

/// Applies a playing-state change and mirrors it onto the media element,
/// once per transition. Idempotent, so native-event echoes do not loop.
pub(super) async fn set_playing(player: &mut Player, playing: bool) {
    if player.is_playing == playing {
        return;
    }
    // A native event can trail a queue clear; an empty player stays
    // stopped.
    let episode = match player.current_episode().cloned() {
        Some(episode) => episode,
        None => return,
    };
    player.is_playing = playing;

    let result = {
        let mut media = player.media.lock().await;
        if playing {
            media.play().await
        } else {
            media.pause().await
        }
    };
    if let Err(e) = result {
        warn!(
            target: PLAYER_LOG_TARGET,
            "Media element rejected {} request: {}",
            if playing { "play" } else { "pause" },
            e
        );
    }

    let update = if playing {
        PlayerStateUpdate::Playing {
            episode,
            queue_index: player.current_index,
        }
    } else {
        PlayerStateUpdate::Paused {
            episode,
            queue_index: player.current_index,
        }
    };
    player.broadcast_update(update);
}

#[instrument(skip(player))]
pub async fn handle_toggle_loop(player: &mut Player) {
    player.is_looping = !player.is_looping;
    info!(target: PLAYER_LOG_TARGET, "Loop is now {}.", player.is_looping);

    // The element's native loop attribute restarts a finished episode by
    // itself; no Ended round-trip happens while looping.
    player.media.lock().await.set_looping(player.is_looping).await;
    player.broadcast_update(PlayerStateUpdate::LoopChanged(player.is_looping));
}

#[instrument(skip(player))]
pub async fn handle_toggle_shuffle(player: &mut Player) {
    player.is_shuffling = !player.is_shuffling;
    info!(target: PLAYER_LOG_TARGET, "Shuffle is now {}.", player.is_shuffling);
    player.broadcast_update(PlayerStateUpdate::ShuffleChanged(player.is_shuffling));
}

#[instrument(skip(player))]
pub async fn handle_next(player: &mut Player) {
    info!(target: PLAYER_LOG_TARGET, "Handling Next command.");
    if player.is_shuffling {
        if player.queue.is_empty() {
            warn!(target: PLAYER_LOG_TARGET, "Next: Queue is empty, nothing to shuffle to.");
            return;
        }
        // Uniform over the whole queue; repeating the current episode is
        // allowed.
        player.current_index = rand::thread_rng().gen_range(0..player.queue.len());
    } else if player.has_next() {
        player.current_index += 1;
    } else {
        info!(target: PLAYER_LOG_TARGET, "Next: Already at end of queue.");
        return;
    }

    playback_starter::play_current_episode(player).await;
}

#[instrument(skip(player))]
pub async fn handle_previous(player: &mut Player) {
    info!(target: PLAYER_LOG_TARGET, "Handling Previous command.");
    if !player.has_previous() {
        info!(target: PLAYER_LOG_TARGET, "Previous: Already at start of queue.");
        return;
    }
    player.current_index -= 1;

    playback_starter::play_current_episode(player).await;
}

#[instrument(skip(player))]
pub async fn handle_seek(player: &mut Player, position: u64) {
    if player.current_episode().is_none() {
        warn!(target: PLAYER_LOG_TARGET, "Seek: No current episode.");
        return;
    }
    if let Err(e) = player.media.lock().await.seek(position).await {
        warn!(target: PLAYER_LOG_TARGET, "Seek to {}s failed: {}", position, e);
    }
}

#[instrument(skip(player))]
pub async fn handle_clear(player: &mut Player) {
    info!(target: PLAYER_LOG_TARGET, "Handling Clear command.");
    if let Err(e) = player.media.lock().await.unload().await {
        warn!(target: PLAYER_LOG_TARGET, "Failed to unload media source: {}", e);
    }

    // The playing flag falls with the queue; an empty queue can never be
    // playing.
    player.is_playing = false;
    player.queue.clear();
    player.current_index = 0;

    player.broadcast_update(PlayerStateUpdate::Stopped);
    player.broadcast_update(PlayerStateUpdate::QueueChanged {
        queue_len: 0,
        current_index: 0,
    });
}

#[instrument(skip(player))]
pub async fn handle_track_finished(player: &mut Player) {
    info!(target: PLAYER_LOG_TARGET, "Handling TrackFinished command.");
    if player.has_next() {
        handle_next(player).await;
    } else {
        info!(target: PLAYER_LOG_TARGET, "End of queue reached, clearing player state.");
        handle_clear(player).await;
    }
}

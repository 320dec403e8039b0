//! The player's command processing loop.

use tracing::{error, info, trace};

use super::{command_handler, Player, PlayerCommand, PlayerStateUpdate, PLAYER_LOG_TARGET};

/// Runs the player's command processing loop.
pub async fn run_player_loop(player: &mut Player) {
    info!(target: PLAYER_LOG_TARGET, "Player run loop started.");

    while let Some(command) = player.command_rx.recv().await {
        trace!(target: PLAYER_LOG_TARGET, "Received command: {:?}", command);
        match command {
            PlayerCommand::PlaySingle(episode) => {
                command_handler::handle_play_single(player, episode).await
            }
            PlayerCommand::PlayList {
                episodes,
                start_index,
            } => command_handler::handle_play_list(player, episodes, start_index).await,
            PlayerCommand::TogglePlay => command_handler::handle_toggle_play(player).await,
            PlayerCommand::SetPlaying(state) => {
                command_handler::handle_set_playing(player, state).await
            }
            PlayerCommand::ToggleLoop => command_handler::handle_toggle_loop(player).await,
            PlayerCommand::ToggleShuffle => command_handler::handle_toggle_shuffle(player).await,
            PlayerCommand::Next => command_handler::handle_next(player).await,
            PlayerCommand::Previous => command_handler::handle_previous(player).await,
            PlayerCommand::Seek(position) => command_handler::handle_seek(player, position).await,
            PlayerCommand::Clear => command_handler::handle_clear(player).await,
            PlayerCommand::TrackFinished => command_handler::handle_track_finished(player).await,
            PlayerCommand::GetFullState(responder) => {
                let snapshot = player.full_snapshot().await;
                let _ = responder.send(snapshot); // Ignore error if receiver dropped
            }
            PlayerCommand::Shutdown => {
                info!(target: PLAYER_LOG_TARGET, "Shutdown command received. Exiting run loop.");
                player.is_playing = false;
                player.broadcast_update(PlayerStateUpdate::Stopped);
                break;
            }
        }
    }

    info!(target: PLAYER_LOG_TARGET, "Player run loop finished. Performing final cleanup.");
    if let Err(e) = player.media.lock().await.shutdown().await {
        error!(target: PLAYER_LOG_TARGET, "Error shutting down media element: {}", e);
    }
    info!(target: PLAYER_LOG_TARGET, "Player task cleanup complete.");
}

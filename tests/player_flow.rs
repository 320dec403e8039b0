//! End-to-end tests driving the player task over its command channel,
//! backed by the real clock-driven media element.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, Mutex as TokioMutex};

use podcli::episodes::Episode;
use podcli::media::{ClockedElement, SharedMediaElement};
use podcli::player::{Player, PlayerCommand, PlayerStateSnapshot};

fn episode(id: &str) -> Episode {
    Episode {
        id: id.to_string(),
        title: format!("Episode {}", id),
        members: "Host, Guest".to_string(),
        thumbnail: format!("https://example.com/{}.jpg", id),
        description: None,
        duration: 1800,
        url: format!("https://example.com/{}.mp3", id),
    }
}

fn spawn_player() -> (mpsc::Sender<PlayerCommand>, tokio::task::JoinHandle<()>) {
    let media: SharedMediaElement = Arc::new(TokioMutex::new(ClockedElement::new(16)));
    let (mut player, command_tx) = Player::new(media, 16, 16);
    let handle = tokio::spawn(async move { player.run().await });
    (command_tx, handle)
}

async fn snapshot(command_tx: &mpsc::Sender<PlayerCommand>) -> PlayerStateSnapshot {
    let (tx, rx) = oneshot::channel();
    command_tx
        .send(PlayerCommand::GetFullState(tx))
        .await
        .expect("player task alive");
    rx.await.expect("snapshot response")
}

async fn shut_down(
    command_tx: mpsc::Sender<PlayerCommand>,
    handle: tokio::task::JoinHandle<()>,
) {
    command_tx
        .send(PlayerCommand::Shutdown)
        .await
        .expect("player task alive");
    handle.await.expect("player task exits cleanly");
}

#[tokio::test]
async fn play_single_yields_one_episode_queue() {
    let (command_tx, handle) = spawn_player();

    command_tx
        .send(PlayerCommand::PlaySingle(episode("solo")))
        .await
        .unwrap();

    let state = snapshot(&command_tx).await;
    assert_eq!(state.queue.len(), 1);
    assert_eq!(state.current_index, 0);
    assert!(state.is_playing);
    assert!(!state.has_next);
    assert!(!state.has_previous);
    assert_eq!(state.current_episode().unwrap().id, "solo");

    shut_down(command_tx, handle).await;
}

#[tokio::test]
async fn play_list_reports_derived_flags() {
    let (command_tx, handle) = spawn_player();

    command_tx
        .send(PlayerCommand::PlayList {
            episodes: vec![episode("a"), episode("b"), episode("c")],
            start_index: 1,
        })
        .await
        .unwrap();

    let state = snapshot(&command_tx).await;
    assert_eq!(state.current_index, 1);
    assert!(state.is_playing);
    assert!(state.has_next);
    assert!(state.has_previous);

    shut_down(command_tx, handle).await;
}

#[tokio::test]
async fn ended_advances_then_clears() {
    let (command_tx, handle) = spawn_player();

    command_tx
        .send(PlayerCommand::PlayList {
            episodes: vec![episode("a"), episode("b")],
            start_index: 0,
        })
        .await
        .unwrap();

    // First end-of-episode: advance, do not clear.
    command_tx.send(PlayerCommand::TrackFinished).await.unwrap();
    let state = snapshot(&command_tx).await;
    assert_eq!(state.current_index, 1);
    assert_eq!(state.queue.len(), 2);

    // Second end-of-episode: nothing left, queue resets.
    command_tx.send(PlayerCommand::TrackFinished).await.unwrap();
    let state = snapshot(&command_tx).await;
    assert!(state.queue.is_empty());
    assert_eq!(state.current_index, 0);

    shut_down(command_tx, handle).await;
}

#[tokio::test]
async fn shuffled_next_keeps_index_in_bounds() {
    let (command_tx, handle) = spawn_player();

    command_tx
        .send(PlayerCommand::PlayList {
            episodes: vec![episode("a"), episode("b"), episode("c")],
            start_index: 2,
        })
        .await
        .unwrap();
    command_tx.send(PlayerCommand::ToggleShuffle).await.unwrap();

    for _ in 0..16 {
        command_tx.send(PlayerCommand::Next).await.unwrap();
        let state = snapshot(&command_tx).await;
        assert!(state.current_index < state.queue.len());
        assert!(state.has_next);
    }

    shut_down(command_tx, handle).await;
}

#[tokio::test]
async fn toggles_are_involutions() {
    let (command_tx, handle) = spawn_player();

    command_tx
        .send(PlayerCommand::PlaySingle(episode("solo")))
        .await
        .unwrap();

    command_tx.send(PlayerCommand::ToggleLoop).await.unwrap();
    command_tx.send(PlayerCommand::ToggleShuffle).await.unwrap();
    let state = snapshot(&command_tx).await;
    assert!(state.is_looping);
    assert!(state.is_shuffling);

    command_tx.send(PlayerCommand::ToggleLoop).await.unwrap();
    command_tx.send(PlayerCommand::ToggleShuffle).await.unwrap();
    let state = snapshot(&command_tx).await;
    assert!(!state.is_looping);
    assert!(!state.is_shuffling);

    shut_down(command_tx, handle).await;
}

#[tokio::test]
async fn seek_moves_the_reported_position() {
    let (command_tx, handle) = spawn_player();

    command_tx
        .send(PlayerCommand::PlaySingle(episode("solo")))
        .await
        .unwrap();
    // Pause first so the clock cannot race the assertion.
    command_tx.send(PlayerCommand::TogglePlay).await.unwrap();
    command_tx.send(PlayerCommand::Seek(65)).await.unwrap();

    let state = snapshot(&command_tx).await;
    assert!(!state.is_playing);
    assert_eq!(state.position, 65);

    shut_down(command_tx, handle).await;
}

#[tokio::test]
async fn out_of_range_start_index_leaves_no_current_episode() {
    let (command_tx, handle) = spawn_player();

    command_tx
        .send(PlayerCommand::PlayList {
            episodes: vec![episode("a")],
            start_index: 7,
        })
        .await
        .unwrap();

    let state = snapshot(&command_tx).await;
    assert!(state.current_episode().is_none());
    assert!(!state.is_playing);

    shut_down(command_tx, handle).await;
}

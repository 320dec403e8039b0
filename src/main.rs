use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex as TokioMutex;
use tracing_subscriber::EnvFilter;

use podcli::config::Settings;
use podcli::episodes::Library;
use podcli::init_app_dirs;
use podcli::media::{ClockedElement, MediaElement, SharedMediaElement};
use podcli::player::{Player, PlayerCommand};
use podcli::ui::{spawn_media_bridge, Cli, MenuAction, Transport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    // Parse command-line arguments and initialize CLI
    let cli = Cli::new();
    let args = &cli.args;

    // Initialize application directories
    init_app_dirs()?;

    // Load configuration from file or create default
    let config_path = match &args.config {
        Some(path) => Path::new(path).to_path_buf(),
        None => Settings::default_path(),
    };

    let mut settings = Settings::load(&config_path)?;

    // Command-line arguments and environment variables win over the config
    // file.
    if let Some(library) = args.library.clone() {
        settings.library_path = library;
    }
    if let Some(step) = args.seek_step {
        settings.seek_step_seconds = step;
    }

    settings.validate()?;

    let library = Library::load(Path::new(&settings.library_path))?;

    // One media element and one player for the whole session. Every page of
    // the menu pushes episodes into the same player, and the transport view
    // reflects whatever it currently holds.
    let media: SharedMediaElement = Arc::new(TokioMutex::new(ClockedElement::new(64)));
    let media_events = media.lock().await.subscribe_events();
    let bridge_events = media.lock().await.subscribe_events();

    let (mut player, command_tx) = Player::new(media, 64, 32);
    let state_rx = player.subscribe_state_updates();
    let player_handle = tokio::spawn(async move { player.run().await });

    let bridge_handle = spawn_media_bridge(bridge_events, command_tx.clone());

    // Main application loop
    loop {
        cli.display_episodes(library.episodes());

        match cli.select_action(library.len()) {
            Ok(MenuAction::PlaySingle(index)) => {
                let episode = library.episodes()[index].clone();
                command_tx.send(PlayerCommand::PlaySingle(episode)).await?;
            }
            Ok(MenuAction::PlayAllFrom(index)) => {
                command_tx
                    .send(PlayerCommand::PlayList {
                        episodes: library.episodes().to_vec(),
                        start_index: index,
                    })
                    .await?;
            }
            Ok(MenuAction::ClearQueue) => {
                command_tx.send(PlayerCommand::Clear).await?;
                continue;
            }
            Ok(MenuAction::Quit) => break,
            Err(e) => {
                cli.display_error(&*e);
                continue;
            }
        }

        // Drop into the transport view for the queue that just started.
        let mut transport = Transport::new(
            command_tx.clone(),
            state_rx.resubscribe(),
            media_events.resubscribe(),
            settings.seek_step_seconds,
        );
        if let Err(e) = transport.run().await {
            cli.display_error(&*e);
        }
    }

    command_tx.send(PlayerCommand::Shutdown).await?;
    let _ = player_handle.await;
    bridge_handle.abort();

    Ok(())
}

//! Command-line interface implementation

use clap::Parser;
use std::error::Error;
use std::io::{self, Write};

use crate::episodes::Episode;
use crate::ui::format::format_timestamp;

/// Command-line arguments for podcli
#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal podcast player", long_about = None)]
pub struct Args {
    /// Path to the episode library JSON file
    #[arg(short, long, env = "PODCLI_LIBRARY")]
    pub library: Option<String>,

    /// Seconds jumped per seek key press
    #[arg(short, long, env = "PODCLI_SEEK_STEP")]
    pub seek_step: Option<u64>,

    /// Config file path
    #[arg(short, long, env = "PODCLI_CONFIG")]
    pub config: Option<String>,
}

/// Menu action selected by the user.
#[derive(Debug, PartialEq)]
pub enum MenuAction {
    /// Play one episode on its own.
    PlaySingle(usize),
    /// Play the whole library starting at the given index.
    PlayAllFrom(usize),
    ClearQueue,
    Quit,
}

/// CLI user interface for interacting with the application
pub struct Cli {
    pub args: Args,
}

impl Cli {
    /// Create a new CLI instance
    pub fn new() -> Self {
        Cli {
            args: Args::parse(),
        }
    }

    /// Display the episode library
    pub fn display_episodes(&self, episodes: &[Episode]) {
        println!("\nEpisode Library:");
        println!("{:<5} {:<42} {:<10} {}", "#", "Title", "Length", "Members");
        println!("{}", "-".repeat(80));

        for (index, episode) in episodes.iter().enumerate() {
            let title = if episode.title.len() > 40 {
                format!("{:.37}...", episode.title)
            } else {
                episode.title.clone()
            };
            println!(
                "{:<5} {:<42} {:<10} {}",
                index + 1,
                title,
                format_timestamp(episode.duration),
                episode.members
            );
        }
        println!();
    }

    /// Prompt user for the next menu action
    pub fn select_action(&self, episode_count: usize) -> Result<MenuAction, Box<dyn Error>> {
        if episode_count == 0 {
            return Err("No episodes available".into());
        }

        println!("Enter an episode number to play it, 'a <number>' to play the list from there,");
        print!("'c' to clear the queue, or 'q' to quit: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        parse_action(&input, episode_count)
    }

    /// Display error messages
    pub fn display_error(&self, error: &dyn Error) {
        eprintln!("Error: {}", error);
    }
}

/// Parses one line of menu input.
pub(super) fn parse_action(input: &str, episode_count: usize) -> Result<MenuAction, Box<dyn Error>> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "q" | "quit" => return Ok(MenuAction::Quit),
        "c" | "clear" => return Ok(MenuAction::ClearQueue),
        _ => {}
    }

    if let Some(rest) = input.strip_prefix('a') {
        let selection = rest.trim().parse::<usize>()?;
        return checked_index(selection, episode_count).map(MenuAction::PlayAllFrom);
    }

    let selection = input.parse::<usize>()?;
    checked_index(selection, episode_count).map(MenuAction::PlaySingle)
}

fn checked_index(selection: usize, episode_count: usize) -> Result<usize, Box<dyn Error>> {
    if selection < 1 || selection > episode_count {
        return Err(format!(
            "Invalid selection. Please enter a number between 1 and {}",
            episode_count
        )
        .into());
    }
    Ok(selection - 1)
}

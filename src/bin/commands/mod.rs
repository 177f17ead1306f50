pub mod duplicates;
pub mod list;
pub mod rotate;
pub mod utils;

use clap::Subcommand;
use festune::rotate::DEFAULT_ROTATION_COUNT;
use festune::Settings;

#[derive(Subcommand)]
pub enum Commands {
    /// Refresh the local mirror and report tracks found in several playlists
    ///
    /// Only playlists whose snapshot changed since the last run are fetched
    /// again; duplicates are looked for among the tracks of those playlists.
    ///
    /// Usage examples:
    /// # Check the monthly playlists
    /// festune duplicates
    ///
    /// # Check every playlist of the account
    /// festune duplicates --all-playlists
    Duplicates {
        /// Mirror every playlist, not only the monthly "Playlist Feston" ones
        #[arg(long)]
        all_playlists: bool,
    },

    /// List the monthly playlists known locally, oldest first
    ///
    /// Usage examples:
    /// # Most recent first
    /// festune list --reverse
    List {
        /// Show the most recent playlists first
        #[arg(long)]
        reverse: bool,
    },

    /// Refresh the mirror, then fill the rotating playlist
    ///
    /// The rotating playlist (FESTUNE_ROTATING_PLAYLIST, as user_id:playlist_id)
    /// receives the tracks of the most recent monthly playlists.
    ///
    /// Usage examples:
    /// # Rotate the last 3 months
    /// festune rotate
    ///
    /// # Rotate the last 6 months
    /// festune rotate --count 6
    Rotate {
        /// Number of monthly playlists to include
        #[arg(long, default_value_t = DEFAULT_ROTATION_COUNT)]
        count: usize,
    },
}

pub async fn execute_command(
    command: Commands,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Duplicates { all_playlists } => {
            duplicates::handle_duplicates(settings, all_playlists).await
        }
        Commands::List { reverse } => list::handle_list(settings, reverse),
        Commands::Rotate { count } => rotate::handle_rotate(settings, count).await,
    }
}

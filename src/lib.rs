//! # festune
//!
//! Keep a local mirror of Spotify playlists, reconcile it against the remote
//! service, and find tracks shared between playlists.
//!
//! ```rust,no_run
//! use festune::{find_duplicates, refresh, ManagedPlaylistIndex, Settings, SpotifyWebClient, TrackIndex};
//!
//! #[tokio::main]
//! async fn main() -> festune::Result<()> {
//!     let settings = Settings::from_env()?;
//!     let client = SpotifyWebClient::new(
//!         Box::new(http_client::native::NativeClient::new()),
//!         settings.access_token()?,
//!     );
//!
//!     let mut playlists = ManagedPlaylistIndex::load(settings.store())?;
//!     let mut tracks = TrackIndex::load(settings.store())?;
//!
//!     let refreshed = refresh(&client, &mut playlists, &mut tracks).await?;
//!     for duplicate in find_duplicates(refreshed.touched_tracks(), &tracks) {
//!         println!("{}", duplicate.describe(&playlists));
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod duplicates;
pub mod error;
pub mod headers;
pub mod index;
pub mod iterator;
pub mod playlist;
pub mod rotate;
pub mod settings;
pub mod store;
pub mod sync;
pub mod r#trait;
pub mod track;

pub use client::SpotifyWebClient;
pub use duplicates::{find_duplicates, Duplicate};
pub use error::FestuneError;
pub use index::{ManagedPlaylistIndex, PlaylistIndex, TrackIndex};
pub use iterator::{AsyncPaginatedIterator, PlaylistTracksIterator, PlaylistsIterator};
pub use playlist::{Image, Images, ManagedPlaylist, Playlist, PlaylistKey, PlaylistRecord, YearMonth};
pub use rotate::{rotation_uris, update_rotating_playlist};
pub use settings::Settings;
pub use store::{Record, RecordStore};
pub use sync::{refresh, Refresh};
pub use r#trait::SpotifyClient;
pub use track::Track;

#[cfg(feature = "mock")]
pub use r#trait::MockSpotifyClient;

pub type Result<T> = std::result::Result<T, FestuneError>;

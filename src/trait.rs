use crate::api::{Page, PlaylistItem, PlaylistObject};
use crate::Result;
use async_trait::async_trait;

/// Trait for the remote music service operations festune relies on.
///
/// This trait abstracts the handful of Spotify Web API endpoints needed to
/// mirror playlists, so that the reconciliation logic can run against a fake
/// or a mock in tests. Paginated endpoints return one page at a time; use
/// [`PlaylistsIterator`](crate::PlaylistsIterator) and
/// [`PlaylistTracksIterator`](crate::PlaylistTracksIterator) to walk all of
/// them.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockSpotifyClient`
/// that implements this trait using the `mockall` library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait SpotifyClient {
    /// Fetch a page of the current user's playlists, starting at `offset`.
    async fn get_current_user_playlists_page(&self, offset: u32) -> Result<Page<PlaylistObject>>;

    /// Fetch one playlist by owner and id.
    async fn get_playlist(&self, user_id: &str, playlist_id: &str) -> Result<PlaylistObject>;

    /// Fetch a page of a playlist's items, starting at `offset`.
    ///
    /// Item `i` of the page sits at position `offset + i` in the playlist.
    async fn get_playlist_tracks_page(
        &self,
        user_id: &str,
        playlist_id: &str,
        offset: u32,
    ) -> Result<Page<PlaylistItem>>;

    /// Replace every item of a playlist with `uris` (at most 100).
    ///
    /// Returns the new snapshot id of the playlist.
    async fn replace_playlist_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<String>;

    /// Append `uris` (at most 100) to a playlist.
    ///
    /// Returns the new snapshot id of the playlist.
    async fn add_playlist_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<String>;
}

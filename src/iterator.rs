use crate::api::{PlaylistItem, PlaylistObject};
use crate::r#trait::SpotifyClient;
use crate::{PlaylistKey, Result};

use async_trait::async_trait;

/// Async iterator trait for paginated Spotify data.
///
/// This trait provides a common interface for walking paginated endpoints,
/// such as the user's playlists or the items of one playlist. Pages are
/// fetched one after the other, only when the previous one is exhausted.
#[async_trait(?Send)]
pub trait AsyncPaginatedIterator<T> {
    /// Fetch the next item from the iterator.
    ///
    /// This method automatically handles pagination, fetching new pages as needed.
    /// Returns `None` when there are no more items available.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(item))` - Next item in the sequence
    /// - `Ok(None)` - No more items available
    /// - `Err(...)` - Network or parsing error occurred
    async fn next(&mut self) -> Result<Option<T>>;

    /// Collect all remaining items into a Vec.
    async fn collect_all(&mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Take up to n items from the iterator.
    async fn take(&mut self, n: usize) -> Result<Vec<T>> {
        let mut items = Vec::new();
        for _ in 0..n {
            match self.next().await? {
                Some(item) => items.push(item),
                None => break,
            }
        }
        Ok(items)
    }

    /// Total number of items, once the first page has been fetched.
    fn total(&self) -> Option<u32> {
        None
    }
}

/// Iterator over the current user's playlists.
pub struct PlaylistsIterator<'a, C: SpotifyClient + ?Sized> {
    client: &'a C,
    next_offset: u32,
    has_more: bool,
    buffer: Vec<PlaylistObject>,
    total: Option<u32>,
}

impl<'a, C: SpotifyClient + ?Sized> PlaylistsIterator<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            next_offset: 0,
            has_more: true,
            buffer: Vec::new(),
            total: None,
        }
    }
}

#[async_trait(?Send)]
impl<'a, C: SpotifyClient + ?Sized> AsyncPaginatedIterator<PlaylistObject>
    for PlaylistsIterator<'a, C>
{
    async fn next(&mut self) -> Result<Option<PlaylistObject>> {
        if self.buffer.is_empty() && self.has_more {
            log::debug!("Fetching playlists from offset {}", self.next_offset);

            let page = self
                .client
                .get_current_user_playlists_page(self.next_offset)
                .await?;

            self.has_more = page.has_next_page();
            self.next_offset += page.items.len() as u32;
            self.total = Some(page.total);
            self.buffer = page.items;
            self.buffer.reverse(); // Reverse so we can pop from end efficiently
        }

        Ok(self.buffer.pop())
    }

    fn total(&self) -> Option<u32> {
        self.total
    }
}

/// Iterator over the items of one playlist, each paired with its 0-based
/// position in the playlist.
pub struct PlaylistTracksIterator<'a, C: SpotifyClient + ?Sized> {
    client: &'a C,
    playlist: PlaylistKey,
    next_offset: u32,
    has_more: bool,
    buffer: Vec<(usize, PlaylistItem)>,
    total: Option<u32>,
}

impl<'a, C: SpotifyClient + ?Sized> PlaylistTracksIterator<'a, C> {
    pub fn new(client: &'a C, playlist: PlaylistKey) -> Self {
        Self {
            client,
            playlist,
            next_offset: 0,
            has_more: true,
            buffer: Vec::new(),
            total: None,
        }
    }
}

#[async_trait(?Send)]
impl<'a, C: SpotifyClient + ?Sized> AsyncPaginatedIterator<(usize, PlaylistItem)>
    for PlaylistTracksIterator<'a, C>
{
    async fn next(&mut self) -> Result<Option<(usize, PlaylistItem)>> {
        if self.buffer.is_empty() && self.has_more {
            let offset = self.next_offset;
            log::debug!("Fetching items of {} from offset {offset}", self.playlist);

            let page = self
                .client
                .get_playlist_tracks_page(&self.playlist.user_id, &self.playlist.playlist_id, offset)
                .await?;

            self.has_more = page.has_next_page();
            self.next_offset = offset + page.items.len() as u32;
            self.total = Some(page.total);
            self.buffer = page
                .items
                .into_iter()
                .enumerate()
                .map(|(i, item)| (offset as usize + i, item))
                .collect();
            self.buffer.reverse();
        }

        Ok(self.buffer.pop())
    }

    fn total(&self) -> Option<u32> {
        self.total
    }
}

#![allow(dead_code)]
use async_trait::async_trait;
use festune::api::{
    ArtistObject, ExternalIds, ExternalUrls, Page, PlaylistItem, PlaylistObject, TrackObject,
    TracksRef, UserObject,
};
use festune::{FestuneError, PlaylistKey, RecordStore, Result, SpotifyClient};
use std::cell::RefCell;
use std::collections::HashMap;

pub const USER: &str = "feston";

pub fn key(playlist_id: &str) -> PlaylistKey {
    PlaylistKey::new(USER, playlist_id)
}

pub fn store(dir: &tempfile::TempDir) -> RecordStore {
    RecordStore::new(dir.path())
}

pub fn track_item(track_id: &str) -> PlaylistItem {
    PlaylistItem {
        track: Some(TrackObject {
            object_type: "track".to_string(),
            id: Some(track_id.to_string()),
            name: format!("Song {track_id}"),
            artists: vec![ArtistObject {
                name: "Feston".to_string(),
            }],
            external_ids: ExternalIds::default(),
        }),
    }
}

/// A playlist item whose track is no longer available.
pub fn unavailable_item() -> PlaylistItem {
    PlaylistItem { track: None }
}

#[derive(Default)]
struct State {
    playlists: Vec<PlaylistObject>,
    items: HashMap<String, Vec<PlaylistItem>>,
    track_fetches: HashMap<String, usize>,
    mutations: Vec<(String, String, Vec<String>)>,
}

/// In-memory Spotify account, served in small pages.
pub struct FakeSpotify {
    page_size: usize,
    state: RefCell<State>,
}

impl Default for FakeSpotify {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeSpotify {
    pub fn new() -> Self {
        Self::with_page_size(2)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            state: RefCell::new(State::default()),
        }
    }

    /// Create or replace a playlist with the given tracks.
    pub fn set_playlist(&self, playlist_id: &str, name: &str, snapshot: &str, track_ids: &[&str]) {
        let items = track_ids.iter().map(|id| track_item(id)).collect();
        self.set_playlist_items(playlist_id, name, snapshot, items);
    }

    pub fn set_playlist_items(
        &self,
        playlist_id: &str,
        name: &str,
        snapshot: &str,
        items: Vec<PlaylistItem>,
    ) {
        let object = PlaylistObject {
            object_type: "playlist".to_string(),
            id: playlist_id.to_string(),
            name: name.to_string(),
            owner: UserObject {
                id: USER.to_string(),
            },
            external_urls: ExternalUrls {
                spotify: Some(format!("https://open.spotify.com/playlist/{playlist_id}")),
            },
            images: None,
            public: Some(true),
            snapshot_id: Some(snapshot.to_string()),
            tracks: TracksRef {
                total: items.len() as u32,
            },
        };

        let mut state = self.state.borrow_mut();
        match state.playlists.iter_mut().find(|p| p.id == playlist_id) {
            Some(existing) => *existing = object,
            None => state.playlists.push(object),
        }
        state.items.insert(playlist_id.to_string(), items);
    }

    /// Number of item pages fetched for a playlist so far.
    pub fn track_fetches(&self, playlist_id: &str) -> usize {
        self.state
            .borrow()
            .track_fetches
            .get(playlist_id)
            .copied()
            .unwrap_or(0)
    }

    /// Every (operation, playlist id, uris) mutation received, in order.
    pub fn mutations(&self) -> Vec<(String, String, Vec<String>)> {
        self.state.borrow().mutations.clone()
    }

    fn page<T: Clone>(&self, items: &[T], offset: u32) -> Page<T> {
        let start = (offset as usize).min(items.len());
        let end = (start + self.page_size).min(items.len());
        Page {
            items: items[start..end].to_vec(),
            offset,
            total: items.len() as u32,
            next: (end < items.len()).then(|| format!("next?offset={end}")),
        }
    }

    fn mutate(&self, operation: &str, playlist_id: &str, uris: &[String]) -> Result<String> {
        let mut state = self.state.borrow_mut();
        state
            .mutations
            .push((operation.to_string(), playlist_id.to_string(), uris.to_vec()));
        Ok(format!("snapshot-{}", state.mutations.len()))
    }
}

#[async_trait(?Send)]
impl SpotifyClient for FakeSpotify {
    async fn get_current_user_playlists_page(&self, offset: u32) -> Result<Page<PlaylistObject>> {
        let state = self.state.borrow();
        Ok(self.page(&state.playlists, offset))
    }

    async fn get_playlist(&self, _user_id: &str, playlist_id: &str) -> Result<PlaylistObject> {
        self.state
            .borrow()
            .playlists
            .iter()
            .find(|p| p.id == playlist_id)
            .cloned()
            .ok_or_else(|| FestuneError::Api {
                status: 404,
                message: "Not found.".to_string(),
            })
    }

    async fn get_playlist_tracks_page(
        &self,
        _user_id: &str,
        playlist_id: &str,
        offset: u32,
    ) -> Result<Page<PlaylistItem>> {
        let mut state = self.state.borrow_mut();
        *state
            .track_fetches
            .entry(playlist_id.to_string())
            .or_default() += 1;

        let items = state.items.get(playlist_id).cloned().unwrap_or_default();
        Ok(self.page(&items, offset))
    }

    async fn replace_playlist_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<String> {
        self.mutate("replace", playlist_id, uris)
    }

    async fn add_playlist_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<String> {
        self.mutate("add", playlist_id, uris)
    }
}

/// Wraps a `FakeSpotify`, failing every item page of one playlist.
pub struct FailingTracks<'a> {
    pub inner: &'a FakeSpotify,
    pub failing: &'a str,
}

#[async_trait(?Send)]
impl<'a> SpotifyClient for FailingTracks<'a> {
    async fn get_current_user_playlists_page(&self, offset: u32) -> Result<Page<PlaylistObject>> {
        self.inner.get_current_user_playlists_page(offset).await
    }

    async fn get_playlist(&self, user_id: &str, playlist_id: &str) -> Result<PlaylistObject> {
        self.inner.get_playlist(user_id, playlist_id).await
    }

    async fn get_playlist_tracks_page(
        &self,
        user_id: &str,
        playlist_id: &str,
        offset: u32,
    ) -> Result<Page<PlaylistItem>> {
        if playlist_id == self.failing {
            return Err(FestuneError::Api {
                status: 500,
                message: "boom".to_string(),
            });
        }
        self.inner
            .get_playlist_tracks_page(user_id, playlist_id, offset)
            .await
    }

    async fn replace_playlist_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<String> {
        self.inner.replace_playlist_tracks(playlist_id, uris).await
    }

    async fn add_playlist_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<String> {
        self.inner.add_playlist_tracks(playlist_id, uris).await
    }
}

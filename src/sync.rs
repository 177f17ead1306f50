//! Reconciliation of the local mirror against the remote service.
//!
//! A refresh lists the remote playlists, keeps the ones whose snapshot
//! changed since the last pass, and re-fetches only those. For every stale
//! playlist, tracks that left it are detached and the current tracks are
//! merged into the [`TrackIndex`], so that every track ends up knowing every
//! playlist it belongs to.

use crate::index::{PlaylistIndex, TrackIndex};
use crate::iterator::{AsyncPaginatedIterator, PlaylistTracksIterator};
use crate::playlist::{PlaylistKey, PlaylistRecord};
use crate::r#trait::SpotifyClient;
use crate::track::Track;
use crate::Result;
use std::collections::HashSet;

/// Outcome of a refresh: the current tracks of every refreshed playlist.
#[derive(Debug, Clone, Default)]
pub struct Refresh {
    pub refreshed: Vec<(PlaylistKey, Vec<Track>)>,
}

impl Refresh {
    /// Whether nothing changed on the remote side.
    pub fn is_empty(&self) -> bool {
        self.refreshed.is_empty()
    }

    /// Number of refreshed playlists.
    pub fn len(&self) -> usize {
        self.refreshed.len()
    }

    pub fn playlists(&self) -> impl Iterator<Item = &PlaylistKey> {
        self.refreshed.iter().map(|(key, _)| key)
    }

    pub fn tracks_of(&self, playlist: &PlaylistKey) -> Option<&[Track]> {
        self.refreshed
            .iter()
            .find(|(key, _)| key == playlist)
            .map(|(_, tracks)| tracks.as_slice())
    }

    /// Every track of the refreshed playlists, each one once.
    pub fn touched_tracks(&self) -> Vec<&Track> {
        let mut seen = HashSet::new();
        self.refreshed
            .iter()
            .flat_map(|(_, tracks)| tracks)
            .filter(|track| seen.insert(track.track_id.clone()))
            .collect()
    }
}

/// Refresh every stale playlist of `playlists`, one at a time.
///
/// Playlists and tracks are persisted as they are processed: an error aborts
/// the pass but keeps whatever was refreshed before it.
pub async fn refresh<C, P>(
    client: &C,
    playlists: &mut PlaylistIndex<P>,
    tracks: &mut TrackIndex,
) -> Result<Refresh>
where
    C: SpotifyClient + ?Sized,
    P: PlaylistRecord,
{
    let stale = playlists.get_playlists_to_refresh(client).await?;
    let mut result = Refresh::default();

    for playlist in stale.iter() {
        let key = playlist.key();
        let current = refresh_playlist(client, playlists, tracks, playlist.clone()).await?;
        result.refreshed.push((key, current));
    }

    if result.is_empty() {
        log::info!("Every playlist is up to date");
    } else {
        log::info!("Refreshed {} playlists", result.len());
    }
    Ok(result)
}

/// Refresh one playlist whose remote version is `playlist`.
///
/// Returns the canonical version of its current tracks.
pub async fn refresh_playlist<C, P>(
    client: &C,
    playlists: &mut PlaylistIndex<P>,
    tracks: &mut TrackIndex,
    playlist: P,
) -> Result<Vec<Track>>
where
    C: SpotifyClient + ?Sized,
    P: PlaylistRecord,
{
    let key = playlist.key();
    log::info!("Refreshing playlist '{}'", playlist.playlist().name);
    playlists.add(playlist)?;

    let previous: Vec<String> = tracks
        .tracks_of(&key)
        .into_values()
        .map(|track| track.track_id.clone())
        .collect();

    let fetched = fetch_playlist_tracks(client, &key).await?;
    let current_ids: HashSet<&str> = fetched.iter().map(|t| t.track_id.as_str()).collect();

    for track_id in previous
        .iter()
        .filter(|id| !current_ids.contains(id.as_str()))
    {
        log::debug!("Track {track_id} left {key}");
        tracks.remove_track_from(track_id, &key)?;
    }

    let added = tracks.add_all(fetched)?;
    log::debug!("{key} now holds {} tracks", added.len());
    Ok(added)
}

/// Fetch the current tracks of a playlist, each one placed at its position.
///
/// Items without a track keep their position but are not returned.
pub async fn fetch_playlist_tracks<C: SpotifyClient + ?Sized>(
    client: &C,
    playlist: &PlaylistKey,
) -> Result<Vec<Track>> {
    let mut items = PlaylistTracksIterator::new(client, playlist.clone());
    let mut tracks = Vec::new();

    while let Some((position, item)) = items.next().await? {
        let Some(track) = item.track else {
            log::warn!("Skipping unavailable item at position {position} of {playlist}");
            continue;
        };

        if let Some(track) = Track::from_api(playlist, track, position)? {
            tracks.push(track);
        }
    }

    Ok(tracks)
}

//! The rotating playlist: a playlist holding the tracks of the most recent
//! managed playlists.

use crate::index::{ManagedPlaylistIndex, TrackIndex};
use crate::playlist::PlaylistKey;
use crate::r#trait::SpotifyClient;
use crate::Result;
use std::collections::HashSet;

/// Maximum number of URIs accepted by one playlist mutation request.
pub const MAX_URIS_PER_REQUEST: usize = 100;

/// Number of managed playlists a rotation covers by default.
pub const DEFAULT_ROTATION_COUNT: usize = 3;

/// URIs of the tracks of the `count` most recent managed playlists.
///
/// Playlists are taken newest first, their tracks in position order; a track
/// present in several of them is kept at its first occurrence.
pub fn rotation_uris(
    playlists: &ManagedPlaylistIndex,
    tracks: &TrackIndex,
    count: usize,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut uris = Vec::new();

    for playlist in playlists.iter_rev().take(count) {
        log::debug!("Rotating tracks of '{}'", playlist.name);
        for track in tracks.tracks_of(&playlist.key()).into_values() {
            if seen.insert(track.track_id.as_str()) {
                uris.push(track.uri());
            }
        }
    }

    uris
}

/// Replace the content of `playlist` with `uris`.
///
/// The first chunk replaces the playlist content (an empty list clears it),
/// the following chunks are appended. Returns the last snapshot id.
pub async fn update_rotating_playlist<C: SpotifyClient + ?Sized>(
    client: &C,
    playlist: &PlaylistKey,
    uris: &[String],
) -> Result<String> {
    let mut chunks = uris.chunks(MAX_URIS_PER_REQUEST);
    let first = chunks.next().unwrap_or(&[]);

    log::info!("Replacing the {} tracks of {playlist}", uris.len());
    let mut snapshot_id = client
        .replace_playlist_tracks(&playlist.playlist_id, first)
        .await?;

    for chunk in chunks {
        snapshot_id = client
            .add_playlist_tracks(&playlist.playlist_id, chunk)
            .await?;
    }

    Ok(snapshot_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::{Images, ManagedPlaylist, Playlist};
    use crate::store::RecordStore;
    use crate::track::Track;

    fn managed(id: &str, name: &str) -> ManagedPlaylist {
        ManagedPlaylist::try_from(Playlist {
            playlist_id: id.to_string(),
            name: name.to_string(),
            user_id: "feston".to_string(),
            external_url: String::new(),
            images: Images::default(),
            public: true,
            snapshot_id: Some("s1".to_string()),
            nb_tracks: 0,
        })
        .unwrap()
    }

    #[test]
    fn test_rotation_uris_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path());
        let mut playlists = ManagedPlaylistIndex::new(store.clone());
        let mut tracks = TrackIndex::new(store);

        playlists.add(managed("old", "Playlist Feston de Janvier '19")).unwrap();
        playlists.add(managed("mid", "Playlist Feston de Février '19")).unwrap();
        playlists.add(managed("new", "Playlist Feston de Mars '19")).unwrap();

        let key = |id: &str| PlaylistKey::new("feston", id);
        tracks
            .add_all(vec![
                Track::new("a", None, vec![], "A").in_playlist(key("old"), 0),
                Track::new("b", None, vec![], "B").in_playlist(key("mid"), 1),
                Track::new("c", None, vec![], "C").in_playlist(key("mid"), 0),
                Track::new("b", None, vec![], "B").in_playlist(key("new"), 0),
            ])
            .unwrap();

        assert_eq!(
            rotation_uris(&playlists, &tracks, 2),
            vec![
                "spotify:track:b".to_string(),
                "spotify:track:c".to_string(),
            ]
        );
        assert_eq!(rotation_uris(&playlists, &tracks, 10).len(), 3);
        assert!(rotation_uris(&playlists, &tracks, 0).is_empty());
    }
}

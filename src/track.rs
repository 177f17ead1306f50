use crate::api::TrackObject;
use crate::playlist::PlaylistKey;
use crate::store::Record;
use crate::{FestuneError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A track as found in one or more playlists.
///
/// Only a small amount of metadata is kept: the track id, its ISRC (the
/// international code identifying a recording), artist names and title.
/// Two tracks are equal when their ids are equal, whatever their metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub track_id: String,
    pub isrc: Option<String>,
    /// Playlist => position in playlist, starting at 0
    #[serde(default)]
    pub playlists: BTreeMap<PlaylistKey, usize>,
    pub artists: Vec<String>,
    pub name: String,
}

impl Track {
    /// Create a track that belongs to no playlist yet.
    pub fn new(
        track_id: impl Into<String>,
        isrc: Option<String>,
        artists: Vec<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            track_id: track_id.into(),
            isrc,
            playlists: BTreeMap::new(),
            artists,
            name: name.into(),
        }
    }

    /// Build a track found at `position` in `playlist` from its API
    /// representation.
    ///
    /// Returns `Ok(None)` for local files, which have no id and cannot be
    /// tracked.
    pub fn from_api(
        playlist: &PlaylistKey,
        track: TrackObject,
        position: usize,
    ) -> Result<Option<Self>> {
        if track.object_type != "track" {
            return Err(FestuneError::Malformed(format!(
                "Item {position} of playlist {playlist} is a {}, not a track: {}",
                track.object_type, track.name
            )));
        }

        let Some(track_id) = track.id else {
            log::warn!(
                "Skipping '{}' at position {position} of {playlist}: it has no id (local file?)",
                track.name
            );
            return Ok(None);
        };

        let mut result = Self::new(
            track_id,
            track.external_ids.isrc,
            track.artists.into_iter().map(|artist| artist.name).collect(),
            track.name,
        );
        result.playlists.insert(playlist.clone(), position);
        Ok(Some(result))
    }

    /// Same track id, placed at `position` in `playlist`.
    pub fn in_playlist(mut self, playlist: PlaylistKey, position: usize) -> Self {
        self.playlists.insert(playlist, position);
        self
    }

    pub fn position_in(&self, playlist: &PlaylistKey) -> Option<usize> {
        self.playlists.get(playlist).copied()
    }

    pub fn url(&self) -> String {
        format!("https://open.spotify.com/track/{}", self.track_id)
    }

    pub fn uri(&self) -> String {
        format!("spotify:track:{}", self.track_id)
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.track_id == other.track_id
    }
}

impl Eq for Track {}

impl Hash for Track {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.track_id.hash(state);
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.artists.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} - {}", self.artists.join(", "), self.name)
        }
    }
}

impl Record for Track {
    const OBJECT_TYPE: &'static str = "track";

    fn identity(&self) -> String {
        self.track_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ArtistObject, ExternalIds};

    fn api_track(object_type: &str, id: Option<&str>) -> TrackObject {
        TrackObject {
            object_type: object_type.to_string(),
            id: id.map(str::to_string),
            name: "Around the World".to_string(),
            artists: vec![ArtistObject {
                name: "Daft Punk".to_string(),
            }],
            external_ids: ExternalIds {
                isrc: Some("GBDUW9700012".to_string()),
            },
        }
    }

    #[test]
    fn test_from_api() {
        let key = PlaylistKey::new("feston", "p1");
        let track = Track::from_api(&key, api_track("track", Some("t1")), 4)
            .unwrap()
            .unwrap();

        assert_eq!(track.track_id, "t1");
        assert_eq!(track.isrc.as_deref(), Some("GBDUW9700012"));
        assert_eq!(track.artists, vec!["Daft Punk".to_string()]);
        assert_eq!(track.position_in(&key), Some(4));
        assert_eq!(format!("{track}"), "Daft Punk - Around the World");
    }

    #[test]
    fn test_from_api_rejects_episodes() {
        let key = PlaylistKey::new("feston", "p1");
        let err = Track::from_api(&key, api_track("episode", Some("e1")), 0).unwrap_err();
        assert!(matches!(err, FestuneError::Malformed(_)));
    }

    #[test]
    fn test_from_api_skips_local_files() {
        let key = PlaylistKey::new("feston", "p1");
        assert!(Track::from_api(&key, api_track("track", None), 0)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_identity_is_the_track_id() {
        let a = Track::new("t1", None, vec![], "Title");
        let b = Track::new("t1", Some("ISRC".to_string()), vec!["Other".to_string()], "Renamed")
            .in_playlist(PlaylistKey::new("feston", "p1"), 0);
        assert_eq!(a, b);
        assert_ne!(a, Track::new("t2", None, vec![], "Title"));
    }

    #[test]
    fn test_membership_map_json_keys() {
        let track = Track::new("t1", None, vec![], "Title")
            .in_playlist(PlaylistKey::new("feston", "p1"), 2);

        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(json["playlists"]["feston:p1"], 2);

        let back: Track = serde_json::from_value(json).unwrap();
        assert_eq!(back.position_in(&PlaylistKey::new("feston", "p1")), Some(2));
    }
}

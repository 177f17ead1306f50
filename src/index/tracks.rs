use crate::playlist::PlaylistKey;
use crate::store::RecordStore;
use crate::track::Track;
use crate::{FestuneError, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Tracks indexed by id, with the playlists each one belongs to.
///
/// The canonical track of every id holds the authoritative membership in
/// its `playlists` map; a per-playlist position table mirrors it for
/// ordered lookups.
pub struct TrackIndex {
    store: RecordStore,
    tracks: HashMap<String, Track>,
    positions: HashMap<PlaylistKey, BTreeMap<usize, String>>,
}

impl TrackIndex {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            tracks: HashMap::new(),
            positions: HashMap::new(),
        }
    }

    /// Build the index from every track saved in `store`.
    pub fn load(store: RecordStore) -> Result<Self> {
        let mut index = Self::new(store);

        for track in index.store.load_all::<Track>()? {
            index.merge(track?);
        }

        log::info!("Loaded {} tracks from disk", index.len());
        Ok(index)
    }

    /// Merge `track` into the index without persisting it.
    ///
    /// Memberships of `track` are added to (or override) the ones already
    /// known for the same id; its metadata replaces the stored metadata.
    fn merge(&mut self, track: Track) -> String {
        let id = track.track_id.clone();
        let previous = self.tracks.remove(&id);

        let mut playlists = previous.map(|p| p.playlists).unwrap_or_default();
        for (key, position) in &track.playlists {
            let slots = self.positions.entry(key.clone()).or_default();

            // Moving inside a playlist frees the old slot
            if let Some(old) = playlists.get(key).filter(|old| *old != position) {
                if slots.get(old) == Some(&id) {
                    slots.remove(old);
                }
            }
            slots.insert(*position, id.clone());
        }
        playlists.extend(track.playlists);

        self.tracks.insert(
            id.clone(),
            Track {
                playlists,
                ..track
            },
        );
        id
    }

    /// Merge `track` into the index and persist the merged record.
    ///
    /// Returns the canonical track after the merge.
    pub fn add(&mut self, track: Track) -> Result<Track> {
        let id = self.merge(track);
        let canonical = self.find(&id)?;
        self.store.save(canonical)?;
        Ok(canonical.clone())
    }

    /// Add every track, in order.
    ///
    /// Returns the canonical version of each distinct track, in the order
    /// they were first seen.
    pub fn add_all(&mut self, tracks: impl IntoIterator<Item = Track>) -> Result<Vec<Track>> {
        let mut order = Vec::new();
        let mut seen = HashSet::new();

        for track in tracks {
            let id = self.merge(track);
            if seen.insert(id.clone()) {
                order.push(id);
            }
        }

        order
            .iter()
            .map(|id| {
                let canonical = self.find(id)?;
                self.store.save(canonical)?;
                Ok(canonical.clone())
            })
            .collect()
    }

    pub fn find(&self, track_id: &str) -> Result<&Track> {
        self.tracks
            .get(track_id)
            .ok_or_else(|| FestuneError::NotFound(format!("Track {track_id} is not indexed")))
    }

    pub fn get(&self, track_id: &str) -> Option<&Track> {
        self.tracks.get(track_id)
    }

    pub fn contains(&self, track_id: &str) -> bool {
        self.tracks.contains_key(track_id)
    }

    /// Every playlist the track currently belongs to.
    pub fn playlists_of(&self, track_id: &str) -> BTreeSet<PlaylistKey> {
        self.tracks
            .get(track_id)
            .map(|track| track.playlists.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Tracks of a playlist, by position.
    pub fn tracks_of(&self, playlist: &PlaylistKey) -> BTreeMap<usize, &Track> {
        self.positions
            .get(playlist)
            .map(|slots| {
                slots
                    .iter()
                    .filter_map(|(position, id)| Some((*position, self.tracks.get(id)?)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Remove a track from one playlist and persist the track.
    ///
    /// Removing a track from a playlist it does not belong to is a no-op;
    /// removing an unknown track is an error.
    pub fn remove_track_from(&mut self, track_id: &str, playlist: &PlaylistKey) -> Result<()> {
        let track = self
            .tracks
            .get_mut(track_id)
            .ok_or_else(|| FestuneError::NotFound(format!("Track {track_id} is not indexed")))?;

        track.playlists.remove(playlist);

        if let Some(slots) = self.positions.get_mut(playlist) {
            slots.retain(|_, id| id != track_id);
            if slots.is_empty() {
                self.positions.remove(playlist);
            }
        }

        log::debug!("Removed track {track_id} from {playlist}");
        self.store.save(&*track)
    }

    /// Iterate through every track, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }
}

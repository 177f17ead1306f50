use crate::index::{PlaylistIndex, TrackIndex};
use crate::playlist::{PlaylistKey, PlaylistRecord};
use crate::track::Track;
use std::collections::{BTreeSet, HashSet};
use std::fmt::Write;

/// A track found in more than one playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    pub track: Track,
    pub playlists: BTreeSet<PlaylistKey>,
}

impl Duplicate {
    /// Human-readable report, naming playlists through `playlists`.
    ///
    /// Playlists missing from the index are shown by key.
    pub fn describe<P: PlaylistRecord>(&self, playlists: &PlaylistIndex<P>) -> String {
        let mut report = format!("{} ({})", self.track, self.track.url());
        for key in &self.playlists {
            let name = playlists
                .get(key)
                .map(|playlist| playlist.playlist().name.clone())
                .unwrap_or_else(|| key.to_string());
            match self.track.position_in(key) {
                Some(position) => {
                    let _ = write!(report, "\n  - {name} (#{})", position + 1);
                }
                None => {
                    let _ = write!(report, "\n  - {name}");
                }
            }
        }
        report
    }
}

/// Report every track of `touched` that belongs to more than one playlist.
///
/// Memberships are read from `tracks`, so a duplicate is found even when only
/// one of its playlists was touched. Results are ordered by track name.
pub fn find_duplicates<'a>(
    touched: impl IntoIterator<Item = &'a Track>,
    tracks: &TrackIndex,
) -> Vec<Duplicate> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<Duplicate> = touched
        .into_iter()
        .filter(|track| seen.insert(track.track_id.clone()))
        .filter_map(|track| {
            let playlists = tracks.playlists_of(&track.track_id);
            if playlists.len() < 2 {
                return None;
            }
            let canonical = tracks.get(&track.track_id).unwrap_or(track);
            Some(Duplicate {
                track: canonical.clone(),
                playlists,
            })
        })
        .collect();

    duplicates.sort_by(|a, b| {
        (&a.track.name, &a.track.track_id).cmp(&(&b.track.name, &b.track.track_id))
    });
    log::debug!("Found {} duplicated tracks", duplicates.len());
    duplicates
}

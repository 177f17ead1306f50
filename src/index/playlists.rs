use crate::iterator::{AsyncPaginatedIterator, PlaylistsIterator};
use crate::playlist::{ManagedPlaylist, Playlist, PlaylistKey, PlaylistRecord, YearMonth};
use crate::r#trait::SpotifyClient;
use crate::store::RecordStore;
use crate::{FestuneError, Result};
use std::collections::{BTreeMap, HashMap};

/// Playlists indexed by identity.
///
/// Can be used to:
/// * iterate through playlists, ordered by date for managed playlists,
/// * test if a playlist with the same identity is present,
/// * work out which playlists changed on the remote service.
pub struct PlaylistIndex<P: PlaylistRecord = Playlist> {
    store: RecordStore,
    by_id: HashMap<PlaylistKey, P>,
    by_date: BTreeMap<YearMonth, PlaylistKey>,
}

/// Index of the managed ("Feston") playlists, ordered by their month.
pub type ManagedPlaylistIndex = PlaylistIndex<ManagedPlaylist>;

impl<P: PlaylistRecord> PlaylistIndex<P> {
    /// Create an empty index persisting to `store`.
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            by_id: HashMap::new(),
            by_date: BTreeMap::new(),
        }
    }

    /// Build the index from every playlist saved in `store`.
    ///
    /// Saved playlists this kind of index does not accept are ignored; an
    /// accepted playlist that cannot be built (e.g. an unparsable managed
    /// name) is an error.
    pub fn load(store: RecordStore) -> Result<Self> {
        let mut index = Self::new(store);

        for playlist in index.store.load_all::<Playlist>()? {
            let playlist = playlist?;
            if !P::accepts(&playlist.name) {
                continue;
            }
            index.insert(P::from_playlist(playlist)?);
        }

        log::info!("Loaded {} playlists from disk", index.len());
        Ok(index)
    }

    /// Insert or overwrite a playlist and persist it.
    pub fn add(&mut self, playlist: P) -> Result<()> {
        self.store.save(&playlist)?;
        self.insert(playlist);
        Ok(())
    }

    /// Insert without persisting.
    fn insert(&mut self, playlist: P) {
        let key = playlist.key();
        let period = playlist.period();

        // A renamed playlist must not keep its previous date
        let previous_period = self.by_id.get(&key).and_then(PlaylistRecord::period);
        if let Some(old) = previous_period.filter(|old| Some(*old) != period) {
            if self.by_date.get(&old) == Some(&key) {
                self.by_date.remove(&old);
                if let Some(other) = self
                    .by_id
                    .values()
                    .find(|p| p.period() == Some(old) && p.key() != key)
                {
                    self.by_date.insert(old, other.key());
                }
            }
        }

        if let Some(period) = period {
            self.by_date.insert(period, key.clone());
        }
        self.by_id.insert(key, playlist);
    }

    /// Find a playlist by identity.
    pub fn find(&self, key: &PlaylistKey) -> Result<&P> {
        self.by_id
            .get(key)
            .ok_or_else(|| FestuneError::NotFound(format!("Playlist {key} is not indexed")))
    }

    pub fn get(&self, key: &PlaylistKey) -> Option<&P> {
        self.by_id.get(key)
    }

    pub fn contains(&self, key: &PlaylistKey) -> bool {
        self.by_id.contains_key(key)
    }

    /// Find the playlist of a given month.
    ///
    /// Only managed playlists carry a date; when several share the same
    /// month, the last one added wins.
    pub fn find_by_date(&self, period: YearMonth) -> Result<&P> {
        self.by_date
            .get(&period)
            .and_then(|key| self.by_id.get(key))
            .ok_or_else(|| FestuneError::NotFound(format!("No playlist for {period}")))
    }

    /// The most recent dated playlist, if any.
    pub fn latest(&self) -> Option<&P> {
        self.by_date
            .values()
            .next_back()
            .and_then(|key| self.by_id.get(key))
    }

    fn sorted(&self) -> Vec<&P> {
        let mut playlists: Vec<&P> = self.by_id.values().collect();
        playlists.sort_by_key(|playlist| (playlist.period(), playlist.key()));
        playlists
    }

    /// Iterate through the playlists, oldest first for managed playlists.
    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.sorted().into_iter()
    }

    /// Iterate through the playlists, most recent first for managed playlists.
    pub fn iter_rev(&self) -> impl Iterator<Item = &P> {
        self.sorted().into_iter().rev()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Whether the local copy of `remote` is current.
    ///
    /// A playlist unknown locally, or without a snapshot token, is never
    /// up to date.
    pub fn is_up_to_date(&self, remote: &P) -> bool {
        match self.find(&remote.key()) {
            Ok(existing) => {
                existing.snapshot_id().is_some() && existing.snapshot_id() == remote.snapshot_id()
            }
            Err(_) => false,
        }
    }

    /// List the remote playlists this index accepts and keep the ones whose
    /// local copy is missing or outdated.
    ///
    /// The result is a new index holding the remote version of every stale
    /// playlist. Nothing is persisted.
    pub async fn get_playlists_to_refresh<C: SpotifyClient + ?Sized>(
        &self,
        client: &C,
    ) -> Result<Self> {
        let mut to_refresh = Self::new(self.store.clone());
        let mut remote_playlists = PlaylistsIterator::new(client);
        let mut seen = 0;

        while let Some(remote) = remote_playlists.next().await? {
            if !P::accepts(&remote.name) {
                log::debug!("Ignoring playlist '{}'", remote.name);
                continue;
            }
            seen += 1;

            let playlist = P::from_api(remote)?;
            if self.is_up_to_date(&playlist) {
                // This playlist exists on disk and both versions match
                log::debug!("Playlist '{}' is up to date", playlist.playlist().name);
                continue;
            }

            log::debug!("Playlist '{}' needs a refresh", playlist.playlist().name);
            to_refresh.insert(playlist);
        }

        log::info!(
            "{} of {seen} playlists need a refresh",
            to_refresh.len()
        );
        Ok(to_refresh)
    }
}

impl<'a, P: PlaylistRecord> IntoIterator for &'a PlaylistIndex<P> {
    type Item = &'a P;
    type IntoIter = std::vec::IntoIter<&'a P>;

    fn into_iter(self) -> Self::IntoIter {
        self.sorted().into_iter()
    }
}

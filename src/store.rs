use crate::{FestuneError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

mod private {
    pub trait Sealed {}

    impl Sealed for crate::Playlist {}
    impl Sealed for crate::ManagedPlaylist {}
    impl Sealed for crate::Track {}
}

/// A value that can be persisted by a [`RecordStore`].
///
/// The set of records is closed: playlists (plain or managed) and tracks.
/// Every record declares the directory it lives in and derives its file
/// name from its identity fields.
pub trait Record: private::Sealed + Serialize {
    /// Directory (relative to the store root) holding records of this type.
    const OBJECT_TYPE: &'static str;

    /// File stem derived from the identity fields of the record.
    ///
    /// Two records of the same type must never share a stem; composite
    /// identities rely on a separator their last field cannot contain.
    fn identity(&self) -> String;
}

/// File-based persistence: one JSON file per record.
///
/// Records are laid out as `<root>/<object type>/<identity>.json`, e.g.
/// `~/.local/share/festune/playlist/feston-37i9dQZF1DX.json`.
#[derive(Debug, Clone)]
pub struct RecordStore {
    root: PathBuf,
}

impl RecordStore {
    /// Create a store rooted at `root`. Nothing is created on disk until the
    /// first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding the record of type `R` with `identity`.
    pub fn path_for<R: Record>(&self, identity: &str) -> Result<PathBuf> {
        if identity.is_empty()
            || identity.contains(|c: char| c == '/' || c == '\\')
            || identity.starts_with('.')
        {
            return Err(FestuneError::Malformed(format!(
                "Invalid {} identity: {identity:?}",
                R::OBJECT_TYPE
            )));
        }

        Ok(self
            .root
            .join(R::OBJECT_TYPE)
            .join(format!("{identity}.json")))
    }

    /// Save a record, creating the containing directory if needed.
    pub fn save<R: Record>(&self, record: &R) -> Result<()> {
        let path = self.path_for::<R>(&record.identity())?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string(record)?;
        fs::write(&path, json)?;

        log::debug!("Saved {} to {}", R::OBJECT_TYPE, path.display());
        Ok(())
    }

    /// Load the record of type `R` with `identity`.
    ///
    /// Fails with [`FestuneError::NotFound`] if no such record was saved.
    pub fn load_one<R: Record + DeserializeOwned>(&self, identity: &str) -> Result<R> {
        let path = self.path_for::<R>(identity)?;

        if !path.exists() {
            return Err(FestuneError::NotFound(format!(
                "No {} record {identity}",
                R::OBJECT_TYPE
            )));
        }

        read_record(&path)
    }

    /// Load every record of type `R`.
    ///
    /// Files are listed eagerly (sorted by name) but read and decoded lazily
    /// as the iterator advances. A missing directory yields nothing.
    pub fn load_all<R: Record + DeserializeOwned>(
        &self,
    ) -> Result<impl Iterator<Item = Result<R>>> {
        let dir = self.root.join(R::OBJECT_TYPE);

        let mut paths = Vec::new();
        if dir.is_dir() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    paths.push(path);
                }
            }
        }
        paths.sort();

        log::debug!(
            "Found {} {} records in {}",
            paths.len(),
            R::OBJECT_TYPE,
            dir.display()
        );

        Ok(paths.into_iter().map(|path| read_record(&path)))
    }
}

fn read_record<R: DeserializeOwned>(path: &Path) -> Result<R> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| {
        log::warn!("Failed to decode record {}: {e}", path.display());
        FestuneError::Json(e)
    })
}

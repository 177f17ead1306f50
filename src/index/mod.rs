//! In-memory indexes over the persisted playlist and track records.
//!
//! Indexes own no data of their own: they are rebuilt from the
//! [`RecordStore`](crate::RecordStore) at startup and write every change
//! back to it.

pub mod playlists;
pub mod tracks;

pub use playlists::{ManagedPlaylistIndex, PlaylistIndex};
pub use tracks::TrackIndex;

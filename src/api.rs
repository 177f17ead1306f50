//! Wire types of the Spotify Web API.
//!
//! Only the fields festune reads are declared; everything else in the
//! responses is ignored by serde.

use serde::{Deserialize, Serialize};

/// One page of a paginated endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page
    pub items: Vec<T>,
    /// Offset of the first item of this page in the whole sequence
    #[serde(default)]
    pub offset: u32,
    /// Total number of items across all pages
    #[serde(default)]
    pub total: u32,
    /// URL of the next page, absent on the last page
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// Whether another page follows this one.
    pub fn has_next_page(&self) -> bool {
        self.next.is_some() && !self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserObject {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageObject {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TracksRef {
    #[serde(default)]
    pub total: u32,
}

/// A playlist as returned by `/me/playlists` and `/playlists/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistObject {
    #[serde(rename = "type")]
    pub object_type: String,
    pub id: String,
    pub name: String,
    pub owner: UserObject,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub images: Option<Vec<ImageObject>>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub snapshot_id: Option<String>,
    #[serde(default)]
    pub tracks: TracksRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistObject {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExternalIds {
    #[serde(default)]
    pub isrc: Option<String>,
}

/// A track (or, for podcasts, an episode) inside a playlist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackObject {
    #[serde(rename = "type")]
    pub object_type: String,
    /// Local files have no id
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
    #[serde(default)]
    pub external_ids: ExternalIds,
}

/// An entry of `/playlists/{id}/tracks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// Unavailable entries come back as `null`
    #[serde(default)]
    pub track: Option<TrackObject>,
}

/// Error body of a non-success response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub message: String,
}

/// Response of the endpoints mutating a playlist's items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playlist_object_from_json() {
        let json = r#"{
            "type": "playlist",
            "id": "37i9dQZF1DX",
            "name": "Playlist Feston de Mars '19",
            "owner": {"id": "feston", "display_name": "Feston"},
            "external_urls": {"spotify": "https://open.spotify.com/playlist/37i9dQZF1DX"},
            "images": [{"url": "https://i.scdn.co/image/a", "width": 640, "height": 640}],
            "public": null,
            "snapshot_id": "MTAsZDVm",
            "tracks": {"href": "https://api.spotify.com/v1/playlists/37i9dQZF1DX/tracks", "total": 42}
        }"#;

        let playlist: PlaylistObject = serde_json::from_str(json).unwrap();
        assert_eq!(playlist.object_type, "playlist");
        assert_eq!(playlist.owner.id, "feston");
        assert_eq!(playlist.public, None);
        assert_eq!(playlist.tracks.total, 42);
        assert_eq!(playlist.images.unwrap()[0].width, Some(640));
    }

    #[test]
    fn test_playlist_item_with_null_track() {
        let json = r#"{"items": [{"track": null}, {"track": {
            "type": "track", "id": "4uLU6hMCjMI75M1A2tKUQC", "name": "Never Gonna Give You Up",
            "artists": [{"name": "Rick Astley"}], "external_ids": {"isrc": "GBARL9300135"}
        }}], "offset": 0, "total": 2, "next": null}"#;

        let page: Page<PlaylistItem> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.items[0].track.is_none());
        assert!(!page.has_next_page());
        let track = page.items[1].track.as_ref().unwrap();
        assert_eq!(track.external_ids.isrc.as_deref(), Some("GBARL9300135"));
    }
}

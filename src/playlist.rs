//! Playlist records: plain playlists and managed "Feston" playlists.

use crate::api::{ImageObject, PlaylistObject};
use crate::store::Record;
use crate::{FestuneError, Result};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Prefix shared by every managed playlist name.
pub const MANAGED_PREFIX: &str = "Playlist Feston";

/// Name fragments excluding a playlist from management even when it carries
/// the managed prefix.
pub const MANAGED_DENYLIST: &[&str] = &["spéciale", "Rotating"];

/// Month names recognized in managed playlist names.
const MONTH_NUMBERS_BY_NAME: &[(&str, u32)] = &[
    ("Janvier", 1),
    ("Février", 2),
    ("Februar", 2),
    ("Mars", 3),
    ("Avril", 4),
    ("Mai", 5),
    ("Juin", 6),
    ("Juillet", 7),
    ("Aout", 8),
    ("Août", 8),
    ("Septembre", 9),
    ("Octobre", 10),
    ("Novembre", 11),
    ("Décembre", 12),
    ("Decembre", 12),
    ("Noël", 12),
];

fn name_date_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^Playlist Feston (?:de |d'|vom |of )(?P<month_name>\w+) '(?P<year>\d{2})")
            .expect("managed playlist name pattern is valid")
    })
}

fn month_number_from(month_name: &str) -> Option<u32> {
    MONTH_NUMBERS_BY_NAME
        .iter()
        .find(|(name, _)| *name == month_name)
        .map(|(_, number)| *number)
}

/// Identity of a playlist: the owning user and the remote playlist id.
///
/// Displayed (and used as a JSON map key) as `user_id:playlist_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaylistKey {
    pub user_id: String,
    pub playlist_id: String,
}

impl PlaylistKey {
    pub fn new(user_id: impl Into<String>, playlist_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            playlist_id: playlist_id.into(),
        }
    }
}

impl fmt::Display for PlaylistKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.user_id, self.playlist_id)
    }
}

impl FromStr for PlaylistKey {
    type Err = FestuneError;

    /// Split on the last `:`; playlist ids never contain one.
    fn from_str(s: &str) -> Result<Self> {
        match s.rsplit_once(':') {
            Some((user_id, playlist_id)) if !user_id.is_empty() && !playlist_id.is_empty() => {
                Ok(Self::new(user_id, playlist_id))
            }
            _ => Err(FestuneError::Malformed(format!(
                "Invalid playlist key {s:?}, expected user_id:playlist_id"
            ))),
        }
    }
}

impl Serialize for PlaylistKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PlaylistKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A (year, month) pair, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Artwork reference of a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Image {
    /// Surface in pixels; unknown dimensions count as zero.
    pub fn area(&self) -> u64 {
        u64::from(self.width.unwrap_or(0)) * u64::from(self.height.unwrap_or(0))
    }
}

impl From<ImageObject> for Image {
    fn from(image: ImageObject) -> Self {
        Self {
            url: image.url,
            width: image.width,
            height: image.height,
        }
    }
}

/// The artwork list of a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Images(pub Vec<Image>);

impl Images {
    fn pick<K: Ord>(&self, key: impl Fn(&Image) -> K) -> Option<&Image> {
        // First image wins among equals
        self.0.iter().rev().max_by_key(|image| key(image))
    }

    pub fn biggest(&self) -> Option<&Image> {
        self.pick(Image::area)
    }

    pub fn largest(&self) -> Option<&Image> {
        self.pick(|image| image.width)
    }

    pub fn tallest(&self) -> Option<&Image> {
        self.pick(|image| image.height)
    }
}

/// A playlist as last seen on the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub playlist_id: String,
    pub name: String,
    pub user_id: String,
    pub external_url: String,
    #[serde(default)]
    pub images: Images,
    pub public: bool,
    /// Version token assigned by the remote service
    pub snapshot_id: Option<String>,
    pub nb_tracks: u32,
}

impl Playlist {
    /// Build a playlist from its API representation.
    pub fn from_api(playlist: PlaylistObject) -> Result<Self> {
        if playlist.object_type != "playlist" {
            return Err(FestuneError::Malformed(format!(
                "Object {} is a {}, not a playlist",
                playlist.id, playlist.object_type
            )));
        }

        Ok(Self {
            playlist_id: playlist.id,
            name: playlist.name,
            user_id: playlist.owner.id,
            external_url: playlist.external_urls.spotify.unwrap_or_default(),
            images: Images(
                playlist
                    .images
                    .unwrap_or_default()
                    .into_iter()
                    .map(Image::from)
                    .collect(),
            ),
            public: playlist.public.unwrap_or(false),
            snapshot_id: playlist.snapshot_id,
            nb_tracks: playlist.tracks.total,
        })
    }

    pub fn key(&self) -> PlaylistKey {
        PlaylistKey::new(&self.user_id, &self.playlist_id)
    }

    pub fn uri(&self) -> String {
        format!("spotify:user:{}:playlist:{}", self.user_id, self.playlist_id)
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Record for Playlist {
    const OBJECT_TYPE: &'static str = "playlist";

    /// `{user_id}-{playlist_id}`.
    ///
    /// Spotify playlist ids are base62 and never contain `-`, so the last
    /// `-` of a stem separates the two parts even when the user id has one.
    fn identity(&self) -> String {
        format!("{}-{}", self.user_id, self.playlist_id)
    }
}

/// A "Feston" playlist: one playlist per month, named after its month.
///
/// The period is parsed from the name whenever the value is built and cannot
/// be set otherwise. On disk a managed playlist is stored as its plain
/// [`Playlist`] record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedPlaylist {
    playlist: Playlist,
    period: YearMonth,
}

impl ManagedPlaylist {
    /// Parse the period out of a managed playlist name.
    ///
    /// ```rust
    /// use festune::{ManagedPlaylist, YearMonth};
    ///
    /// let period = ManagedPlaylist::parse_name("Playlist Feston d'Août '19").unwrap();
    /// assert_eq!(period, YearMonth::new(2019, 8));
    /// ```
    pub fn parse_name(name: &str) -> Result<YearMonth> {
        let captures = name_date_regex()
            .captures(name)
            .ok_or_else(|| FestuneError::malformed_name(name, "name does not match pattern"))?;

        let mut year: i32 = captures["year"]
            .parse()
            .map_err(|e| FestuneError::malformed_name(name, format!("invalid year: {e}")))?;
        if year < 100 {
            year += 2000;
        }

        let month_name = &captures["month_name"];
        let month = month_number_from(month_name).ok_or_else(|| {
            FestuneError::malformed_name(name, format!("Unknown month {month_name}"))
        })?;

        Ok(YearMonth::new(year, month))
    }

    /// Whether a playlist with this name should be managed.
    pub fn is_managed_name(name: &str) -> bool {
        name.starts_with(MANAGED_PREFIX)
            && !MANAGED_DENYLIST
                .iter()
                .any(|excluded| name.contains(excluded))
    }

    pub fn period(&self) -> YearMonth {
        self.period
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }
}

impl TryFrom<Playlist> for ManagedPlaylist {
    type Error = FestuneError;

    fn try_from(playlist: Playlist) -> Result<Self> {
        let period = Self::parse_name(&playlist.name)?;
        Ok(Self { playlist, period })
    }
}

impl std::ops::Deref for ManagedPlaylist {
    type Target = Playlist;

    fn deref(&self) -> &Playlist {
        &self.playlist
    }
}

impl fmt::Display for ManagedPlaylist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.playlist.name, self.period)
    }
}

impl Serialize for ManagedPlaylist {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.playlist.serialize(serializer)
    }
}

impl Record for ManagedPlaylist {
    const OBJECT_TYPE: &'static str = Playlist::OBJECT_TYPE;

    fn identity(&self) -> String {
        self.playlist.identity()
    }
}

/// The kinds of playlist a [`PlaylistIndex`](crate::PlaylistIndex) can hold.
pub trait PlaylistRecord: Record + Clone {
    /// Whether a remote playlist with this name belongs in the index.
    fn accepts(name: &str) -> bool;

    /// Build the record from a plain playlist, deriving whatever it needs.
    fn from_playlist(playlist: Playlist) -> Result<Self>;

    fn playlist(&self) -> &Playlist;

    /// Date key for date-ordered indexes.
    fn period(&self) -> Option<YearMonth> {
        None
    }

    fn key(&self) -> PlaylistKey {
        self.playlist().key()
    }

    fn snapshot_id(&self) -> Option<&str> {
        self.playlist().snapshot_id.as_deref()
    }

    fn from_api(playlist: PlaylistObject) -> Result<Self> {
        Self::from_playlist(Playlist::from_api(playlist)?)
    }
}

impl PlaylistRecord for Playlist {
    fn accepts(_name: &str) -> bool {
        true
    }

    fn from_playlist(playlist: Playlist) -> Result<Self> {
        Ok(playlist)
    }

    fn playlist(&self) -> &Playlist {
        self
    }
}

impl PlaylistRecord for ManagedPlaylist {
    fn accepts(name: &str) -> bool {
        Self::is_managed_name(name)
    }

    fn from_playlist(playlist: Playlist) -> Result<Self> {
        Self::try_from(playlist)
    }

    fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    fn period(&self) -> Option<YearMonth> {
        Some(self.period)
    }
}

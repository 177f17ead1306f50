use thiserror::Error;

/// Error types for festune operations.
///
/// This enum covers everything that can go wrong while mirroring playlists:
/// lookups of unknown identities, playlists or tracks the remote service
/// returned in an unexpected shape, network failures, and local persistence.
///
/// # Error Handling Examples
///
/// ```rust
/// use festune::{FestuneError, ManagedPlaylist};
///
/// match ManagedPlaylist::parse_name("Playlist Feston de Brumaire '21") {
///     Ok(period) => println!("Playlist for {period}"),
///     Err(FestuneError::MalformedName { name, reason }) => {
///         eprintln!("Cannot parse {name}: {reason}");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
///
/// None of the variants are retried. A failure during a reconciliation pass
/// aborts the pass; playlists refreshed before the failure stay persisted.
#[derive(Error, Debug)]
pub enum FestuneError {
    /// An identity is absent from an index or from the record store.
    ///
    /// Callers recover from this where they have a fallback, e.g. a playlist
    /// unknown locally is simply treated as stale.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A managed playlist name does not follow the naming pattern, or its
    /// month name is unknown.
    #[error("Failed to parse playlist name {name:?}: {reason}")]
    MalformedName {
        /// The full playlist name as returned by the remote service
        name: String,
        /// What part of the name could not be parsed
        reason: String,
    },

    /// The remote service returned an object that is not what was asked for,
    /// e.g. a playlist item whose type discriminator is not `track`.
    #[error("Malformed remote record: {0}")]
    Malformed(String),

    /// HTTP/network related errors.
    ///
    /// This includes connection failures, DNS errors, and other
    /// low-level networking issues.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The remote service answered with a non-success status.
    #[error("Spotify API error ({status}): {message}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Error message extracted from the response body
        message: String,
    },

    /// Failed to decode a response body from the remote service.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Missing or invalid settings, e.g. no access token available.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system I/O errors while reading or writing records.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted record could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FestuneError {
    /// Build a [`FestuneError::MalformedName`] for `name`.
    pub fn malformed_name(name: &str, reason: impl Into<String>) -> Self {
        FestuneError::MalformedName {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error reports a missing identity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FestuneError::NotFound(_))
    }
}

use crate::playlist::PlaylistKey;
use crate::store::RecordStore;
use crate::{FestuneError, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Name of the cached token file inside the data directory.
pub const TOKEN_FILE: &str = "spotify-token";

/// Runtime settings, read from the environment.
///
/// | Variable                    | Meaning                                   |
/// |-----------------------------|-------------------------------------------|
/// | `FESTUNE_DATA_DIR`          | Root of the record store                  |
/// | `FESTUNE_ACCESS_TOKEN`      | Spotify access token                      |
/// | `FESTUNE_ROTATING_PLAYLIST` | `user_id:playlist_id` of the rotating one |
///
/// Without `FESTUNE_ACCESS_TOKEN`, the token is read from the cached token
/// file `<data_dir>/spotify-token`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub access_token: Option<String>,
    pub rotating_playlist: Option<String>,
}

/// Cached token as written by the authorization flow.
#[derive(Debug, Deserialize)]
struct CachedToken {
    access_token: String,
    /// Unix timestamp in seconds
    #[serde(default)]
    expires_at: Option<i64>,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_dir = match lookup("FESTUNE_DATA_DIR").filter(|dir| !dir.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => Self::default_data_dir()?,
        };

        Ok(Self {
            data_dir,
            access_token: lookup("FESTUNE_ACCESS_TOKEN").filter(|token| !token.is_empty()),
            rotating_playlist: lookup("FESTUNE_ROTATING_PLAYLIST").filter(|key| !key.is_empty()),
        })
    }

    /// `~/.local/share/festune` on Linux, the platform equivalent elsewhere.
    pub fn default_data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| FestuneError::Config("Cannot determine data directory".to_string()))?;
        Ok(data_dir.join("festune"))
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn token_path(&self) -> PathBuf {
        self.data_dir.join(TOKEN_FILE)
    }

    pub fn store(&self) -> RecordStore {
        RecordStore::new(&self.data_dir)
    }

    /// The access token to use, from the environment or the cached token file.
    pub fn access_token(&self) -> Result<String> {
        if let Some(token) = &self.access_token {
            return Ok(token.clone());
        }

        let path = self.token_path();
        if !path.exists() {
            return Err(FestuneError::Config(format!(
                "No access token: set FESTUNE_ACCESS_TOKEN or create {}",
                path.display()
            )));
        }

        log::debug!("Reading access token from {}", path.display());
        let cached: CachedToken = serde_json::from_str(&fs::read_to_string(&path)?)?;

        if let Some(expires_at) = cached.expires_at {
            if expires_at <= chrono::Utc::now().timestamp() {
                return Err(FestuneError::Config(format!(
                    "Access token in {} has expired",
                    path.display()
                )));
            }
        }

        Ok(cached.access_token)
    }

    /// The rotating playlist, if one is configured.
    pub fn rotating_playlist(&self) -> Result<Option<PlaylistKey>> {
        self.rotating_playlist
            .as_deref()
            .map(str::parse::<PlaylistKey>)
            .transpose()
            .map_err(|e| FestuneError::Config(format!("FESTUNE_ROTATING_PLAYLIST: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_vars(|name| vars.get(name).cloned()).unwrap()
    }

    #[test]
    fn test_from_vars() {
        let settings = settings(&[
            ("FESTUNE_DATA_DIR", "/tmp/festune"),
            ("FESTUNE_ACCESS_TOKEN", "BQDtoken"),
            ("FESTUNE_ROTATING_PLAYLIST", "feston:rot1"),
        ]);

        assert_eq!(settings.data_dir, PathBuf::from("/tmp/festune"));
        assert_eq!(settings.access_token().unwrap(), "BQDtoken");
        assert_eq!(
            settings.rotating_playlist().unwrap(),
            Some(PlaylistKey::new("feston", "rot1"))
        );
        assert_eq!(settings.token_path(), PathBuf::from("/tmp/festune/spotify-token"));
    }

    #[test]
    fn test_invalid_rotating_playlist() {
        let settings = settings(&[
            ("FESTUNE_DATA_DIR", "/tmp/festune"),
            ("FESTUNE_ROTATING_PLAYLIST", "rot1"),
        ]);
        assert!(matches!(
            settings.rotating_playlist(),
            Err(FestuneError::Config(_))
        ));
    }

    #[test]
    fn test_token_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&[("FESTUNE_DATA_DIR", "/nowhere")]).with_data_dir(dir.path());

        assert!(matches!(settings.access_token(), Err(FestuneError::Config(_))));

        let future = chrono::Utc::now().timestamp() + 3600;
        fs::write(
            settings.token_path(),
            format!(r#"{{"access_token": "cached", "expires_at": {future}}}"#),
        )
        .unwrap();
        assert_eq!(settings.access_token().unwrap(), "cached");

        fs::write(
            settings.token_path(),
            r#"{"access_token": "stale", "expires_at": 1000}"#,
        )
        .unwrap();
        assert!(matches!(settings.access_token(), Err(FestuneError::Config(_))));
    }
}

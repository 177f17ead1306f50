use crate::api::{ErrorResponse, Page, PlaylistItem, PlaylistObject, SnapshotResponse};
use crate::headers;
use crate::r#trait::SpotifyClient;
use crate::{FestuneError, Result};
use async_trait::async_trait;
use http_client::{HttpClient, Request, Response};
use http_types::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Page size of `/me/playlists` (the API maximum)
const PLAYLISTS_PAGE_SIZE: u32 = 50;

/// Page size of `/playlists/{id}/tracks` (the API maximum)
const TRACKS_PAGE_SIZE: u32 = 100;

/// Client for the Spotify Web API.
///
/// The client is built around an already-issued access token; obtaining or
/// renewing one is left to the caller.
///
/// # Examples
///
/// ```rust,no_run
/// use festune::{PlaylistsIterator, AsyncPaginatedIterator, SpotifyWebClient, Result};
///
/// #[tokio::main]
/// async fn main() -> Result<()> {
///     let http_client = http_client::native::NativeClient::new();
///     let client = SpotifyWebClient::new(Box::new(http_client), "BQD...".to_string());
///
///     let mut playlists = PlaylistsIterator::new(&client);
///     while let Some(playlist) = playlists.next().await? {
///         println!("{}", playlist.name);
///     }
///     Ok(())
/// }
/// ```
pub struct SpotifyWebClient {
    client: Box<dyn HttpClient>,
    access_token: String,
    base_url: String,
}

#[derive(Serialize)]
struct UrisBody<'a> {
    uris: &'a [String],
}

impl SpotifyWebClient {
    /// Create a client talking to the public Spotify API.
    pub fn new(client: Box<dyn HttpClient>, access_token: String) -> Self {
        Self::with_base_url(client, access_token, "https://api.spotify.com/v1".to_string())
    }

    /// Create a client with a custom base URL.
    ///
    /// This is useful for testing against a local server.
    pub fn with_base_url(
        client: Box<dyn HttpClient>,
        access_token: String,
        base_url: String,
    ) -> Self {
        Self {
            client,
            access_token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        let url = format!("{}{path}", self.base_url);
        url.parse::<Url>()
            .map_err(|e| FestuneError::Http(format!("Invalid URL {url}: {e}")))
    }

    async fn send(&self, request: Request) -> Result<Response> {
        let method = request.method();
        let url = request.url().to_string();
        log::debug!("{method} {url}");

        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| FestuneError::Http(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.body_string().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|error| error.error.message)
            .unwrap_or(body);
        log::warn!("{method} {url} failed with {status}: {message}");

        Err(FestuneError::Api {
            status: u16::from(status),
            message,
        })
    }

    async fn json<T: DeserializeOwned>(mut response: Response) -> Result<T> {
        let body = response
            .body_string()
            .await
            .map_err(|e| FestuneError::Http(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| FestuneError::Parse(format!("{e}: {body}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let mut request = Request::new(Method::Get, self.url(path)?);
        headers::add_common_headers(&mut request, &self.access_token);

        Self::json(self.send(request).await?).await
    }

    async fn send_uris(&self, method: Method, playlist_id: &str, uris: &[String]) -> Result<String> {
        let path = format!("/playlists/{}/tracks", urlencoding::encode(playlist_id));
        let mut request = Request::new(method, self.url(&path)?);
        headers::add_json_headers(&mut request, &self.access_token);
        request.set_body(serde_json::to_string(&UrisBody { uris })?);

        let response: SnapshotResponse = Self::json(self.send(request).await?).await?;
        Ok(response.snapshot_id)
    }
}

#[async_trait(?Send)]
impl SpotifyClient for SpotifyWebClient {
    async fn get_current_user_playlists_page(&self, offset: u32) -> Result<Page<PlaylistObject>> {
        self.get_json(&format!(
            "/me/playlists?limit={PLAYLISTS_PAGE_SIZE}&offset={offset}"
        ))
        .await
    }

    async fn get_playlist(&self, user_id: &str, playlist_id: &str) -> Result<PlaylistObject> {
        log::debug!("Fetching playlist {user_id}:{playlist_id}");
        self.get_json(&format!("/playlists/{}", urlencoding::encode(playlist_id)))
            .await
    }

    async fn get_playlist_tracks_page(
        &self,
        _user_id: &str,
        playlist_id: &str,
        offset: u32,
    ) -> Result<Page<PlaylistItem>> {
        self.get_json(&format!(
            "/playlists/{}/tracks?limit={TRACKS_PAGE_SIZE}&offset={offset}",
            urlencoding::encode(playlist_id)
        ))
        .await
    }

    async fn replace_playlist_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<String> {
        self.send_uris(Method::Put, playlist_id, uris).await
    }

    async fn add_playlist_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<String> {
        self.send_uris(Method::Post, playlist_id, uris).await
    }
}

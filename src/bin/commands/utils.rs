use festune::{Settings, SpotifyWebClient};

/// Create an API client from the configured access token.
pub fn create_client(settings: &Settings) -> Result<SpotifyWebClient, Box<dyn std::error::Error>> {
    let access_token = settings.access_token()?;
    let http_client = http_client::native::NativeClient::new();
    Ok(SpotifyWebClient::new(Box::new(http_client), access_token))
}

use super::utils::create_client;
use festune::{
    refresh, rotation_uris, update_rotating_playlist, ManagedPlaylistIndex, Settings, TrackIndex,
};

/// Handle the rotate command
pub async fn handle_rotate(
    settings: &Settings,
    count: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(rotating) = settings.rotating_playlist()? else {
        return Err("FESTUNE_ROTATING_PLAYLIST is not set".into());
    };

    let client = create_client(settings)?;
    let mut playlists = ManagedPlaylistIndex::load(settings.store())?;
    let mut tracks = TrackIndex::load(settings.store())?;

    println!("🔄 Refreshing {} known playlists...", playlists.len());
    let refreshed = refresh(&client, &mut playlists, &mut tracks).await?;
    println!("📥 Refreshed {} playlists", refreshed.len());

    let uris = rotation_uris(&playlists, &tracks, count);
    println!(
        "🔁 Filling {rotating} with {} tracks from the last {count} months",
        uris.len()
    );

    let snapshot_id = update_rotating_playlist(&client, &rotating, &uris).await?;
    println!("✅ Rotating playlist updated (snapshot {snapshot_id})");
    Ok(())
}

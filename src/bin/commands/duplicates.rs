use super::utils::create_client;
use festune::{
    find_duplicates, refresh, ManagedPlaylist, Playlist, PlaylistIndex, PlaylistRecord, Settings,
    TrackIndex,
};

/// Handle the duplicates command
pub async fn handle_duplicates(
    settings: &Settings,
    all_playlists: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if all_playlists {
        report_duplicates::<Playlist>(settings).await
    } else {
        report_duplicates::<ManagedPlaylist>(settings).await
    }
}

async fn report_duplicates<P: PlaylistRecord>(
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = create_client(settings)?;
    let mut playlists = PlaylistIndex::<P>::load(settings.store())?;
    let mut tracks = TrackIndex::load(settings.store())?;

    println!("🔄 Refreshing {} known playlists...", playlists.len());
    let refreshed = refresh(&client, &mut playlists, &mut tracks).await?;

    if refreshed.is_empty() {
        println!("✅ Nothing changed since the last run");
        return Ok(());
    }

    for key in refreshed.playlists() {
        if let Some(playlist) = playlists.get(key) {
            println!("📥 Refreshed '{}'", playlist.playlist().name);
        }
    }

    let duplicates = find_duplicates(refreshed.touched_tracks(), &tracks);
    if duplicates.is_empty() {
        println!("✅ No duplicated track");
        return Ok(());
    }

    println!();
    println!("⚠️  {} tracks appear in several playlists:", duplicates.len());
    for duplicate in &duplicates {
        println!();
        println!("{}", duplicate.describe(&playlists));
    }

    Ok(())
}

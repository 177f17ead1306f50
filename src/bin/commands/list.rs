use chrono::Datelike;
use festune::{ManagedPlaylist, ManagedPlaylistIndex, Settings, YearMonth};

/// Handle the list command
pub fn handle_list(settings: &Settings, reverse: bool) -> Result<(), Box<dyn std::error::Error>> {
    let playlists = ManagedPlaylistIndex::load(settings.store())?;

    if playlists.is_empty() {
        println!("📭 No monthly playlist mirrored yet, run `festune duplicates` first");
        return Ok(());
    }

    let today = chrono::Local::now().date_naive();
    let current = YearMonth::new(today.year(), today.month());

    let ordered: Vec<&ManagedPlaylist> = if reverse {
        playlists.iter_rev().collect()
    } else {
        playlists.iter().collect()
    };

    for playlist in ordered {
        let marker = if playlist.period() == current { "▶" } else { " " };
        println!(
            "{marker} {}  {} ({} tracks)",
            playlist.period(),
            playlist.name,
            playlist.nb_tracks
        );
    }

    println!();
    println!("📋 {} monthly playlists", playlists.len());
    Ok(())
}

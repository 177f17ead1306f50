mod common;

use common::{key, store, FakeSpotify};
use festune::{find_duplicates, refresh, ManagedPlaylistIndex, Result, TrackIndex};
use std::collections::BTreeSet;

#[test_log::test(tokio::test)]
async fn test_track_in_two_playlists_is_reported() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let remote = FakeSpotify::new();
    let mut playlists = ManagedPlaylistIndex::load(store(&dir))?;
    let mut tracks = TrackIndex::load(store(&dir))?;

    remote.set_playlist("p1", "Playlist Feston de Mars '19", "s1", &["x", "y"]);
    refresh(&remote, &mut playlists, &mut tracks).await?;

    // Only p2 is refreshed by the second pass
    remote.set_playlist("p2", "Playlist Feston d'Avril '19", "s1", &["z", "x"]);
    let refreshed = refresh(&remote, &mut playlists, &mut tracks).await?;
    assert_eq!(refreshed.len(), 1);

    let duplicates = find_duplicates(refreshed.touched_tracks(), &tracks);
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].track.track_id, "x");
    assert_eq!(duplicates[0].playlists, BTreeSet::from([key("p1"), key("p2")]));

    let report = duplicates[0].describe(&playlists);
    assert!(report.contains("Playlist Feston de Mars '19 (#1)"));
    assert!(report.contains("Playlist Feston d'Avril '19 (#2)"));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_track_in_one_playlist_is_not_reported() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let remote = FakeSpotify::new();
    let mut playlists = ManagedPlaylistIndex::load(store(&dir))?;
    let mut tracks = TrackIndex::load(store(&dir))?;

    remote.set_playlist("p1", "Playlist Feston de Mars '19", "s1", &["x", "y"]);
    let refreshed = refresh(&remote, &mut playlists, &mut tracks).await?;

    assert!(find_duplicates(refreshed.touched_tracks(), &tracks).is_empty());
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_duplicate_gone_after_removal() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let remote = FakeSpotify::new();
    let mut playlists = ManagedPlaylistIndex::load(store(&dir))?;
    let mut tracks = TrackIndex::load(store(&dir))?;

    remote.set_playlist("p1", "Playlist Feston de Mars '19", "s1", &["x"]);
    remote.set_playlist("p2", "Playlist Feston d'Avril '19", "s1", &["x"]);
    let refreshed = refresh(&remote, &mut playlists, &mut tracks).await?;
    assert_eq!(find_duplicates(refreshed.touched_tracks(), &tracks).len(), 1);

    remote.set_playlist("p2", "Playlist Feston d'Avril '19", "s2", &["w"]);
    let refreshed = refresh(&remote, &mut playlists, &mut tracks).await?;

    assert!(find_duplicates(refreshed.touched_tracks(), &tracks).is_empty());
    // Checking every known track gives the same answer
    assert!(find_duplicates(tracks.iter(), &tracks).is_empty());
    Ok(())
}

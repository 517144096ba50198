//! Catalog and playlist seed files (JSON)

use crate::model::{PlaylistId, Song};
use crate::store::PlaylistStore;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A playlist as written in a seed file
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistSeed {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub songs: Vec<Song>,
}

/// Read the song catalog, keeping file order
pub fn load_catalog(path: &Path) -> Result<Vec<Song>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open catalog: {:?}", path))?;
    let songs: Vec<Song> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse catalog: {:?}", path))?;

    log::info!("Loaded {} songs from {:?}", songs.len(), path);
    Ok(songs)
}

/// Read playlist seeds
pub fn load_playlist_seeds(path: &Path) -> Result<Vec<PlaylistSeed>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open playlists: {:?}", path))?;
    let seeds: Vec<PlaylistSeed> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse playlists: {:?}", path))?;

    log::info!("Loaded {} playlist(s) from {:?}", seeds.len(), path);
    Ok(seeds)
}

/// Create one playlist per seed and fill it
///
/// Songs repeated within a seed are added once. Returns the new playlist ids
/// in seed order.
pub fn populate_store(store: &mut PlaylistStore, seeds: &[PlaylistSeed]) -> Result<Vec<PlaylistId>> {
    let mut ids = Vec::with_capacity(seeds.len());

    for seed in seeds {
        let id = store
            .create_playlist(&seed.name, seed.description.as_deref())
            .with_context(|| format!("Failed to create playlist {:?}", seed.name))?
            .id();

        let mut skipped = 0;
        for song in &seed.songs {
            if !store.add_existing(id, song)? {
                skipped += 1;
            }
        }
        if skipped > 0 {
            log::warn!(
                "Playlist '{}': skipped {} duplicate song(s)",
                seed.name,
                skipped
            );
        }
        ids.push(id);
    }

    Ok(ids)
}

//! The library engine: playlists, indexes and history in one place

use crate::config::EngineConfig;
use crate::history::RecentPlayStack;
use crate::index::{RatingIndex, SongIndex};
use crate::model::Song;
use crate::similarity::{MergeSuggestion, SimilarityDetector};
use crate::store::PlaylistStore;

/// Owns every component of the library
///
/// The catalog is fixed at construction; playlists and history change
/// through the engine.
#[derive(Debug, Clone)]
pub struct LibraryEngine {
    config: EngineConfig,
    playlists: PlaylistStore,
    index: SongIndex,
    ratings: RatingIndex,
    history: RecentPlayStack,
    similarity: SimilarityDetector,
}

impl LibraryEngine {
    /// Build the indexes over `catalog`
    pub fn new(config: EngineConfig, catalog: Vec<Song>) -> Self {
        let mut ratings = RatingIndex::new();
        ratings.build_from_songs(catalog.iter().cloned());
        let index = SongIndex::build(catalog, &config);
        let history = RecentPlayStack::with_capacity(config.recent_capacity);

        log::info!(
            "Library engine ready: {} songs, rating tree height {}",
            index.len(),
            ratings.height()
        );

        Self {
            config,
            playlists: PlaylistStore::new(),
            index,
            ratings,
            history,
            similarity: SimilarityDetector::new(),
        }
    }

    /// Ranked catalog search
    pub fn search(&self, term: &str) -> Vec<Song> {
        self.index.search(term)
    }

    /// Catalog songs rated at least `threshold`, highest first
    pub fn songs_rated_at_least(&self, threshold: f64) -> Vec<Song> {
        self.ratings.songs_above_or_equal(threshold)
    }

    /// Record that `song` was played
    pub fn play(&mut self, song: Song) {
        log::debug!("Playing '{} - {}'", song.artist, song.title);
        self.history.push(song);
    }

    pub fn last_played(&self) -> Option<&Song> {
        self.history.peek()
    }

    /// Merge suggestions for the current playlists at the configured threshold
    pub fn merge_suggestions(&mut self) -> Vec<MergeSuggestion> {
        self.merge_suggestions_at(self.config.merge_threshold)
    }

    /// Merge suggestions for the current playlists at `threshold_percent`
    pub fn merge_suggestions_at(&mut self, threshold_percent: f64) -> Vec<MergeSuggestion> {
        self.similarity.rebuild(self.playlists.playlists());
        self.similarity.suggest_merges(threshold_percent)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn playlists(&self) -> &PlaylistStore {
        &self.playlists
    }

    pub fn playlists_mut(&mut self) -> &mut PlaylistStore {
        &mut self.playlists
    }

    pub fn index(&self) -> &SongIndex {
        &self.index
    }

    pub fn ratings(&self) -> &RatingIndex {
        &self.ratings
    }

    pub fn history(&self) -> &RecentPlayStack {
        &self.history
    }

    /// Similarity state as of the last merge query
    pub fn similarity(&self) -> &SimilarityDetector {
        &self.similarity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Song> {
        vec![
            Song::new("Tum Hi Ho", "Arijit Singh", "4:22").with_rating(4.9),
            Song::new("Kesariya", "Arijit Singh", "4:28").with_rating(4.2),
            Song::new("Kal Ho Naa Ho", "Sonu Nigam", "5:21").with_rating(4.7),
        ]
    }

    #[test]
    fn test_engine_creation() {
        let engine = LibraryEngine::new(EngineConfig::default(), catalog());
        assert_eq!(engine.index().len(), 3);
        assert_eq!(engine.ratings().len(), 3);
        assert!(engine.playlists().is_empty());
        assert!(engine.last_played().is_none());
    }

    #[test]
    fn test_queries_delegate() {
        let engine = LibraryEngine::new(EngineConfig::default(), catalog());
        assert_eq!(engine.search("kesariya")[0].title, "Kesariya");
        let top: Vec<String> = engine
            .songs_rated_at_least(4.5)
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(top, vec!["Tum Hi Ho", "Kal Ho Naa Ho"]);
    }

    #[test]
    fn test_history_uses_configured_capacity() {
        let config = EngineConfig::default().with_recent_capacity(2);
        let mut engine = LibraryEngine::new(config, catalog());
        for song in catalog() {
            engine.play(song);
        }
        assert_eq!(engine.history().len(), 2);
        assert_eq!(engine.last_played().unwrap().title, "Kal Ho Naa Ho");
    }

    #[test]
    fn test_merge_suggestions_follow_playlists() {
        let mut engine = LibraryEngine::new(EngineConfig::default(), catalog());
        let songs = catalog();

        let store = engine.playlists_mut();
        let a = store.create_playlist("A", None).unwrap().id();
        let b = store.create_playlist("B", None).unwrap().id();
        for song in &songs {
            store.add_existing(a, song).unwrap();
            store.add_existing(b, song).unwrap();
        }
        assert_eq!(engine.merge_suggestions().len(), 1);

        engine.playlists_mut().delete_song(b, 0).unwrap();
        engine.playlists_mut().delete_song(b, 0).unwrap();
        // 1 of 1 still overlaps fully by the smaller-set measure
        assert_eq!(engine.merge_suggestions()[0].jaccard, 0.33);

        engine.playlists_mut().delete_playlist(b).unwrap();
        assert!(engine.merge_suggestions_at(0.0).is_empty());
        assert_eq!(engine.similarity().len(), 1);
    }
}

//! Multi-key search index over the song catalog
//!
//! Four lookup tables are built once from the catalog: exact title, artist,
//! album/movie and keyword token. A search gathers candidates from all of them,
//! scores each candidate, and returns the best matches first.

use crate::config::EngineConfig;
use crate::model::Song;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A search result with its relevance score
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    pub song: &'a Song,
    pub score: u32,
}

/// Size of each lookup table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub total_songs: usize,
    pub unique_titles: usize,
    pub unique_artists: usize,
    pub unique_albums: usize,
    pub unique_keywords: usize,
}

/// Read-only search index; the catalog it owns never changes after `build`
#[derive(Debug, Clone)]
pub struct SongIndex {
    catalog: Vec<Song>,
    by_title: HashMap<String, usize>,
    /// Distinct normalized titles in first-seen order
    titles: Vec<String>,
    by_artist: HashMap<String, Vec<usize>>,
    by_album: HashMap<String, Vec<usize>>,
    by_keyword: HashMap<String, Vec<usize>>,
    search_limit: usize,
    min_keyword_len: usize,
}

impl SongIndex {
    /// Index `catalog` with default limits
    pub fn new(catalog: Vec<Song>) -> Self {
        Self::build(catalog, &EngineConfig::default())
    }

    /// Index `catalog` using the search limits from `config`
    pub fn build(catalog: Vec<Song>, config: &EngineConfig) -> Self {
        let mut index = Self {
            catalog: Vec::new(),
            by_title: HashMap::new(),
            titles: Vec::new(),
            by_artist: HashMap::new(),
            by_album: HashMap::new(),
            by_keyword: HashMap::new(),
            search_limit: config.search_limit,
            min_keyword_len: config.min_keyword_len,
        };

        for (position, song) in catalog.iter().enumerate() {
            index.add_to_tables(position, song);
        }
        index.catalog = catalog;

        let stats = index.stats();
        log::info!(
            "Indexed {} songs ({} artists, {} albums, {} keywords)",
            stats.total_songs,
            stats.unique_artists,
            stats.unique_albums,
            stats.unique_keywords
        );
        index
    }

    fn add_to_tables(&mut self, position: usize, song: &Song) {
        let title = normalize(&song.title);
        let artist = normalize(&song.artist);
        let album = song.album.as_deref().map(normalize).unwrap_or_default();

        {
            let mut keywords = HashSet::new();
            for word in title
                .split_whitespace()
                .chain(artist.split_whitespace())
                .chain(album.split_whitespace())
            {
                if word.chars().count() >= self.min_keyword_len && keywords.insert(word) {
                    self.by_keyword
                        .entry(word.to_string())
                        .or_default()
                        .push(position);
                }
            }
        }

        // Later entries with the same title replace earlier ones.
        if self.by_title.insert(title.clone(), position).is_none() {
            self.titles.push(title);
        }
        self.by_artist.entry(artist).or_default().push(position);
        if !album.is_empty() {
            self.by_album.entry(album).or_default().push(position);
        }
    }

    /// Ranked search over titles, artists, albums and keywords
    pub fn search(&self, term: &str) -> Vec<Song> {
        self.search_scored(term)
            .into_iter()
            .map(|hit| hit.song.clone())
            .collect()
    }

    /// Like [`search`](Self::search), keeping each result's score
    pub fn search_scored(&self, term: &str) -> Vec<SearchHit<'_>> {
        let term = normalize(term);
        if term.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit<'_>> = self
            .candidates(&term)
            .into_iter()
            .map(|position| {
                let song = &self.catalog[position];
                SearchHit {
                    song,
                    score: score(song, &term),
                }
            })
            .collect();

        // Stable: equal scores stay in discovery order.
        hits.sort_by(|a, b| b.score.cmp(&a.score));
        hits.truncate(self.search_limit);

        log::debug!("Search '{}' matched {} song(s)", term, hits.len());
        hits
    }

    /// Catalog positions matching `term`, deduplicated, in discovery order
    fn candidates(&self, term: &str) -> Vec<usize> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        let mut push = |position: usize| {
            if seen.insert(position) {
                found.push(position);
            }
        };

        if let Some(&position) = self.by_title.get(term) {
            push(position);
        }

        for title in self.titles.iter().filter(|title| title.contains(term)) {
            if let Some(&position) = self.by_title.get(title) {
                push(position);
            }
        }

        for table in [&self.by_artist, &self.by_album] {
            for &position in table.get(term).into_iter().flatten() {
                push(position);
            }
        }

        for word in term
            .split_whitespace()
            .filter(|word| word.chars().count() >= self.min_keyword_len)
        {
            for &position in self.by_keyword.get(word).into_iter().flatten() {
                push(position);
            }
        }

        found
    }

    /// Song whose title matches exactly (case-insensitive)
    pub fn song_by_title(&self, title: &str) -> Option<&Song> {
        self.by_title
            .get(&normalize(title))
            .map(|&position| &self.catalog[position])
    }

    /// All songs by an artist, in catalog order
    pub fn songs_by_artist(&self, artist: &str) -> Vec<&Song> {
        self.lookup(&self.by_artist, artist)
    }

    /// All songs from an album or movie, in catalog order
    pub fn songs_by_album(&self, album: &str) -> Vec<&Song> {
        self.lookup(&self.by_album, album)
    }

    fn lookup(&self, table: &HashMap<String, Vec<usize>>, key: &str) -> Vec<&Song> {
        table
            .get(&normalize(key))
            .map(|positions| positions.iter().map(|&p| &self.catalog[p]).collect())
            .unwrap_or_default()
    }

    /// The indexed catalog, in input order
    pub fn catalog(&self) -> &[Song] {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            total_songs: self.catalog.len(),
            unique_titles: self.by_title.len(),
            unique_artists: self.by_artist.len(),
            unique_albums: self.by_album.len(),
            unique_keywords: self.by_keyword.len(),
        }
    }
}

/// Relevance of `song` for a search term
pub fn relevance(song: &Song, term: &str) -> u32 {
    score(song, &normalize(term))
}

/// Score against an already-normalized term
fn score(song: &Song, term: &str) -> u32 {
    let title = normalize(&song.title);
    let artist = normalize(&song.artist);
    let album = song.album.as_deref().map(normalize).unwrap_or_default();

    let title_score = if title == term {
        100
    } else if title.starts_with(term) {
        50
    } else if title.contains(term) {
        30
    } else {
        0
    };

    let artist_score = if artist == term {
        40
    } else if artist.contains(term) {
        20
    } else {
        0
    };

    let album_score = if album == term {
        30
    } else if album.contains(term) {
        15
    } else {
        0
    };

    title_score + artist_score + album_score
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

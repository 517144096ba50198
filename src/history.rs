//! Recently played songs

use crate::model::Song;
use std::collections::VecDeque;

/// Default number of songs kept in the history
pub const DEFAULT_CAPACITY: usize = 10;

/// Bounded play history, most recent first, one entry per song id
#[derive(Debug, Clone)]
pub struct RecentPlayStack {
    songs: VecDeque<Song>,
    capacity: usize,
}

impl RecentPlayStack {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            songs: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a play; an earlier entry for the same song moves to the top
    pub fn push(&mut self, song: Song) {
        self.songs.retain(|s| s.id != song.id);
        self.songs.push_front(song);
        self.songs.truncate(self.capacity);
    }

    /// Most recently played song
    pub fn peek(&self) -> Option<&Song> {
        self.songs.front()
    }

    /// Snapshot of the history, most recent first
    pub fn songs(&self) -> Vec<Song> {
        self.songs.iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.songs.clear();
    }
}

impl Default for RecentPlayStack {
    fn default() -> Self {
        Self::new()
    }
}

//! Playlist overlap detection and merge suggestions
//!
//! Playlists are compared by their membership keys (lowercase title and
//! artist), so two entries of the same song added separately still count as
//! shared.

use crate::model::{MembershipKey, Playlist, PlaylistId};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Overlap at or above which a pair counts as highly similar
const HIGH_OVERLAP: f64 = 80.0;
/// Overlap at or above which a pair counts as moderately similar
const MEDIUM_OVERLAP: f64 = 50.0;

/// Two playlists that share enough songs to be merged
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeSuggestion {
    pub first: PlaylistId,
    pub second: PlaylistId,
    /// Shared songs as a percentage of the smaller playlist, two decimals
    pub overlap_percent: f64,
    /// Shared songs over all distinct songs, two decimals
    pub jaccard: f64,
    pub shared_songs: usize,
    pub total_unique_songs: usize,
    pub first_size: usize,
    pub second_size: usize,
    /// Keys present in both playlists, sorted
    pub shared: Vec<MembershipKey>,
}

/// Full comparison of one playlist pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairAnalysis {
    #[serde(flatten)]
    pub summary: MergeSuggestion,
    pub unique_to_first: Vec<MembershipKey>,
    pub unique_to_second: Vec<MembershipKey>,
}

/// How similar the playlists are overall
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityStats {
    pub total_playlists: usize,
    pub total_comparisons: usize,
    /// Pairs with overlap >= 80%
    pub high: usize,
    /// Pairs with overlap in [50%, 80%)
    pub medium: usize,
    /// Pairs with overlap < 50%
    pub low: usize,
    /// `high` as a percentage of all comparisons, 0 when there are none
    pub high_percent: f64,
}

/// Membership sets of a batch of playlists
///
/// State is replaced wholesale by [`rebuild`](Self::rebuild); it does not
/// follow later playlist edits.
#[derive(Debug, Clone, Default)]
pub struct SimilarityDetector {
    sets: Vec<(PlaylistId, HashSet<MembershipKey>)>,
    owners: HashMap<MembershipKey, HashSet<PlaylistId>>,
}

impl SimilarityDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the previous state and record `playlists`
    ///
    /// One entry per playlist id: a repeated id replaces the earlier keys and
    /// keeps the position of its first appearance.
    pub fn rebuild<'a, I>(&mut self, playlists: I)
    where
        I: IntoIterator<Item = &'a Playlist>,
    {
        self.sets.clear();
        self.owners.clear();

        let mut positions: HashMap<PlaylistId, usize> = HashMap::new();
        for playlist in playlists {
            let keys: HashSet<MembershipKey> = playlist
                .songs()
                .iter()
                .map(|song| song.membership_key())
                .collect();

            match positions.get(&playlist.id()) {
                Some(&position) => {
                    log::debug!("Playlist {} given twice; keeping the later one", playlist.id());
                    self.sets[position].1 = keys;
                }
                None => {
                    positions.insert(playlist.id(), self.sets.len());
                    self.sets.push((playlist.id(), keys));
                }
            }
        }

        for (id, keys) in &self.sets {
            for key in keys {
                self.owners.entry(key.clone()).or_default().insert(*id);
            }
        }

        log::debug!(
            "Similarity state rebuilt: {} playlists, {} distinct songs",
            self.sets.len(),
            self.owners.len()
        );
    }

    /// Playlist pairs whose overlap is at least `threshold_percent`
    ///
    /// Highest overlap first; equal overlaps keep pair order.
    pub fn suggest_merges(&self, threshold_percent: f64) -> Vec<MergeSuggestion> {
        let mut suggestions = Vec::new();

        for (i, (first, a)) in self.sets.iter().enumerate() {
            for (second, b) in &self.sets[i + 1..] {
                if overlap_percent(a, b) >= threshold_percent {
                    suggestions.push(summarize(*first, a, *second, b));
                }
            }
        }

        suggestions.sort_by(|x, y| y.overlap_percent.total_cmp(&x.overlap_percent));
        log::debug!(
            "{} merge suggestion(s) at {}% overlap",
            suggestions.len(),
            threshold_percent
        );
        suggestions
    }

    /// Detailed comparison of two recorded playlists
    pub fn analyze_pair(&self, first: PlaylistId, second: PlaylistId) -> Option<PairAnalysis> {
        let a = self.set(first)?;
        let b = self.set(second)?;

        Some(PairAnalysis {
            summary: summarize(first, a, second, b),
            unique_to_first: sorted(a.difference(b)),
            unique_to_second: sorted(b.difference(a)),
        })
    }

    /// Overlap distribution over every pair
    pub fn statistics(&self) -> SimilarityStats {
        let n = self.sets.len();
        let total_comparisons = n * n.saturating_sub(1) / 2;
        let (mut high, mut medium, mut low) = (0, 0, 0);

        for (i, (_, a)) in self.sets.iter().enumerate() {
            for (_, b) in &self.sets[i + 1..] {
                let overlap = overlap_percent(a, b);
                if overlap >= HIGH_OVERLAP {
                    high += 1;
                } else if overlap >= MEDIUM_OVERLAP {
                    medium += 1;
                } else {
                    low += 1;
                }
            }
        }

        let high_percent = if total_comparisons == 0 {
            0.0
        } else {
            high as f64 / total_comparisons as f64 * 100.0
        };

        SimilarityStats {
            total_playlists: n,
            total_comparisons,
            high,
            medium,
            low,
            high_percent,
        }
    }

    /// Recorded playlists holding a song, in rebuild order
    pub fn playlists_containing(&self, key: &MembershipKey) -> Vec<PlaylistId> {
        let Some(owners) = self.owners.get(key) else {
            return Vec::new();
        };
        self.sets
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| owners.contains(id))
            .collect()
    }

    /// Number of playlists recorded by the last rebuild
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    fn set(&self, id: PlaylistId) -> Option<&HashSet<MembershipKey>> {
        self.sets
            .iter()
            .find(|(playlist_id, _)| *playlist_id == id)
            .map(|(_, keys)| keys)
    }
}

/// Shared items as a percentage of the smaller set
///
/// Two empty sets overlap fully; an empty and a non-empty set not at all.
pub fn overlap_percent<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => 100.0,
        (true, false) | (false, true) => 0.0,
        (false, false) => {
            let smaller = a.len().min(b.len());
            intersection_len(a, b) as f64 / smaller as f64 * 100.0
        }
    }
}

/// Jaccard similarity: intersection size over union size
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.0,
        (false, false) => {
            let shared = intersection_len(a, b);
            shared as f64 / (a.len() + b.len() - shared) as f64
        }
    }
}

fn intersection_len<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> usize {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().filter(|item| large.contains(item)).count()
}

fn summarize(
    first: PlaylistId,
    a: &HashSet<MembershipKey>,
    second: PlaylistId,
    b: &HashSet<MembershipKey>,
) -> MergeSuggestion {
    let shared = sorted(a.intersection(b));
    MergeSuggestion {
        first,
        second,
        overlap_percent: round2(overlap_percent(a, b)),
        jaccard: round2(jaccard(a, b)),
        shared_songs: shared.len(),
        total_unique_songs: a.len() + b.len() - shared.len(),
        first_size: a.len(),
        second_size: b.len(),
        shared,
    }
}

fn sorted<'a>(keys: impl Iterator<Item = &'a MembershipKey>) -> Vec<MembershipKey> {
    let mut keys: Vec<MembershipKey> = keys.cloned().collect();
    keys.sort();
    keys
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

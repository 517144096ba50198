//! Rating-ordered binary search tree
//!
//! Ratings equal to a node's go to its left subtree. The tree is never
//! rebalanced, so its shape follows insertion order: inserting songs in
//! strictly increasing rating order produces a right-leaning chain.
//! Insertion and traversals are iterative, so deep trees are fine.

use crate::model::Song;

#[derive(Debug, Clone)]
struct RatingNode {
    song: Song,
    rating: f64,
    left: Option<usize>,
    right: Option<usize>,
}

/// Songs keyed by rating for "at least N stars" queries
#[derive(Debug, Clone, Default)]
pub struct RatingIndex {
    nodes: Vec<RatingNode>,
    root: Option<usize>,
}

impl RatingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one song, keyed by its rating
    pub fn insert(&mut self, song: Song) {
        let rating = song.rating;
        let slot = self.nodes.len();
        self.nodes.push(RatingNode {
            song,
            rating,
            left: None,
            right: None,
        });

        let Some(mut current) = self.root else {
            self.root = Some(slot);
            return;
        };

        loop {
            let node = &mut self.nodes[current];
            let child = if rating <= node.rating {
                &mut node.left
            } else {
                &mut node.right
            };
            match *child {
                Some(next) => current = next,
                None => {
                    *child = Some(slot);
                    return;
                }
            }
        }
    }

    /// Replace the tree with `songs`, inserted in the given order
    pub fn build_from_songs<I>(&mut self, songs: I)
    where
        I: IntoIterator<Item = Song>,
    {
        self.clear();
        for song in songs {
            self.insert(song);
        }
        log::debug!(
            "Built rating index: {} songs, height {}",
            self.len(),
            self.height()
        );
    }

    /// Songs rated at least `threshold`, highest rating first
    pub fn songs_above_or_equal(&self, threshold: f64) -> Vec<Song> {
        let mut result = Vec::new();
        let mut stack = Vec::new();
        let mut current = self.root;

        // Reverse in-order: right subtree, node, left subtree.
        loop {
            while let Some(slot) = current {
                stack.push(slot);
                current = self.nodes[slot].right;
            }
            let Some(slot) = stack.pop() else {
                break;
            };

            let node = &self.nodes[slot];
            if node.rating >= threshold {
                result.push(node.song.clone());
                current = node.left;
            } else {
                // Everything on the left is rated no higher than this node.
                current = None;
            }
        }

        result
    }

    /// Every song, lowest rating first
    pub fn all_songs(&self) -> Vec<Song> {
        let mut result = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut current = self.root;

        loop {
            while let Some(slot) = current {
                stack.push(slot);
                current = self.nodes[slot].left;
            }
            let Some(slot) = stack.pop() else {
                break;
            };
            result.push(self.nodes[slot].song.clone());
            current = self.nodes[slot].right;
        }

        result
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|slot| (slot, 1)).into_iter().collect();

        while let Some((slot, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[slot];
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }

        height
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated(title: &str, rating: f64) -> Song {
        Song::new(title, "Test Artist", "3:00").with_rating(rating)
    }

    fn ratings(songs: &[Song]) -> Vec<f64> {
        songs.iter().map(|s| s.rating).collect()
    }

    #[test]
    fn test_threshold_query() {
        let mut index = RatingIndex::new();
        index.build_from_songs(vec![
            rated("a", 4.9),
            rated("b", 4.2),
            rated("c", 4.7),
            rated("d", 4.1),
        ]);
        let result = index.songs_above_or_equal(4.5);
        assert_eq!(ratings(&result), vec![4.9, 4.7]);
        assert_eq!(result[0].title, "a");
        assert_eq!(result[1].title, "c");
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut index = RatingIndex::new();
        index.build_from_songs(vec![rated("a", 4.0), rated("b", 3.9), rated("c", 4.0)]);
        assert_eq!(ratings(&index.songs_above_or_equal(4.0)), vec![4.0, 4.0]);
    }

    #[test]
    fn test_ties_go_left() {
        let mut index = RatingIndex::new();
        index.build_from_songs(vec![rated("first", 4.0), rated("second", 4.0)]);
        let root = index.root.unwrap();
        assert_eq!(index.nodes[root].left, Some(1));
        assert_eq!(index.nodes[root].right, None);

        // The later tie sits lower-left, so descending output lists the root first.
        let titles: Vec<String> = index
            .songs_above_or_equal(0.0)
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn test_matches_filter_for_any_order() {
        let values = [3.5, 4.8, 1.0, 4.8, 2.2, 5.0, 0.0, 3.9, 4.1, 2.2];
        // Rotations of the input give different tree shapes.
        for shift in 0..values.len() {
            let mut order = values.to_vec();
            order.rotate_left(shift);
            let mut index = RatingIndex::new();
            index.build_from_songs(order.iter().map(|&r| rated("song", r)));

            for threshold in [0.0, 1.0, 2.2, 3.0, 4.8, 5.0, 5.1] {
                let mut expected: Vec<f64> =
                    order.iter().copied().filter(|&r| r >= threshold).collect();
                expected.sort_by(|a, b| b.total_cmp(a));
                assert_eq!(
                    ratings(&index.songs_above_or_equal(threshold)),
                    expected,
                    "shift {} threshold {}",
                    shift,
                    threshold
                );
            }
        }
    }

    #[test]
    fn test_increasing_ratings_degenerate_into_a_chain() {
        let mut index = RatingIndex::new();
        index.build_from_songs((0..50).map(|i| rated("song", i as f64 / 10.0)));
        assert_eq!(index.height(), 50);
        assert_eq!(index.songs_above_or_equal(4.8).len(), 2);
    }

    #[test]
    fn test_deep_tree_does_not_overflow() {
        let mut index = RatingIndex::new();
        index.build_from_songs((0..10_000).map(|i| rated("song", i as f64)));
        assert_eq!(index.songs_above_or_equal(9_990.0).len(), 10);
        assert_eq!(index.all_songs().len(), 10_000);
    }

    #[test]
    fn test_all_songs_ascending() {
        let mut index = RatingIndex::new();
        index.build_from_songs(vec![rated("a", 3.0), rated("b", 1.0), rated("c", 5.0)]);
        assert_eq!(ratings(&index.all_songs()), vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_rebuild_clears_previous_songs() {
        let mut index = RatingIndex::new();
        index.build_from_songs(vec![rated("a", 3.0)]);
        index.build_from_songs(vec![rated("b", 4.0), rated("c", 2.0)]);
        assert_eq!(index.len(), 2);
        assert_eq!(ratings(&index.all_songs()), vec![2.0, 4.0]);
    }

    #[test]
    fn test_empty_index() {
        let index = RatingIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.height(), 0);
        assert!(index.songs_above_or_equal(0.0).is_empty());
    }
}

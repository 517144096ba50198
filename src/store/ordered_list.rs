//! Ordered song list backed by an index arena
//!
//! Nodes live in a `Vec` and refer to their neighbours by slot index, so the
//! list has doubly-linked semantics (O(1) append and head/tail access, O(n)
//! positional edits) without shared ownership between nodes. Slots freed by
//! removals are recycled through a free list.

use crate::error::{LibraryError, Result};
use crate::model::{MembershipKey, Song, SongId};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone)]
struct Node {
    song: Song,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Mutable, order-preserving collection of songs
#[derive(Debug, Clone, Default)]
pub struct OrderedSongList {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl OrderedSongList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of songs in the list
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn first(&self) -> Option<&Song> {
        self.head.map(|slot| &self.node(slot).song)
    }

    pub fn last(&self) -> Option<&Song> {
        self.tail.map(|slot| &self.node(slot).song)
    }

    /// Add a song to the end of the list
    pub fn append(&mut self, song: Song) -> &Song {
        let slot = self.alloc(song);
        self.link_before(slot, None);
        &self.node(slot).song
    }

    /// Insert a song so that it ends up at position `index`
    ///
    /// `index == len()` appends.
    pub fn insert_at(&mut self, index: usize, song: Song) -> Result<()> {
        if index > self.len {
            return Err(self.out_of_range(index));
        }
        let before = self.slot_at(index);
        let slot = self.alloc(song);
        self.link_before(slot, before);
        Ok(())
    }

    /// Remove and return the song at `index`
    pub fn remove_at(&mut self, index: usize) -> Result<Song> {
        let slot = self
            .slot_at(index)
            .ok_or_else(|| self.out_of_range(index))?;
        self.unlink(slot);
        Ok(self.release(slot))
    }

    /// Move the song at `from` so that it ends up at position `to`
    ///
    /// Both indices must address existing songs. On error the list is left
    /// untouched.
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<()> {
        if from >= self.len {
            return Err(self.out_of_range(from));
        }
        if to >= self.len {
            return Err(self.out_of_range(to));
        }
        if from == to {
            return Ok(());
        }

        let slot = self.slot_at(from).ok_or_else(|| self.out_of_range(from))?;
        self.unlink(slot);
        // After unlinking, `to == len` means the end of the list.
        let before = self.slot_at(to);
        self.link_before(slot, before);
        Ok(())
    }

    /// Reverse the list in place
    pub fn reverse(&mut self) {
        if self.len <= 1 {
            return;
        }

        let mut current = self.head;
        while let Some(slot) = current {
            let node = self.node_mut(slot);
            std::mem::swap(&mut node.prev, &mut node.next);
            current = node.prev;
        }
        std::mem::swap(&mut self.head, &mut self.tail);
    }

    /// Song at position `index`
    pub fn at(&self, index: usize) -> Result<&Song> {
        self.slot_at(index)
            .map(|slot| &self.node(slot).song)
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Snapshot of the songs in list order
    pub fn to_vec(&self) -> Vec<Song> {
        self.iter().cloned().collect()
    }

    /// Iterate front to back (or back to front with `.rev()`)
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Remove every song
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Find a song by identifier, returning its position
    pub fn find_by_id(&self, id: &SongId) -> Option<(usize, &Song)> {
        self.iter().enumerate().find(|(_, song)| song.id == *id)
    }

    /// Find the first song with the given membership key
    pub fn find_by_key(&self, key: &MembershipKey) -> Option<(usize, &Song)> {
        self.iter()
            .enumerate()
            .find(|(_, song)| song.membership_key() == *key)
    }

    fn out_of_range(&self, index: usize) -> LibraryError {
        LibraryError::IndexOutOfRange {
            index,
            len: self.len,
        }
    }

    fn node(&self, slot: usize) -> &Node {
        match &self.nodes[slot] {
            Some(node) => node,
            None => unreachable!("slot {slot} is linked but vacant"),
        }
    }

    fn node_mut(&mut self, slot: usize) -> &mut Node {
        match &mut self.nodes[slot] {
            Some(node) => node,
            None => unreachable!("slot {slot} is linked but vacant"),
        }
    }

    fn alloc(&mut self, song: Song) -> usize {
        let node = Some(Node {
            song,
            prev: None,
            next: None,
        });
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, slot: usize) -> Song {
        self.free.push(slot);
        match self.nodes[slot].take() {
            Some(node) => node.song,
            None => unreachable!("slot {slot} released twice"),
        }
    }

    /// Arena slot of the song at `index`, walking from the nearer end
    fn slot_at(&self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }

        if index <= self.len / 2 {
            let mut current = self.head;
            for _ in 0..index {
                current = current.and_then(|slot| self.node(slot).next);
            }
            current
        } else {
            let mut current = self.tail;
            for _ in 0..(self.len - 1 - index) {
                current = current.and_then(|slot| self.node(slot).prev);
            }
            current
        }
    }

    fn unlink(&mut self, slot: usize) {
        let (prev, next) = {
            let node = self.node_mut(slot);
            (node.prev.take(), node.next.take())
        };

        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
    }

    /// Link `slot` in front of `before`, or at the tail when `before` is None
    fn link_before(&mut self, slot: usize, before: Option<usize>) {
        let prev = match before {
            Some(b) => self.node(b).prev,
            None => self.tail,
        };

        {
            let node = self.node_mut(slot);
            node.prev = prev;
            node.next = before;
        }
        match prev {
            Some(p) => self.node_mut(p).next = Some(slot),
            None => self.head = Some(slot),
        }
        match before {
            Some(b) => self.node_mut(b).prev = Some(slot),
            None => self.tail = Some(slot),
        }
        self.len += 1;
    }
}

impl FromIterator<Song> for OrderedSongList {
    fn from_iter<I: IntoIterator<Item = Song>>(iter: I) -> Self {
        let mut list = Self::new();
        for song in iter {
            list.append(song);
        }
        list
    }
}

impl<'a> IntoIterator for &'a OrderedSongList {
    type Item = &'a Song;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for OrderedSongList {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Borrowing iterator over an [`OrderedSongList`]
pub struct Iter<'a> {
    list: &'a OrderedSongList,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Song;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.front?);
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.song)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.back?);
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.song)
    }
}

impl ExactSizeIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(title: &str) -> Song {
        Song::new(title, "Test Artist", "3:00")
    }

    fn titles(list: &OrderedSongList) -> Vec<String> {
        list.iter().map(|s| s.title.clone()).collect()
    }

    fn list_of(n: usize) -> OrderedSongList {
        (0..n).map(|i| song(&format!("Song {}", i))).collect()
    }

    /// Forward and backward walks must both see exactly `len()` songs
    fn assert_links(list: &OrderedSongList) {
        let mut forward = 0;
        let mut cursor = list.head;
        while let Some(slot) = cursor {
            forward += 1;
            cursor = list.node(slot).next;
        }
        let mut backward = 0;
        let mut cursor = list.tail;
        while let Some(slot) = cursor {
            backward += 1;
            cursor = list.node(slot).prev;
        }
        assert_eq!(forward, list.len());
        assert_eq!(backward, list.len());
        assert_eq!(list.iter().rev().count(), list.len());
    }

    #[test]
    fn test_empty_list() {
        let list = OrderedSongList::new();
        assert!(list.is_empty());
        assert!(list.first().is_none());
        assert!(list.last().is_none());
        assert_eq!(list.to_vec(), Vec::new());
        assert_links(&list);
    }

    #[test]
    fn test_append_preserves_call_order() {
        for n in 0..12 {
            let list = list_of(n);
            assert_eq!(list.len(), n);
            let expected: Vec<String> = (0..n).map(|i| format!("Song {}", i)).collect();
            assert_eq!(titles(&list), expected);
            assert_links(&list);
        }
    }

    #[test]
    fn test_append_returns_stored_song() {
        let mut list = OrderedSongList::new();
        let original = song("Tum Hi Ho");
        let stored = list.append(original.clone());
        assert_eq!(*stored, original);
    }

    #[test]
    fn test_insert_at_bounds() {
        let mut list = list_of(2);
        list.insert_at(0, song("front")).unwrap();
        list.insert_at(3, song("back")).unwrap();
        list.insert_at(2, song("middle")).unwrap();
        assert_eq!(
            titles(&list),
            vec!["front", "Song 0", "middle", "Song 1", "back"]
        );
        assert_eq!(
            list.insert_at(6, song("nope")),
            Err(LibraryError::IndexOutOfRange { index: 6, len: 5 })
        );
        assert_links(&list);
    }

    #[test]
    fn test_insert_at_len_is_append() {
        let mut appended = list_of(3);
        let mut inserted = list_of(3);
        appended.append(song("tail"));
        inserted.insert_at(3, song("tail")).unwrap();
        assert_eq!(titles(&appended), titles(&inserted));
        assert_eq!(inserted.last().unwrap().title, "tail");
    }

    #[test]
    fn test_remove_at() {
        let mut list = list_of(4);
        assert_eq!(list.remove_at(0).unwrap().title, "Song 0");
        assert_eq!(list.remove_at(2).unwrap().title, "Song 3");
        assert_eq!(list.remove_at(1).unwrap().title, "Song 2");
        assert_eq!(titles(&list), vec!["Song 1"]);
        assert!(list.remove_at(1).is_err());
        list.remove_at(0).unwrap();
        assert!(list.is_empty());
        assert!(list.first().is_none());
        assert_links(&list);
    }

    #[test]
    fn test_removed_slots_are_reused() {
        let mut list = list_of(3);
        list.remove_at(1).unwrap();
        list.append(song("recycled"));
        assert_eq!(list.nodes.len(), 3);
        assert_eq!(titles(&list), vec!["Song 0", "Song 2", "recycled"]);
        assert_links(&list);
    }

    #[test]
    fn test_move_to_round_trip() {
        let n = 6;
        let original = titles(&list_of(n));
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let mut list = list_of(n);
                list.move_to(i, j).unwrap();
                assert_eq!(list.at(j).unwrap().title, original[i]);
                list.move_to(j, i).unwrap();
                assert_eq!(titles(&list), original, "move {} -> {} and back", i, j);
                assert_links(&list);
            }
        }
    }

    #[test]
    fn test_move_to_end() {
        let mut list = list_of(3);
        list.move_to(0, 2).unwrap();
        assert_eq!(titles(&list), vec!["Song 1", "Song 2", "Song 0"]);
        assert_eq!(list.last().unwrap().title, "Song 0");
    }

    #[test]
    fn test_failed_move_leaves_list_unchanged() {
        let mut list = list_of(3);
        let before = titles(&list);
        assert!(list.move_to(0, 3).is_err());
        assert!(list.move_to(5, 0).is_err());
        assert_eq!(titles(&list), before);
        assert_links(&list);
    }

    #[test]
    fn test_move_to_same_index_is_noop() {
        let mut list = list_of(3);
        list.move_to(1, 1).unwrap();
        assert_eq!(titles(&list), vec!["Song 0", "Song 1", "Song 2"]);
    }

    #[test]
    fn test_reverse_is_involutive() {
        for n in 0..9 {
            let mut list = list_of(n);
            let original = titles(&list);
            list.reverse();
            let mut expected = original.clone();
            expected.reverse();
            assert_eq!(titles(&list), expected);
            assert_links(&list);
            list.reverse();
            assert_eq!(titles(&list), original);
            assert_links(&list);
        }
    }

    #[test]
    fn test_reverse_odd_length_keeps_middle() {
        let mut list = list_of(5);
        list.reverse();
        assert_eq!(list.at(2).unwrap().title, "Song 2");
        assert_eq!(list.first().unwrap().title, "Song 4");
        assert_eq!(list.last().unwrap().title, "Song 0");
    }

    #[test]
    fn test_at_walks_from_both_ends() {
        let list = list_of(7);
        for i in 0..7 {
            assert_eq!(list.at(i).unwrap().title, format!("Song {}", i));
        }
        assert!(list.at(7).is_err());
    }

    #[test]
    fn test_double_ended_iteration() {
        let list = list_of(4);
        let mut iter = list.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next().unwrap().title, "Song 0");
        assert_eq!(iter.next_back().unwrap().title, "Song 3");
        assert_eq!(iter.next().unwrap().title, "Song 1");
        assert_eq!(iter.next_back().unwrap().title, "Song 2");
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());
    }

    #[test]
    fn test_find_by_id_and_key() {
        let list = list_of(3);
        let target = list.at(2).unwrap().clone();
        let (index, found) = list.find_by_id(&target.id).unwrap();
        assert_eq!(index, 2);
        assert_eq!(found.title, "Song 2");

        let key = MembershipKey::new("SONG 1", "test artist");
        assert_eq!(list.find_by_key(&key).unwrap().0, 1);
        assert!(list.find_by_id(&SongId::new()).is_none());
    }

    #[test]
    fn test_clear() {
        let mut list = list_of(3);
        list.clear();
        assert!(list.is_empty());
        list.append(song("again"));
        assert_eq!(titles(&list), vec!["again"]);
        assert_links(&list);
    }

    #[test]
    fn test_to_vec_is_a_snapshot() {
        let mut list = list_of(2);
        let snapshot = list.to_vec();
        list.remove_at(0).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(list.len(), 1);
    }
}

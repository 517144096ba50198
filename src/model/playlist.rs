use super::{MembershipKey, Song};
use crate::store::OrderedSongList;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistId(Uuid);

impl PlaylistId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PlaylistId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Represents a user-curated playlist
///
/// The song list and the membership set always describe the same songs.
/// Only [`PlaylistStore`](crate::store::PlaylistStore) mutates a playlist;
/// everyone else gets shared references or clones.
#[derive(Debug, Clone, Serialize)]
pub struct Playlist {
    pub(crate) id: PlaylistId,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) cover_image: Option<String>,
    pub(crate) songs: OrderedSongList,
    #[serde(skip)]
    pub(crate) members: HashSet<MembershipKey>,
}

impl Playlist {
    /// Create a new empty playlist
    pub(crate) fn new(name: String, description: Option<String>) -> Self {
        Self {
            id: PlaylistId::new(),
            name,
            description,
            created_at: Utc::now(),
            cover_image: None,
            songs: OrderedSongList::new(),
            members: HashSet::new(),
        }
    }

    pub fn id(&self) -> PlaylistId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Cover image, derived from the first song
    pub fn cover_image(&self) -> Option<&str> {
        self.cover_image.as_deref()
    }

    pub fn songs(&self) -> &OrderedSongList {
        &self.songs
    }

    /// Membership keys of the songs in this playlist
    pub fn members(&self) -> &HashSet<MembershipKey> {
        &self.members
    }

    /// Check whether a song with the same title and artist is present
    pub fn contains(&self, key: &MembershipKey) -> bool {
        self.members.contains(key)
    }

    /// Number of songs in this playlist
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if playlist is empty
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Append a song unless its membership key is already present
    pub(crate) fn push_song(&mut self, song: Song) -> bool {
        if !self.members.insert(song.membership_key()) {
            return false;
        }
        let was_empty = self.songs.is_empty();
        let cover = song.cover_image.clone();
        self.songs.append(song);
        if was_empty {
            self.cover_image = cover;
        }
        true
    }

    /// Point the cover image at the current first song
    pub(crate) fn refresh_cover(&mut self) {
        self.cover_image = self.songs.first().and_then(|song| song.cover_image.clone());
    }
}

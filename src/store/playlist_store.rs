//! Playlist collection
//!
//! Every mutation validates its arguments before touching a playlist, so a
//! failed call leaves both the song list and the membership set as they were.

use super::sort::{sort_songs, SortCriterion, SortOrder};
use super::OrderedSongList;
use crate::error::{LibraryError, Result};
use crate::model::{MembershipKey, Playlist, PlaylistId, Song, SongId};

/// Owns all user playlists, in creation order
#[derive(Debug, Clone, Default)]
pub struct PlaylistStore {
    playlists: Vec<Playlist>,
}

impl PlaylistStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty playlist
    pub fn create_playlist(&mut self, name: &str, description: Option<&str>) -> Result<&Playlist> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LibraryError::InvalidName);
        }

        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        let playlist = Playlist::new(name.to_string(), description);
        log::info!("Created playlist '{}' ({})", playlist.name(), playlist.id());

        self.playlists.push(playlist);
        let index = self.playlists.len() - 1;
        Ok(&self.playlists[index])
    }

    /// Add a new song to a playlist
    ///
    /// Returns `Ok(false)` without changing anything when a song with the same
    /// title and artist is already in the playlist.
    pub fn add_song(
        &mut self,
        playlist_id: PlaylistId,
        title: &str,
        artist: &str,
        duration: &str,
        cover_image: Option<&str>,
        media_ref: Option<&str>,
    ) -> Result<bool> {
        let mut song = Song::new(title, artist, duration);
        song.cover_image = cover_image.map(str::to_string);
        song.media_ref = media_ref.map(str::to_string);
        self.insert_song(playlist_id, song)
    }

    /// Add a copy of an existing (e.g. catalog) song to a playlist
    ///
    /// The copy gets its own id; all other metadata is carried over.
    pub fn add_existing(&mut self, playlist_id: PlaylistId, song: &Song) -> Result<bool> {
        self.insert_song(playlist_id, song.reissue())
    }

    fn insert_song(&mut self, playlist_id: PlaylistId, song: Song) -> Result<bool> {
        let playlist = self.get_mut(playlist_id)?;
        let label = format!("{} - {}", song.artist, song.title);

        if playlist.push_song(song) {
            log::debug!("Added '{}' to playlist '{}'", label, playlist.name);
            Ok(true)
        } else {
            log::debug!("'{}' already in playlist '{}'", label, playlist.name);
            Ok(false)
        }
    }

    /// Remove the song at `index` from a playlist
    pub fn delete_song(&mut self, playlist_id: PlaylistId, index: usize) -> Result<Song> {
        let playlist = self.get_mut(playlist_id)?;
        let removed = playlist.songs.remove_at(index)?;
        playlist.members.remove(&removed.membership_key());

        if playlist.songs.is_empty() || index == 0 {
            playlist.refresh_cover();
        }

        log::debug!(
            "Removed '{}' from playlist '{}' ({} left)",
            removed.title,
            playlist.name,
            playlist.songs.len()
        );
        Ok(removed)
    }

    /// Remove a song from a playlist by its identifier
    pub fn delete_song_by_id(&mut self, playlist_id: PlaylistId, song_id: &SongId) -> Result<Song> {
        let index = self
            .get(playlist_id)?
            .songs
            .find_by_id(song_id)
            .map(|(index, _)| index)
            .ok_or(LibraryError::SongNotFound(*song_id))?;
        self.delete_song(playlist_id, index)
    }

    /// Move a song within a playlist
    pub fn move_song(&mut self, playlist_id: PlaylistId, from: usize, to: usize) -> Result<()> {
        let playlist = self.get_mut(playlist_id)?;
        playlist.songs.move_to(from, to)?;

        if from == 0 || to == 0 {
            playlist.refresh_cover();
        }
        Ok(())
    }

    /// Reverse the song order of a playlist
    pub fn reverse_songs(&mut self, playlist_id: PlaylistId) -> Result<()> {
        let playlist = self.get_mut(playlist_id)?;
        playlist.songs.reverse();
        playlist.refresh_cover();
        log::debug!("Reversed playlist '{}'", playlist.name);
        Ok(())
    }

    /// Reorder a playlist by title or duration
    ///
    /// The sort is stable, so songs with equal keys keep their current
    /// relative order.
    pub fn sort_songs(
        &mut self,
        playlist_id: PlaylistId,
        criterion: SortCriterion,
        order: SortOrder,
    ) -> Result<()> {
        let playlist = self.get_mut(playlist_id)?;
        let mut songs = playlist.songs.to_vec();
        sort_songs(&mut songs, criterion, order);

        playlist.songs = songs.into_iter().collect::<OrderedSongList>();
        playlist.refresh_cover();
        log::debug!(
            "Sorted playlist '{}' by {:?} ({:?})",
            playlist.name,
            criterion,
            order
        );
        Ok(())
    }

    /// Delete a playlist together with its membership set
    pub fn delete_playlist(&mut self, playlist_id: PlaylistId) -> Result<Playlist> {
        let position = self
            .playlists
            .iter()
            .position(|p| p.id == playlist_id)
            .ok_or(LibraryError::PlaylistNotFound(playlist_id))?;

        let removed = self.playlists.remove(position);
        log::info!("Deleted playlist '{}' ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// Snapshot of a playlist's songs; empty when the playlist does not exist
    pub fn get_songs(&self, playlist_id: PlaylistId) -> Vec<Song> {
        self.playlist(playlist_id)
            .map(|p| p.songs.to_vec())
            .unwrap_or_default()
    }

    /// Get a playlist by ID
    pub fn playlist(&self, playlist_id: PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == playlist_id)
    }

    /// Get all playlists
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    /// Number of songs in a playlist, 0 when it does not exist
    pub fn playlist_len(&self, playlist_id: PlaylistId) -> usize {
        self.playlist(playlist_id).map_or(0, Playlist::len)
    }

    /// Check whether a playlist already holds a song with this title and artist
    pub fn contains_song(&self, playlist_id: PlaylistId, title: &str, artist: &str) -> bool {
        self.playlist(playlist_id)
            .is_some_and(|p| p.contains(&MembershipKey::new(title, artist)))
    }

    /// Total number of playlists
    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    fn get(&self, playlist_id: PlaylistId) -> Result<&Playlist> {
        self.playlist(playlist_id)
            .ok_or(LibraryError::PlaylistNotFound(playlist_id))
    }

    fn get_mut(&mut self, playlist_id: PlaylistId) -> Result<&mut Playlist> {
        self.playlists
            .iter_mut()
            .find(|p| p.id == playlist_id)
            .ok_or(LibraryError::PlaylistNotFound(playlist_id))
    }
}

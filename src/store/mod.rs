//! Playlist storage: the ordered song list and the store that owns playlists

mod ordered_list;
mod playlist_store;
pub mod sort;

pub use ordered_list::{Iter, OrderedSongList};
pub use playlist_store::PlaylistStore;
pub use sort::{SortCriterion, SortOrder};

//! Data model shared by every engine component
//!
//! Songs are plain values; playlists pair an ordered song list with the
//! membership keys used for duplicate detection.

mod playlist;
mod song;

pub use playlist::{Playlist, PlaylistId};
pub use song::{parse_duration, MembershipKey, Song, SongId};

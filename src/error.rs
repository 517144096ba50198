//! Engine error type
//!
//! Positional mistakes and missing records are errors. Adding a song that is
//! already in a playlist is not: `PlaylistStore::add_song` reports it as
//! `Ok(false)`.

use crate::model::{PlaylistId, SongId};
use thiserror::Error;

/// Errors returned by the library engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// A positional operation received an index outside the list bounds
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// No playlist with this identifier exists
    #[error("playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// No song with this identifier exists in the playlist
    #[error("song not found: {0}")]
    SongNotFound(SongId),

    /// Playlist names must contain at least one non-whitespace character
    #[error("playlist name must not be blank")]
    InvalidName,
}

pub type Result<T> = std::result::Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_error_message() {
        let err = LibraryError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "index 4 out of range for list of length 2");
    }

    #[test]
    fn test_invalid_name_message() {
        assert_eq!(
            LibraryError::InvalidName.to_string(),
            "playlist name must not be blank"
        );
    }
}

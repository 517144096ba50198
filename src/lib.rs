//! Library Engine - in-memory music library core
//!
//! Playlists kept as ordered song lists, a multi-key search index and a
//! rating tree over a fixed song catalog, a recently-played history, and
//! overlap-based merge suggestions between playlists.

pub mod catalog;
pub mod config;
pub mod error;
pub mod history;
pub mod index;
pub mod library;
pub mod model;
pub mod similarity;
pub mod store;

pub use config::EngineConfig;
pub use error::{LibraryError, Result};
pub use history::RecentPlayStack;
pub use index::{RatingIndex, SongIndex};
pub use library::LibraryEngine;
pub use model::{MembershipKey, Playlist, PlaylistId, Song, SongId};
pub use similarity::{MergeSuggestion, SimilarityDetector};
pub use store::{OrderedSongList, PlaylistStore, SortCriterion, SortOrder};

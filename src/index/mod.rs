//! Read-side indexes over the song catalog

mod rating_index;
mod song_index;

pub use rating_index::RatingIndex;
pub use song_index::{relevance, IndexStats, SearchHit, SongIndex};

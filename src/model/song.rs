use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a song value
///
/// Two songs with the same title and artist still get different ids; use
/// [`MembershipKey`] to decide whether they are "the same song".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(Uuid);

impl SongId {
    /// Generate a fresh random identifier
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

impl Default for SongId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Represents a single song with the metadata the library works with
///
/// Field aliases accept the older web catalog layout
/// (`name`, `imgUrl`, `youtubeId`, `movie`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Unique identifier, generated when missing from the input
    #[serde(default)]
    pub id: SongId,

    /// Song title
    #[serde(alias = "name")]
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Duration as "M:SS"
    #[serde(default)]
    pub duration: String,

    /// Cover image reference (URL or path)
    #[serde(default, alias = "imgUrl")]
    pub cover_image: Option<String>,

    /// External media reference (e.g. a video id)
    #[serde(default, alias = "youtubeId")]
    pub media_ref: Option<String>,

    /// Source album or movie
    #[serde(default, alias = "movie")]
    pub album: Option<String>,

    /// Genre (optional)
    #[serde(default)]
    pub genre: Option<String>,

    /// Numeric rating, 0 when unrated
    #[serde(default)]
    pub rating: f64,
}

impl Song {
    /// Create a song with a fresh id and no optional metadata
    pub fn new(title: impl Into<String>, artist: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            id: SongId::new(),
            title: title.into(),
            artist: artist.into(),
            duration: duration.into(),
            cover_image: None,
            media_ref: None,
            album: None,
            genre: None,
            rating: 0.0,
        }
    }

    pub fn with_cover_image(mut self, cover_image: impl Into<String>) -> Self {
        self.cover_image = Some(cover_image.into());
        self
    }

    pub fn with_media_ref(mut self, media_ref: impl Into<String>) -> Self {
        self.media_ref = Some(media_ref.into());
        self
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Copy of this song's metadata under a fresh id
    pub fn reissue(&self) -> Self {
        Self {
            id: SongId::new(),
            ..self.clone()
        }
    }

    /// Deduplication key: lowercase (title, artist)
    pub fn membership_key(&self) -> MembershipKey {
        MembershipKey::new(&self.title, &self.artist)
    }

    /// Duration in seconds, 0 when the text is not "M:SS"
    pub fn duration_secs(&self) -> u32 {
        parse_duration(&self.duration).unwrap_or(0)
    }
}

/// Parse "M:SS" into total seconds
pub fn parse_duration(text: &str) -> Option<u32> {
    let (minutes, seconds) = text.trim().split_once(':')?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    let seconds: u32 = seconds.trim().parse().ok()?;
    minutes.checked_mul(60)?.checked_add(seconds)
}

/// Lowercase (title, artist) pair identifying "the same song" across entries
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MembershipKey {
    pub title: String,
    pub artist: String,
}

impl MembershipKey {
    pub fn new(title: &str, artist: &str) -> Self {
        Self {
            title: title.to_lowercase(),
            artist: artist.to_lowercase(),
        }
    }
}

impl fmt::Display for MembershipKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.title, self.artist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("4:22"), Some(262));
        assert_eq!(parse_duration("0:05"), Some(5));
        assert_eq!(parse_duration(" 12:00 "), Some(720));
        assert_eq!(parse_duration("abc"), None);
        assert_eq!(parse_duration("4"), None);
        assert_eq!(parse_duration("4:xx"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn test_malformed_duration_counts_as_zero() {
        let song = Song::new("Tum Hi Ho", "Arijit Singh", "four minutes");
        assert_eq!(song.duration_secs(), 0);
    }

    #[test]
    fn test_membership_key_ignores_case_and_id() {
        let a = Song::new("Tum Hi Ho", "Arijit Singh", "4:22");
        let b = Song::new("TUM HI HO", "arijit singh", "4:20");
        assert_ne!(a.id, b.id);
        assert_eq!(a.membership_key(), b.membership_key());
        assert_eq!(a.membership_key().to_string(), "tum hi ho-arijit singh");
    }

    #[test]
    fn test_reissue_keeps_metadata() {
        let song = Song::new("Kesariya", "Arijit Singh", "4:28")
            .with_album("Brahmastra")
            .with_rating(4.7);
        let copy = song.reissue();
        assert_ne!(copy.id, song.id);
        assert_eq!(copy.album.as_deref(), Some("Brahmastra"));
        assert_eq!(copy.rating, 4.7);
    }

    #[test]
    fn test_deserialize_legacy_field_names() {
        let json = r#"{
            "name": "Kal Ho Naa Ho",
            "artist": "Sonu Nigam",
            "duration": "5:21",
            "imgUrl": "https://img.example/khnh.jpg",
            "youtubeId": "g0eO74UmRBs",
            "movie": "Kal Ho Naa Ho",
            "rating": 4.8
        }"#;
        let song: Song = serde_json::from_str(json).unwrap();
        assert_eq!(song.title, "Kal Ho Naa Ho");
        assert_eq!(song.cover_image.as_deref(), Some("https://img.example/khnh.jpg"));
        assert_eq!(song.media_ref.as_deref(), Some("g0eO74UmRBs"));
        assert_eq!(song.album.as_deref(), Some("Kal Ho Naa Ho"));
        assert_eq!(song.genre, None);
        assert_eq!(song.rating, 4.8);
    }
}

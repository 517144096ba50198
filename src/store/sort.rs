//! Playlist ordering criteria

use crate::model::{parse_duration, Song};
use icu_collator::{Collator, CollatorOptions, Strength};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use unicase::UniCase;

/// Field a playlist can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortCriterion {
    Title,
    Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Compares songs by one criterion in ascending order
///
/// Titles use Unicode collation at secondary strength: accents matter, case
/// does not. Durations compare in seconds with unparsable text counted as
/// zero.
pub struct SongComparator {
    criterion: SortCriterion,
    collator: Option<Collator>,
}

impl SongComparator {
    pub fn new(criterion: SortCriterion) -> Self {
        let collator = match criterion {
            SortCriterion::Title => make_collator(),
            SortCriterion::Duration => None,
        };
        Self {
            criterion,
            collator,
        }
    }

    pub fn compare(&self, a: &Song, b: &Song) -> Ordering {
        match self.criterion {
            SortCriterion::Title => match &self.collator {
                Some(collator) => collator.compare(&a.title, &b.title),
                None => UniCase::new(a.title.as_str()).cmp(&UniCase::new(b.title.as_str())),
            },
            SortCriterion::Duration => a.duration_secs().cmp(&b.duration_secs()),
        }
    }
}

fn make_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Secondary);

    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(err) => {
            log::warn!("No collation data ({:?}); titles compare case-folded", err);
            None
        }
    }
}

/// Stable sort; songs with equal keys keep their relative order in both directions
pub fn sort_songs(songs: &mut [Song], criterion: SortCriterion, order: SortOrder) {
    if criterion == SortCriterion::Duration {
        let malformed = songs
            .iter()
            .filter(|song| parse_duration(&song.duration).is_none())
            .count();
        if malformed > 0 {
            log::warn!("{} song(s) have no M:SS duration; sorting them as 0:00", malformed);
        }
    }

    let comparator = SongComparator::new(criterion);
    songs.sort_by(|a, b| {
        let ordering = comparator.compare(a, b);
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

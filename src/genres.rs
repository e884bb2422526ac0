//! Genre derivation and keyword classification.
//!
//! Matching is a literal, case-sensitive substring test: `"dance pop"`
//! matches `"dance"` and `"pop"`, but not `"Pop"` or `"hip hop"`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::Track;

/// The fixed classification keywords projected onto every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenreFlag {
    Pop,
    Rap,
    Dance,
    Country,
}

impl GenreFlag {
    pub const ALL: [GenreFlag; 4] = [
        GenreFlag::Pop,
        GenreFlag::Rap,
        GenreFlag::Dance,
        GenreFlag::Country,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            GenreFlag::Pop => "pop",
            GenreFlag::Rap => "rap",
            GenreFlag::Dance => "dance",
            GenreFlag::Country => "country",
        }
    }
}

impl std::str::FromStr for GenreFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GenreFlag::ALL
            .into_iter()
            .find(|flag| flag.keyword() == s)
            .ok_or_else(|| format!("Invalid genre flag: {}", s))
    }
}

/// Deduplicated union of the genre labels of every artist on the track.
pub fn genres_of(track: &Track) -> BTreeSet<String> {
    track
        .artists
        .iter()
        .flat_map(|artist| artist.genres.iter().cloned())
        .collect()
}

pub fn matches_genre(track: &Track, keyword: &str) -> bool {
    genres_of(track)
        .iter()
        .any(|label| label.contains(keyword))
}

pub fn has_flag(track: &Track, flag: GenreFlag) -> bool {
    matches_genre(track, flag.keyword())
}

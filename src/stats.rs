//! Frequency statistics over a normalized track collection.
//!
//! Artists are tallied by display name, so two artists that share a name are
//! counted together. Ties always resolve to the name seen first in input
//! order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::{IngestError, Result};
use crate::genres::genres_of;
use crate::models::Track;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

/// Track occurrences per artist name, in order of first appearance.
pub fn artist_tally(tracks: &[Track]) -> Vec<ArtistCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut tally: Vec<ArtistCount> = Vec::new();

    for artist in tracks.iter().flat_map(|t| t.artists.iter()) {
        match index.get(artist.name.as_str()) {
            Some(&pos) => tally[pos].count += 1,
            None => {
                index.insert(artist.name.as_str(), tally.len());
                tally.push(ArtistCount {
                    name: artist.name.clone(),
                    count: 1,
                });
            }
        }
    }

    tally
}

pub fn most_frequent_artist(tracks: &[Track]) -> Result<ArtistCount> {
    if tracks.is_empty() {
        return Err(IngestError::EmptyResult(
            "no tracks to find a most frequent artist in".to_string(),
        ));
    }

    // Only a strictly higher count displaces the current leader.
    artist_tally(tracks)
        .into_iter()
        .fold(None, |best: Option<ArtistCount>, candidate| match best {
            Some(b) if b.count >= candidate.count => Some(b),
            _ => Some(candidate),
        })
        .ok_or_else(|| IngestError::EmptyResult("tracks credit no artists".to_string()))
}

/// Number of tracks carrying each genre label, most common first.
pub fn genre_tally(tracks: &[Track]) -> Vec<GenreCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for track in tracks {
        for genre in genres_of(track) {
            *counts.entry(genre).or_insert(0) += 1;
        }
    }

    let mut tally: Vec<GenreCount> = counts
        .into_iter()
        .map(|(genre, count)| GenreCount { genre, count })
        .collect();
    tally.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.genre.cmp(&b.genre)));
    tally
}

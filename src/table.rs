//! Flat, row-oriented view of a normalized playlist for analysis and charts.

use serde::{Deserialize, Serialize};

use crate::errors::{IngestError, Result};
use crate::genres::{genres_of, has_flag, GenreFlag};
use crate::models::{AudioFeatures, Track};

/// One track flattened into a table row.
///
/// Serializes with the audio-feature columns inlined next to the track
/// columns, the same layout a dataframe built from these rows would have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRow {
    #[serde(flatten)]
    pub features: AudioFeatures,
    pub track_name: String,
    pub album_name: String,
    pub artist_ids: Vec<String>,
    pub artist_names: Vec<String>,
    /// Sorted; order carries no meaning.
    pub genres: Vec<String>,
    pub is_pop: bool,
    pub is_rap: bool,
    pub is_dance: bool,
    pub is_country: bool,
}

/// Numeric audio-feature columns that can be plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureField {
    Danceability,
    Energy,
    Key,
    Loudness,
    Mode,
    Speechiness,
    Acousticness,
    Instrumentalness,
    Liveness,
    Valence,
    Tempo,
    DurationMs,
    TimeSignature,
}

impl TrackRow {
    pub fn from_track(track: &Track) -> Self {
        TrackRow {
            features: track.audio_features.clone(),
            track_name: track.name.clone(),
            album_name: track.album_name.clone(),
            artist_ids: track.artist_ids(),
            artist_names: track.artist_names(),
            genres: genres_of(track).into_iter().collect(),
            is_pop: has_flag(track, GenreFlag::Pop),
            is_rap: has_flag(track, GenreFlag::Rap),
            is_dance: has_flag(track, GenreFlag::Dance),
            is_country: has_flag(track, GenreFlag::Country),
        }
    }

    pub fn flag(&self, flag: GenreFlag) -> bool {
        match flag {
            GenreFlag::Pop => self.is_pop,
            GenreFlag::Rap => self.is_rap,
            GenreFlag::Dance => self.is_dance,
            GenreFlag::Country => self.is_country,
        }
    }

    pub fn feature(&self, field: FeatureField) -> f64 {
        let f = &self.features;
        match field {
            FeatureField::Danceability => f.danceability,
            FeatureField::Energy => f.energy,
            FeatureField::Key => f.key as f64,
            FeatureField::Loudness => f.loudness,
            FeatureField::Mode => f.mode as f64,
            FeatureField::Speechiness => f.speechiness,
            FeatureField::Acousticness => f.acousticness,
            FeatureField::Instrumentalness => f.instrumentalness,
            FeatureField::Liveness => f.liveness,
            FeatureField::Valence => f.valence,
            FeatureField::Tempo => f.tempo,
            FeatureField::DurationMs => f.duration_ms as f64,
            FeatureField::TimeSignature => f.time_signature as f64,
        }
    }
}

pub fn project(tracks: &[Track]) -> Result<Vec<TrackRow>> {
    if tracks.is_empty() {
        return Err(IngestError::EmptyResult("no tracks to project".to_string()));
    }

    let rows: Vec<TrackRow> = tracks.iter().map(TrackRow::from_track).collect();
    log::debug!("Projected {} tracks into rows", rows.len());
    Ok(rows)
}

/// (x, y) pairs of two feature columns for the rows carrying `flag`.
pub fn scatter_points(
    rows: &[TrackRow],
    flag: GenreFlag,
    x: FeatureField,
    y: FeatureField,
) -> Vec<(f64, f64)> {
    rows.iter()
        .filter(|row| row.flag(flag))
        .map(|row| (row.feature(x), row.feature(y)))
        .collect()
}

pub fn to_json(rows: &[TrackRow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

//! Raw response fragments as the catalog service returns them.
//!
//! These are the parse boundary: required fields are plain (non-`Option`)
//! so a missing or `null` value fails deserialization instead of producing a
//! half-filled entity further down the pipeline.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{IngestError, Result};
use crate::models::{Artist, AudioFeatures};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPlaylistItem {
    pub track: RawTrack,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTrack {
    pub id: String,
    pub name: String,
    pub album: RawAlbum,
    pub artists: Vec<RawArtistRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAlbum {
    pub name: String,
}

/// Simplified artist object embedded in a track; carries no genres.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawArtistRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAudioFeatures {
    pub id: String,
    pub danceability: f64,
    pub energy: f64,
    pub key: i32,
    pub loudness: f64,
    pub mode: i32,
    pub speechiness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub valence: f64,
    pub tempo: f64,
    pub duration_ms: u64,
    pub time_signature: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl From<RawAudioFeatures> for AudioFeatures {
    fn from(raw: RawAudioFeatures) -> Self {
        AudioFeatures {
            danceability: raw.danceability,
            energy: raw.energy,
            key: raw.key,
            loudness: raw.loudness,
            mode: raw.mode,
            speechiness: raw.speechiness,
            acousticness: raw.acousticness,
            instrumentalness: raw.instrumentalness,
            liveness: raw.liveness,
            valence: raw.valence,
            tempo: raw.tempo,
            duration_ms: raw.duration_ms,
            time_signature: raw.time_signature,
            id: raw.id,
        }
    }
}

impl From<RawArtist> for Artist {
    fn from(raw: RawArtist) -> Self {
        Artist {
            id: raw.id,
            name: raw.name,
            genres: raw.genres,
        }
    }
}

/// Parse playlist items out of a playlist object (`tracks.items`), a paging
/// object (`items`) or a bare array of items.
pub fn parse_playlist_items(payload: &Value) -> Result<Vec<RawPlaylistItem>> {
    let items = payload
        .get("tracks")
        .and_then(|t| t.get("items"))
        .or_else(|| payload.get("items"))
        .unwrap_or(payload);

    let items = items
        .as_array()
        .ok_or_else(|| IngestError::Parse("Playlist payload has no item list".to_string()))?;

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            RawPlaylistItem::deserialize(item)
                .map_err(|e| IngestError::Parse(format!("Playlist item {}: {}", idx, e)))
        })
        .collect()
}

/// Parse the `audio_features` array, skipping the `null` entries the service
/// returns for ids it has no analysis for.
pub fn parse_audio_features(payload: &Value) -> Result<Vec<RawAudioFeatures>> {
    let records = payload
        .get("audio_features")
        .unwrap_or(payload)
        .as_array()
        .ok_or_else(|| IngestError::Parse("Missing audio_features array".to_string()))?;

    records
        .iter()
        .filter(|r| !r.is_null())
        .map(|r| RawAudioFeatures::deserialize(r).map_err(IngestError::from))
        .collect()
}

pub fn parse_artists(payload: &Value) -> Result<Vec<RawArtist>> {
    let records = payload
        .get("artists")
        .unwrap_or(payload)
        .as_array()
        .ok_or_else(|| IngestError::Parse("Missing artists array".to_string()))?;

    records
        .iter()
        .filter(|r| !r.is_null())
        .map(|r| RawArtist::deserialize(r).map_err(IngestError::from))
        .collect()
}

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Acoustic descriptors of one track, keyed by the track id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
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
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// A normalized playlist entry.
///
/// Artists are shared with every other track of the same batch that credits
/// them; the audio features belong to this track alone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub album_name: String,
    pub artists: Vec<Arc<Artist>>,
    pub audio_features: AudioFeatures,
}

impl Track {
    pub fn artist_ids(&self) -> Vec<String> {
        self.artists.iter().map(|a| a.id.clone()).collect()
    }

    pub fn artist_names(&self) -> Vec<String> {
        self.artists.iter().map(|a| a.name.clone()).collect()
    }
}

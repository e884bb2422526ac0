use serde::{Deserialize, Serialize};

use crate::errors::{IngestError, Result};

pub const API_BASE_URL: &str = "https://api.spotify.com/v1";
pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const REQUEST_TIMEOUT_SECONDS: u64 = 10;

/// Hard per-call limit of the artists endpoint.
pub const MAX_ARTIST_BATCH: usize = 50;

/// Per-call limit of the audio-features endpoint.
pub const MAX_AUDIO_FEATURE_BATCH: usize = 100;

/// Playlist page size requested when following `next` links.
pub const PLAYLIST_PAGE_LIMIT: u32 = 100;

pub const CLIENT_ID_ENV: &str = "HOTLIST_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "HOTLIST_CLIENT_SECRET";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub client_id: String,
    #[serde(skip_serializing)]
    pub client_secret: String,
    pub api_base_url: String,
    pub token_url: String,
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            api_base_url: API_BASE_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            timeout_secs: REQUEST_TIMEOUT_SECONDS,
        }
    }
}

impl CatalogConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            ..Self::default()
        }
    }

    /// Read credentials from `HOTLIST_CLIENT_ID` / `HOTLIST_CLIENT_SECRET`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| IngestError::Config(format!("{} is not set", key)))
        };

        let config = Self::new(read(CLIENT_ID_ENV)?, read(CLIENT_SECRET_ENV)?);
        log::debug!("Loaded catalog credentials for client {}", config.client_id);
        Ok(config)
    }
}

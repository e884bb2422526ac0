use base64::{engine::general_purpose::STANDARD, Engine as _};
use parking_lot::Mutex;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::{Duration, Instant};

use super::client::CatalogClient;
use super::models::{
    parse_artists, parse_audio_features, parse_playlist_items, RawArtist, RawAudioFeatures,
    RawPlaylistItem,
};
use crate::config::{
    CatalogConfig, MAX_ARTIST_BATCH, MAX_AUDIO_FEATURE_BATCH, PLAYLIST_PAGE_LIMIT,
};
use crate::errors::{IngestError, Result};

/// Tokens are refreshed this long before the service says they expire.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Blocking Web API client using the client-credentials flow.
pub struct WebApiClient {
    config: CatalogConfig,
    client: Client,
    token: Mutex<Option<AccessToken>>,
}

impl WebApiClient {
    pub fn new(config: CatalogConfig) -> Result<Self> {
        if config.client_id.is_empty() || config.client_secret.is_empty() {
            return Err(IngestError::Config(
                "Client id and secret are required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            client,
            token: Mutex::new(None),
        })
    }

    fn access_token(&self) -> Result<String> {
        let mut slot = self.token.lock();
        if let Some(token) = slot.as_ref().filter(|t| t.is_valid()) {
            return Ok(token.value.clone());
        }

        log::debug!("Requesting client-credentials token");

        let credentials = STANDARD.encode(format!(
            "{}:{}",
            self.config.client_id, self.config.client_secret
        ));

        let response = self
            .client
            .post(&self.config.token_url)
            .header(reqwest::header::AUTHORIZATION, format!("Basic {}", credentials))
            .form(&[("grant_type", "client_credentials")])
            .send()?;

        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            log::warn!("Token request failed ({}): {}", status, text);
            return Err(IngestError::Catalog(format!(
                "Token request failed: HTTP {}",
                status
            )));
        }

        let parsed: TokenResponse = serde_json::from_str(&text)?;
        let lifetime = Duration::from_secs(parsed.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        let value = parsed.access_token;

        *slot = Some(AccessToken {
            value: value.clone(),
            expires_at: Instant::now() + lifetime,
        });

        Ok(value)
    }

    fn get_json(&self, url: &str, params: &[(&str, &str)]) -> Result<Value> {
        let url = reqwest::Url::parse_with_params(url, params)
            .map_err(|e| IngestError::Catalog(format!("URL parse error: {}", e)))?;

        let token = self.access_token()?;
        log::debug!("GET {}", url);

        let response = self.client.get(url).bearer_auth(token).send()?;

        let status = response.status();
        let url_debug = response.url().to_string();
        let text = response.text()?;

        if status.as_u16() == 429 {
            log::warn!("Rate limit (429) at {}", url_debug);
            return Err(IngestError::Catalog("Rate limited (429)".to_string()));
        }

        if !status.is_success() {
            log::warn!("Request failed ({}) at {}: {}", status, url_debug, text);
            return Err(IngestError::Catalog(format!("HTTP {} - {}", status, text)));
        }

        serde_json::from_str(&text)
            .map_err(|e| IngestError::Parse(format!("JSON error at {}: {}", url_debug, e)))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url.trim_end_matches('/'), path)
    }
}

impl CatalogClient for WebApiClient {
    fn fetch_playlist_tracks(&self, playlist_id: &str) -> Result<Vec<RawPlaylistItem>> {
        log::info!("Fetching playlist {}", playlist_id);

        let limit = PLAYLIST_PAGE_LIMIT.to_string();
        let mut page = self.get_json(
            &self.url(&format!("/playlists/{}/tracks", playlist_id)),
            &[("limit", limit.as_str()), ("offset", "0")],
        )?;

        let mut items = parse_playlist_items(&page)?;

        while let Some(next) = page.get("next").and_then(|n| n.as_str()).map(str::to_string) {
            page = self.get_json(&next, &[])?;
            items.extend(parse_playlist_items(&page)?);
        }

        log::info!("Fetched {} playlist items", items.len());
        Ok(items)
    }

    fn fetch_audio_features(&self, track_ids: &[String]) -> Result<Vec<RawAudioFeatures>> {
        let mut features = Vec::with_capacity(track_ids.len());

        // The endpoint caps ids per request; callers still see a single call.
        for chunk in track_ids.chunks(MAX_AUDIO_FEATURE_BATCH) {
            let ids = chunk.join(",");
            let payload = self.get_json(&self.url("/audio-features"), &[("ids", ids.as_str())])?;
            features.extend(parse_audio_features(&payload)?);
        }

        Ok(features)
    }

    fn fetch_artists(&self, ids: &[String]) -> Result<Vec<RawArtist>> {
        if ids.len() > MAX_ARTIST_BATCH {
            return Err(IngestError::BatchSizeExceeded {
                size: ids.len(),
                limit: MAX_ARTIST_BATCH,
            });
        }
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids.join(",");
        let payload = self.get_json(&self.url("/artists"), &[("ids", joined.as_str())])?;
        parse_artists(&payload)
    }
}

//! Builds the canonical entity graph for one playlist batch.
//!
//! Artists and audio features come back from separate remote calls, in no
//! particular order, so both are indexed by their own id before any track is
//! assembled. A single unresolved id fails the whole batch.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::catalog::{extract_playlist_id, CatalogClient, RawPlaylistItem};
use crate::config::MAX_ARTIST_BATCH;
use crate::errors::{IngestError, Result};
use crate::models::{Artist, AudioFeatures, Track};

pub type ArtistLookup = HashMap<String, Arc<Artist>>;
pub type FeatureLookup = HashMap<String, AudioFeatures>;

/// Resolve a playlist reference, fetch its items and normalize them.
pub fn ingest_playlist<C: CatalogClient>(client: &C, url_or_id: &str) -> Result<Vec<Track>> {
    let playlist_id = extract_playlist_id(url_or_id)?;
    let items = client.fetch_playlist_tracks(&playlist_id)?;
    normalize(&items, client)
}

pub fn normalize<C: CatalogClient>(items: &[RawPlaylistItem], client: &C) -> Result<Vec<Track>> {
    if items.is_empty() {
        return Err(IngestError::EmptyResult(
            "playlist has no items to normalize".to_string(),
        ));
    }

    let track_ids = distinct(items.iter().map(|item| item.track.id.as_str()));
    let artist_ids = distinct_artist_ids(items);

    log::info!(
        "Normalizing {} items ({} distinct tracks, {} distinct artists)",
        items.len(),
        track_ids.len(),
        artist_ids.len()
    );

    let features = fetch_feature_lookup(client, &track_ids)?;
    let artists = fetch_artist_lookup(client, &artist_ids)?;

    items
        .iter()
        .map(|item| build_track(item, &features, &artists))
        .collect()
}

/// Every artist id referenced by any item, deduplicated, in first-seen order.
pub fn distinct_artist_ids(items: &[RawPlaylistItem]) -> Vec<String> {
    distinct(
        items
            .iter()
            .flat_map(|item| item.track.artists.iter().map(|a| a.id.as_str())),
    )
}

fn distinct<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// Split ids into consecutive batches of at most `MAX_ARTIST_BATCH`.
pub fn artist_batches(ids: &[String]) -> impl Iterator<Item = &[String]> {
    ids.chunks(MAX_ARTIST_BATCH)
}

/// Fetch one batch of artists, refusing batches over the per-call limit.
pub fn fetch_artist_batch<C: CatalogClient>(client: &C, ids: &[String]) -> Result<Vec<Artist>> {
    if ids.len() > MAX_ARTIST_BATCH {
        return Err(IngestError::BatchSizeExceeded {
            size: ids.len(),
            limit: MAX_ARTIST_BATCH,
        });
    }

    Ok(client
        .fetch_artists(ids)?
        .into_iter()
        .map(Artist::from)
        .collect())
}

pub fn fetch_artist_lookup<C: CatalogClient>(client: &C, ids: &[String]) -> Result<ArtistLookup> {
    let mut lookup = ArtistLookup::with_capacity(ids.len());

    for (idx, batch) in artist_batches(ids).enumerate() {
        log::debug!("Fetching artist batch {} ({} ids)", idx + 1, batch.len());
        for artist in fetch_artist_batch(client, batch)? {
            lookup.insert(artist.id.clone(), Arc::new(artist));
        }
    }

    Ok(lookup)
}

pub fn fetch_feature_lookup<C: CatalogClient>(
    client: &C,
    track_ids: &[String],
) -> Result<FeatureLookup> {
    let mut lookup = FeatureLookup::with_capacity(track_ids.len());

    for raw in client.fetch_audio_features(track_ids)? {
        if lookup.contains_key(&raw.id) {
            log::warn!("Duplicate audio features for track {}, keeping the first", raw.id);
            continue;
        }
        lookup.insert(raw.id.clone(), AudioFeatures::from(raw));
    }

    Ok(lookup)
}

fn build_track(
    item: &RawPlaylistItem,
    features: &FeatureLookup,
    artists: &ArtistLookup,
) -> Result<Track> {
    let raw = &item.track;

    let audio_features = features
        .get(&raw.id)
        .cloned()
        .ok_or_else(|| IngestError::missing_features(&raw.id))?;

    let artists = raw
        .artists
        .iter()
        .map(|a| {
            artists
                .get(&a.id)
                .cloned()
                .ok_or_else(|| IngestError::missing_artist(&a.id))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Track {
        id: raw.id.clone(),
        name: raw.name.clone(),
        album_name: raw.album.name.clone(),
        artists,
        audio_features,
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use crate::catalog::{
        CatalogClient, RawAlbum, RawArtist, RawArtistRef, RawAudioFeatures, RawPlaylistItem,
        RawTrack,
    };
    use crate::errors::Result;

    pub fn raw_item(id: &str, artists: &[(&str, &str)]) -> RawPlaylistItem {
        RawPlaylistItem {
            track: RawTrack {
                id: id.to_string(),
                name: format!("Song {}", id),
                album: RawAlbum {
                    name: format!("Album {}", id),
                },
                artists: artists
                    .iter()
                    .map(|(id, name)| RawArtistRef {
                        id: id.to_string(),
                        name: name.to_string(),
                    })
                    .collect(),
            },
        }
    }

    pub fn raw_features(id: &str) -> RawAudioFeatures {
        RawAudioFeatures {
            id: id.to_string(),
            danceability: 0.6,
            energy: 0.7,
            key: 1,
            loudness: -5.0,
            mode: 1,
            speechiness: 0.04,
            acousticness: 0.2,
            instrumentalness: 0.0,
            liveness: 0.1,
            valence: 0.4,
            tempo: 118.0,
            duration_ms: 180_000,
            time_signature: 4,
        }
    }

    /// In-memory catalog that records every call it receives.
    #[derive(Default)]
    pub struct FakeCatalog {
        pub playlist: Vec<RawPlaylistItem>,
        pub features: Vec<RawAudioFeatures>,
        pub artists: HashMap<String, RawArtist>,
        pub artist_calls: RefCell<Vec<Vec<String>>>,
        pub feature_calls: RefCell<Vec<Vec<String>>>,
    }

    impl FakeCatalog {
        pub fn with_artist(mut self, id: &str, name: &str, genres: &[&str]) -> Self {
            self.artists.insert(
                id.to_string(),
                RawArtist {
                    id: id.to_string(),
                    name: name.to_string(),
                    genres: genres.iter().map(|g| g.to_string()).collect(),
                },
            );
            self
        }

        pub fn with_features(mut self, ids: &[&str]) -> Self {
            self.features.extend(ids.iter().map(|id| raw_features(id)));
            self
        }
    }

    impl CatalogClient for FakeCatalog {
        fn fetch_playlist_tracks(&self, _playlist_id: &str) -> Result<Vec<RawPlaylistItem>> {
            Ok(self.playlist.clone())
        }

        fn fetch_audio_features(&self, track_ids: &[String]) -> Result<Vec<RawAudioFeatures>> {
            self.feature_calls.borrow_mut().push(track_ids.to_vec());
            // Reverse to make sure nothing relies on response order.
            Ok(self
                .features
                .iter()
                .rev()
                .filter(|f| track_ids.contains(&f.id))
                .cloned()
                .collect())
        }

        fn fetch_artists(&self, ids: &[String]) -> Result<Vec<RawArtist>> {
            self.artist_calls.borrow_mut().push(ids.to_vec());
            Ok(ids
                .iter()
                .rev()
                .filter_map(|id| self.artists.get(id).cloned())
                .collect())
        }
    }
}

use super::models::{RawArtist, RawAudioFeatures, RawPlaylistItem};
use crate::errors::{IngestError, Result};

/// The remote calls the ingestion engine needs from a music catalog.
///
/// Implementations are blocking; the engine issues calls one after another.
pub trait CatalogClient {
    /// Items of a playlist, in playlist order.
    fn fetch_playlist_tracks(&self, playlist_id: &str) -> Result<Vec<RawPlaylistItem>>;

    /// Audio features for the given track ids. The returned order is not
    /// guaranteed to follow `track_ids`.
    fn fetch_audio_features(&self, track_ids: &[String]) -> Result<Vec<RawAudioFeatures>>;

    /// Full artist records. Callers must keep `ids.len() <= MAX_ARTIST_BATCH`.
    fn fetch_artists(&self, ids: &[String]) -> Result<Vec<RawArtist>>;
}

impl<C: CatalogClient + ?Sized> CatalogClient for &C {
    fn fetch_playlist_tracks(&self, playlist_id: &str) -> Result<Vec<RawPlaylistItem>> {
        (**self).fetch_playlist_tracks(playlist_id)
    }

    fn fetch_audio_features(&self, track_ids: &[String]) -> Result<Vec<RawAudioFeatures>> {
        (**self).fetch_audio_features(track_ids)
    }

    fn fetch_artists(&self, ids: &[String]) -> Result<Vec<RawArtist>> {
        (**self).fetch_artists(ids)
    }
}

const PLAYLIST_URI_PREFIX: &str = "spotify:playlist:";
const PLAYLIST_URL_MARKER: &str = "open.spotify.com/playlist/";
const PLAYLIST_ID_LEN: usize = 22;

fn is_playlist_id(candidate: &str) -> bool {
    candidate.len() == PLAYLIST_ID_LEN && candidate.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Resolve a `spotify:playlist:` URI, an open.spotify.com playlist URL or a
/// bare base62 id to the playlist id.
pub fn extract_playlist_id(url_or_id: &str) -> Result<String> {
    let input = url_or_id.trim();

    if input.contains("spotify.link/") {
        return Err(IngestError::InvalidPlaylist(format!(
            "share link {} must be opened and replaced by the playlist URL",
            input
        )));
    }

    let candidate = if let Some(rest) = input.strip_prefix(PLAYLIST_URI_PREFIX) {
        rest
    } else if let Some(idx) = input.find(PLAYLIST_URL_MARKER) {
        let rest = &input[idx + PLAYLIST_URL_MARKER.len()..];
        rest.split(['?', '#']).next().unwrap_or(rest)
    } else {
        input
    };

    if is_playlist_id(candidate) {
        Ok(candidate.to_string())
    } else {
        Err(IngestError::InvalidPlaylist(format!(
            "no playlist id in {:?}",
            url_or_id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_uri() {
        let id = extract_playlist_id("spotify:playlist:37i9dQZF1DWTvNyxOwkztu").unwrap();
        assert_eq!(id, "37i9dQZF1DWTvNyxOwkztu");
    }

    #[test]
    fn test_extract_from_url_with_query() {
        let id = extract_playlist_id(
            "https://open.spotify.com/playlist/37i9dQZF1DWTvNyxOwkztu?si=023b6aa48e7f47cf",
        )
        .unwrap();
        assert_eq!(id, "37i9dQZF1DWTvNyxOwkztu");
    }

    #[test]
    fn test_extract_bare_id() {
        assert_eq!(
            extract_playlist_id("  6UeSakyzhiEt4NB3UAd6NQ ").unwrap(),
            "6UeSakyzhiEt4NB3UAd6NQ"
        );
    }

    #[test]
    fn test_rejects_empty_and_malformed_ids() {
        for input in [
            "spotify:playlist:",
            "spotify:playlist:abc/../../me",
            "https://open.spotify.com/playlist/",
            "https://open.spotify.com/playlist/37i9dQZF1DWTvNyxOwkztu/../me",
            "https://open.spotify.com/playlist/short?si=1",
            "37i9dQZF1DWTvNyxOwkzt!",
        ] {
            assert!(
                matches!(extract_playlist_id(input), Err(IngestError::InvalidPlaylist(_))),
                "accepted {:?}",
                input
            );
        }
    }

    #[test]
    fn test_rejects_share_links_and_garbage() {
        assert!(matches!(
            extract_playlist_id("https://spotify.link/abcdef"),
            Err(IngestError::InvalidPlaylist(_))
        ));
        assert!(matches!(
            extract_playlist_id("not a playlist"),
            Err(IngestError::InvalidPlaylist(_))
        ));
    }
}

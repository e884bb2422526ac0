//! Playlist ingestion and analysis.
//!
//! Fetches a ranked playlist from a music catalog, resolves tracks, artists
//! and audio features into one entity graph, classifies tracks by genre and
//! flattens everything into rows ready for charting.
//!
//! Downstream tools get rows from [`project`] (plus [`to_json`] for export)
//! and summaries from [`most_frequent_artist`], [`artist_tally`] and
//! [`genre_tally`].

pub mod catalog;
pub mod config;
pub mod errors;
pub mod genres;
pub mod ingest;
pub mod models;
pub mod stats;
pub mod table;

pub use catalog::{CatalogClient, WebApiClient};
pub use config::CatalogConfig;
pub use errors::{IngestError, LookupKind};
pub use genres::{genres_of, matches_genre, GenreFlag};
pub use ingest::{ingest_playlist, normalize};
pub use models::{Artist, AudioFeatures, Track};
pub use stats::{artist_tally, genre_tally, most_frequent_artist, ArtistCount, GenreCount};
pub use table::{project, scatter_points, to_json, FeatureField, TrackRow};

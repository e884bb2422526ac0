//! Turns raw catalog payloads into normalized tracks.

pub mod normalizer;

pub use normalizer::{ingest_playlist, normalize};

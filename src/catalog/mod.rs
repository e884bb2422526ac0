pub mod client;
pub mod http;
pub mod models;

pub use client::{extract_playlist_id, CatalogClient};
pub use http::WebApiClient;
pub use models::*;

use serde::Serialize;
use thiserror::Error;

/// Which lookup table a missing id was expected in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKind {
    AudioFeatures,
    Artist,
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupKind::AudioFeatures => write!(f, "audio features"),
            LookupKind::Artist => write!(f, "artist"),
        }
    }
}

#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum IngestError {
    #[error("No {kind} found for id {id}")]
    LookupMissing { kind: LookupKind, id: String },

    #[error("Empty result: {0}")]
    EmptyResult(String),

    #[error("Batch of {size} ids exceeds the limit of {limit}")]
    BatchSizeExceeded { size: usize, limit: usize },

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid playlist: {0}")]
    InvalidPlaylist(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IngestError {
    pub fn missing_features(id: &str) -> Self {
        IngestError::LookupMissing {
            kind: LookupKind::AudioFeatures,
            id: id.to_string(),
        }
    }

    pub fn missing_artist(id: &str) -> Self {
        IngestError::LookupMissing {
            kind: LookupKind::Artist,
            id: id.to_string(),
        }
    }
}

impl From<reqwest::Error> for IngestError {
    fn from(e: reqwest::Error) -> Self {
        IngestError::Catalog(e.to_string())
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(e: serde_json::Error) -> Self {
        IngestError::Parse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_missing_message() {
        let err = IngestError::missing_artist("abc");
        assert_eq!(err.to_string(), "No artist found for id abc");

        let err = IngestError::missing_features("t1");
        assert_eq!(err.to_string(), "No audio features found for id t1");
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let err = IngestError::EmptyResult("no tracks".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "EmptyResult");
        assert_eq!(json["message"], "no tracks");

        let err = IngestError::BatchSizeExceeded { size: 51, limit: 50 };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "BatchSizeExceeded");
        assert_eq!(json["message"]["size"], 51);
    }
}

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("type nesting exceeds {limit} levels at `{path}` (self-referential type?)")]
    DepthExceeded { path: String, limit: usize },

    #[error("failed to encode catalog: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("at JSON path {path} → {message}")]
    Decode { path: String, message: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid field filter: {0}")]
    InvalidFilter(#[from] regex::Error),
}

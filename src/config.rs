//! Catalog generation options, optionally loaded from a JSON file.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

pub const DEFAULT_MAX_DEPTH: usize = 64;

/// What to do with a composite that declares no fields.
///
/// `Emit` keeps the literal behavior: the composite becomes a leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyComposites {
    #[default]
    Emit,
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogOptions {
    /// nested expansions (composite or sequence levels) before giving up
    pub max_depth: usize,
    pub empty_composites: EmptyComposites,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH, empty_composites: EmptyComposites::Emit }
    }
}

impl CatalogOptions {
    pub fn from_json_str(src: &str) -> Result<Self> {
        crate::path_de::from_str_with_path(src)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&src)
    }
}

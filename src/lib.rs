//! Flat field catalogs for nested Rust types.
//!
//! `type → Shape → tree of nodes → ordered leaf Fields → JSON`
//!
//! ```ignore
//! #[derive(Describe)]
//! struct Config {
//!     /// Listen port
//!     #[catalog(default = "8080")]
//!     port: u16,
//!     peers: Vec<Peer>,
//! }
//! let json = field_catalog::get_meta::<Config>()?;
//! ```

// lets `#[derive(Describe)]` expand to `::field_catalog::...` inside this crate too
extern crate self as field_catalog;

pub mod aliases;
pub mod catalog;
pub mod config;
pub mod describe;
pub mod error;
pub mod field;
pub mod flatten;
pub mod ir;
pub mod path_de;
pub mod render;
pub mod samples;
pub mod tree;

pub use aliases::AliasRegistry;
pub use catalog::{fields_of, get_meta, Catalog};
pub use config::{CatalogOptions, EmptyComposites};
pub use describe::Describe;
pub use error::{CatalogError, Result};
pub use field::Field;
pub use field_catalog_derive::Describe;
pub use ir::{FieldDef, Shape, ShapeKind};

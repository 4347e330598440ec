//! Illustrative types, shipped so the CLI has something to describe.
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::Describe;
use crate::ir::Shape;

#[derive(Describe)]
pub struct A {
    #[catalog(rename = "e")]
    pub e: i64,
    #[catalog(rename = "f", default = "false", description = "Some type F")]
    pub f: bool,
    #[catalog(rename = "g")]
    pub g: DateTime<Utc>,
}

#[derive(Describe)]
pub struct B {
    #[catalog(rename = "c")]
    pub c: String,
    #[catalog(rename = "d")]
    pub d: Uuid,
    #[catalog(rename = "z")]
    pub z: A,
    #[catalog(rename = "s", default = "['a', 'b']", description = "A slice of string")]
    pub s: Vec<String>,
    #[catalog(rename = "t", description = "A slice of structures")]
    pub t: Vec<A>,
}

/// `(name, shape)` for every sample, in listing order.
pub const REGISTRY: &[(&str, fn() -> Shape)] = &[("A", A::shape), ("B", B::shape)];

pub fn lookup(name: &str) -> Option<Shape> {
    REGISTRY.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, shape)| shape())
}

//! `Describe`: how a type reports its structural shape.
//!
//! Structs get this from `#[derive(Describe)]`; this module covers the
//! primitives, the sequence containers, and the well-known opaque types.
//! Maps and `Option<T>` deliberately have no impl.
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::time::SystemTime;

use crate::ir::Shape;

pub trait Describe: 'static {
    fn shape() -> Shape;
}

// ---- scalars ----

macro_rules! describe_scalar {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn shape() -> Shape { Shape::scalar::<$ty>($name) }
            }
        )*
    };
}

describe_scalar! {
    bool => "bool",
    char => "char",
    i8 => "i8", i16 => "i16", i32 => "i32", i64 => "i64", i128 => "i128", isize => "isize",
    u8 => "u8", u16 => "u16", u32 => "u32", u64 => "u64", u128 => "u128", usize => "usize",
    f32 => "f32", f64 => "f64",
    String => "String",
    &'static str => "str",
    () => "()",
    uuid::Uuid => "Uuid",
}

// ---- sequences ----

impl<T: Describe> Describe for Vec<T> {
    fn shape() -> Shape { Shape::sequence::<Self>(T::shape) }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn shape() -> Shape { Shape::sequence::<Self>(T::shape) }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn shape() -> Shape { Shape::sequence::<Self>(T::shape) }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn shape() -> Shape { Shape::sequence::<Self>(T::shape) }
}

impl<T: Describe> Describe for HashSet<T> {
    fn shape() -> Shape { Shape::sequence::<Self>(T::shape) }
}

// ---- transparent wrappers ----

impl<T: Describe> Describe for Box<T> {
    fn shape() -> Shape { T::shape() }
}

// ---- opaque leaves ----

impl Describe for chrono::DateTime<chrono::Utc> {
    fn shape() -> Shape { Shape::opaque::<Self>("DateTime<Utc>") }
}

impl Describe for chrono::DateTime<chrono::Local> {
    fn shape() -> Shape { Shape::opaque::<Self>("DateTime<Local>") }
}

impl Describe for chrono::DateTime<chrono::FixedOffset> {
    fn shape() -> Shape { Shape::opaque::<Self>("DateTime<FixedOffset>") }
}

impl Describe for chrono::NaiveDateTime {
    fn shape() -> Shape { Shape::opaque::<Self>("NaiveDateTime") }
}

impl Describe for chrono::NaiveDate {
    fn shape() -> Shape { Shape::opaque::<Self>("NaiveDate") }
}

impl Describe for SystemTime {
    fn shape() -> Shape { Shape::opaque::<Self>("SystemTime") }
}

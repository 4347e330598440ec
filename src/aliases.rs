//! Display labels for opaque types whose canonical name is not what a
//! catalog reader should see (`Uuid` → `uuid`, every timestamp → `timestamp`).
use std::any::TypeId;
use std::time::SystemTime;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::ir::Shape;

pub const UUID: &str = "uuid";
pub const TIMESTAMP: &str = "timestamp";

static BUILTIN: Lazy<AliasRegistry> = Lazy::new(|| {
    AliasRegistry::empty()
        .with::<uuid::Uuid>(UUID)
        .with::<chrono::DateTime<chrono::Utc>>(TIMESTAMP)
        .with::<chrono::DateTime<chrono::Local>>(TIMESTAMP)
        .with::<chrono::DateTime<chrono::FixedOffset>>(TIMESTAMP)
        .with::<chrono::NaiveDateTime>(TIMESTAMP)
        .with::<chrono::NaiveDate>(TIMESTAMP)
        .with::<SystemTime>(TIMESTAMP)
});

/// Immutable once built; extend through [`AliasRegistry::builder`].
#[derive(Debug, Clone, Default)]
pub struct AliasRegistry {
    entries: IndexMap<TypeId, Entry>,
}

#[derive(Debug, Clone)]
struct Entry {
    rust_name: &'static str,
    label: String,
}

#[derive(Debug, Clone)]
pub struct AliasRegistryBuilder {
    registry: AliasRegistry,
}

impl AliasRegistry {
    pub fn builtin() -> &'static AliasRegistry {
        &BUILTIN
    }

    /// Starts from a copy of the built-in aliases.
    pub fn builder() -> AliasRegistryBuilder {
        AliasRegistryBuilder { registry: BUILTIN.clone() }
    }

    fn empty() -> Self {
        Self::default()
    }

    fn with<T: 'static>(mut self, label: &str) -> Self {
        self.entries.insert(TypeId::of::<T>(), Entry {
            rust_name: std::any::type_name::<T>(),
            label: label.to_string(),
        });
        self
    }

    pub fn lookup(&self, type_id: TypeId) -> Option<&str> {
        self.entries.get(&type_id).map(|e| e.label.as_str())
    }

    pub fn label_of<T: 'static>(&self) -> Option<&str> {
        self.lookup(TypeId::of::<T>())
    }

    /// Alias if registered, otherwise the shape's canonical name.
    pub fn resolve(&self, shape: &Shape) -> String {
        match self.lookup(shape.type_id) {
            Some(label) => label.to_string(),
            None => shape.type_name.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(rust type name, label)` in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.values().map(|e| (e.rust_name, e.label.as_str()))
    }
}

impl AliasRegistryBuilder {
    /// Registering a type twice keeps its first position and the last label.
    pub fn alias<T: 'static>(mut self, label: impl Into<String>) -> Self {
        let label: String = label.into();
        self.registry = self.registry.with::<T>(&label);
        self
    }

    pub fn build(self) -> AliasRegistry {
        self.registry
    }
}

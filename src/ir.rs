// Type-level IR handed to the tree builder. No values live here.

use std::any::TypeId;
use std::borrow::Cow;

/// Lazily expanded nested shape. Holding a thunk instead of a `Shape` keeps
/// self-referential types constructible and lets the builder bound depth.
pub type ShapeFn = fn() -> Shape;

#[derive(Debug, Clone)]
pub struct Shape {
    pub type_id: TypeId,
    pub type_name: Cow<'static, str>,
    pub kind: ShapeKind,
}

#[derive(Debug, Clone)]
pub enum ShapeKind {
    Scalar,
    /// structurally composite, but never expanded (timestamps)
    Opaque,
    Composite(Vec<FieldDef>),
    Sequence(ShapeFn),
}

/// One declared field of a composite, in declaration order.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub ident: Cow<'static, str>,
    pub wire_name: Option<Cow<'static, str>>,
    pub description: Option<Cow<'static, str>>,
    pub default: Option<Cow<'static, str>>,
    pub shape: ShapeFn,
}

impl Shape {
    pub fn scalar<T: 'static>(type_name: impl Into<Cow<'static, str>>) -> Self {
        Self { type_id: TypeId::of::<T>(), type_name: type_name.into(), kind: ShapeKind::Scalar }
    }
    pub fn opaque<T: 'static>(type_name: impl Into<Cow<'static, str>>) -> Self {
        Self { type_id: TypeId::of::<T>(), type_name: type_name.into(), kind: ShapeKind::Opaque }
    }
    pub fn composite<T: 'static>(
        type_name: impl Into<Cow<'static, str>>,
        fields: Vec<FieldDef>,
    ) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name.into(),
            kind: ShapeKind::Composite(fields),
        }
    }
    /// Canonical name is `[]` + the element's canonical name.
    pub fn sequence<T: 'static>(element: ShapeFn) -> Self {
        let type_name = format!("[]{}", element().type_name);
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name.into(),
            kind: ShapeKind::Sequence(element),
        }
    }
}

impl FieldDef {
    pub fn new(ident: impl Into<Cow<'static, str>>, shape: ShapeFn) -> Self {
        Self { ident: ident.into(), wire_name: None, description: None, default: None, shape }
    }
    pub fn wire_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.wire_name = Some(name.into());
        self
    }
    pub fn description(mut self, text: impl Into<Cow<'static, str>>) -> Self {
        self.description = Some(text.into());
        self
    }
    pub fn default_value(mut self, literal: impl Into<Cow<'static, str>>) -> Self {
        self.default = Some(literal.into());
        self
    }

    /// Wire name if declared, otherwise the identifier.
    pub fn name(&self) -> &str {
        self.wire_name.as_deref().unwrap_or(&self.ident)
    }
}

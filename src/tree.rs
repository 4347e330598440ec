//! Structural walk: `Shape` → arena tree of partially named fields.
//!
//! - Composites add one child per declared field, in declaration order.
//! - Sequences do NOT add a level: the current node is renamed (`s` → `[]s`,
//!   or the sequence's own name at the root) and the element shape is
//!   expanded into that same node.
//! - Scalars and opaque types stop the walk; their node stays a leaf.
//!
//! Nested shapes are thunks, so expansion only happens here, bounded by
//! `max_depth`.
use tracing::debug;

use crate::aliases::AliasRegistry;
use crate::error::{CatalogError, Result};
use crate::field::Field;
use crate::ir::{Shape, ShapeKind};

pub const SEQUENCE_PREFIX: &str = "[]";

// ------------------------------- Arena ----------------------------------- //

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct Node {
    pub field: Field,
    /// back-reference only; the parent owns this node, never the reverse
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// composite with zero declared fields
    pub empty_composite: bool,
}

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub const ROOT: NodeId = NodeId(0);

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        self.node(id).parent.is_none()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, field: Field, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { field, parent, children: Vec::new(), empty_composite: false });
        if let Some(p) = parent {
            self.nodes[p.0].children.push(id);
        }
        id
    }
}

// ------------------------------ Builder ---------------------------------- //

pub struct TreeBuilder<'a> {
    aliases: &'a AliasRegistry,
    max_depth: usize,
    tree: Tree,
    path: Vec<String>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(aliases: &'a AliasRegistry, max_depth: usize) -> Self {
        Self { aliases, max_depth, tree: Tree { nodes: Vec::new() }, path: Vec::new() }
    }

    /// The root node is unnamed and carries the root shape's label.
    pub fn build(mut self, shape: &Shape) -> Result<Tree> {
        let root = Field { type_: self.aliases.resolve(shape), ..Field::default() };
        let root = self.tree.push(root, None);
        self.expand(root, shape, 0)?;
        Ok(self.tree)
    }

    fn expand(&mut self, id: NodeId, shape: &Shape, depth: usize) -> Result<()> {
        match &shape.kind {
            ShapeKind::Scalar | ShapeKind::Opaque => Ok(()),
            ShapeKind::Composite(fields) => {
                self.guard(depth)?;
                let count = fields.len();
                debug!(type_name = %shape.type_name, fields = count, depth, "expanding composite");
                if fields.is_empty() {
                    self.tree.node_mut(id).empty_composite = true;
                }
                for def in fields {
                    let child_shape = (def.shape)();
                    let field = Field {
                        name: def.name().to_string(),
                        type_: self.aliases.resolve(&child_shape),
                        description: def.description.as_deref().unwrap_or_default().to_string(),
                        default: def.default.as_deref().unwrap_or_default().to_string(),
                    };
                    let child = self.tree.push(field, Some(id));
                    self.path.push(def.name().to_string());
                    self.expand(child, &child_shape, depth + 1)?;
                    self.path.pop();
                }
                Ok(())
            }
            ShapeKind::Sequence(element) => {
                self.guard(depth)?;
                debug!(type_name = %shape.type_name, depth, "expanding sequence element");
                let node = self.tree.node_mut(id);
                node.field.name = if node.field.name.is_empty() {
                    shape.type_name.to_string()
                } else {
                    format!("{SEQUENCE_PREFIX}{}", node.field.name)
                };
                let element = element();
                self.expand(id, &element, depth + 1)
            }
        }
    }

    fn guard(&self, depth: usize) -> Result<()> {
        if depth >= self.max_depth {
            return Err(CatalogError::DepthExceeded {
                path: self.path.join("."),
                limit: self.max_depth,
            });
        }
        Ok(())
    }
}

// ------------------------------- Tests ------------------------------------ //

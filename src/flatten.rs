//! Tree → ordered leaf list.
//!
//! Names are dot-joined from the root and descriptions are joined with
//! `". "` on the way down; leaves are emitted on the way back, so catalog
//! order is the declaration order of the type, recursively expanded.
use tracing::trace;

use crate::config::EmptyComposites;
use crate::field::Field;
use crate::tree::{NodeId, Tree};

pub const PATH_SEPARATOR: &str = ".";
pub const DESCRIPTION_SEPARATOR: &str = ". ";

pub fn flatten(mut tree: Tree, empty: EmptyComposites) -> Vec<Field> {
    let mut out = Vec::new();
    flatten_into(&mut tree, Tree::ROOT, empty, &mut out);
    out
}

fn flatten_into(tree: &mut Tree, id: NodeId, empty: EmptyComposites, out: &mut Vec<Field>) {
    let children = std::mem::take(&mut tree.node_mut(id).children);
    if children.is_empty() {
        let node = tree.node(id);
        if node.empty_composite && empty == EmptyComposites::Skip {
            trace!(name = %node.field.name, "skipping empty composite");
            return;
        }
        trace!(name = %node.field.name, type_ = %node.field.type_, "leaf");
        out.push(node.field.clone());
        return;
    }

    let (name, description) = {
        let f = &tree.node(id).field;
        (f.name.clone(), f.description.clone())
    };
    for child in children {
        let f = &mut tree.node_mut(child).field;
        if !name.is_empty() {
            f.name = format!("{name}{PATH_SEPARATOR}{}", f.name);
        }
        if !description.is_empty() && !f.description.is_empty() {
            f.description = format!("{description}{DESCRIPTION_SEPARATOR}{}", f.description);
        }
        flatten_into(tree, child, empty, out);
    }
}

// ------------------------------- Tests ------------------------------------ //

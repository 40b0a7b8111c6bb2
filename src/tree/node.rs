//! Plain container node - groups children without providing anything.
//!
//! The consumer-side building block. A node is just an index with a parent
//! link; applications use it to stand in for whatever component is reading
//! provided state.

use tracing::trace;

use super::registry::{
    allocate_index, get_current_parent_index, pop_parent_context, push_parent_context,
    release_index, set_parent_index,
};
use crate::types::{Children, Cleanup};

/// Props for a plain node.
#[derive(Default)]
pub struct NodeProps {
    /// Optional node ID. If not provided, one is generated.
    pub id: Option<String>,
    /// Subtree built under this node.
    pub children: Option<Children>,
}

/// Create a plain container node.
///
/// Returns a cleanup function that releases the node (and, recursively, its
/// subtree) when called.
pub fn node(props: NodeProps) -> Cleanup {
    let index = allocate_index(props.id.as_deref());
    if let Some(parent) = get_current_parent_index() {
        set_parent_index(index, parent);
    }
    trace!(index, "mounted node");

    if let Some(children) = props.children {
        push_parent_context(index);
        children();
        pop_parent_context();
    }

    Box::new(move || release_index(index))
}

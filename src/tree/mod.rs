//! Retained-tree substrate - indices, parent links, positions.
//!
//! The tree manages the structure the provider layer walks:
//! - Registry: index allocation, ID mapping, parent links, parent context
//! - Position: a handle naming a node, used as a lookup origin
//! - Node: plain container component for grouping children
//!
//! # Architecture
//!
//! Components are NOT objects. They are indices into thread-local maps:
//!
//! ```text
//! Index 0: node "root"    (parent=None)
//! Index 1: provider node  (parent=0)
//! Index 2: node "status"  (parent=1)
//! ```
//!
//! Nesting is expressed with `Children` closures and an explicit
//! parent-context stack: a closure runs while its owner's index is on the
//! stack, and every node it creates picks up that index as its parent.

mod node;
mod position;
mod registry;

pub use node::*;
pub use position::*;
pub use registry::*;

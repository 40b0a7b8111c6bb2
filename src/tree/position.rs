//! Tree positions - where a lookup originates.

use std::fmt;

use super::registry;

/// A handle naming a node in the retained tree.
///
/// Provider lookups walk strictly upward from the position's node, so a
/// provider mounted at the position itself is never matched. Consumers name
/// their own node; the enclosing provider is then the first ancestor checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    index: usize,
}

impl Position {
    /// Position of an existing node.
    pub fn node(index: usize) -> Self {
        Self { index }
    }

    /// Position of the node whose children are currently being built.
    ///
    /// `None` at the tree root (no enclosing node).
    pub fn current() -> Option<Self> {
        registry::get_current_parent_index().map(|index| Self { index })
    }

    /// The node this position names.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Human-readable root-to-node ID path, for diagnostics.
    ///
    /// Released nodes render as `<released N>` so a stale position still
    /// produces a usable message.
    pub fn describe(&self) -> String {
        let mut ids = Vec::new();
        let mut current = Some(self.index);
        while let Some(index) = current {
            ids.push(
                registry::get_id(index).unwrap_or_else(|| format!("<released {index}>")),
            );
            current = registry::get_parent_index(index);
        }
        ids.reverse();
        ids.join(" > ")
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

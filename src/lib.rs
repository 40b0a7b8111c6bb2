//! # spark-provider
//!
//! Scoped state providers for reactive component trees.
//!
//! Pairs with [spark-signals](https://github.com/RLabs-Inc/spark-signals):
//! the provided objects are typically signal-holding state containers, and
//! reactivity flows through them, never through the provider wrappers.
//!
//! ## Architecture
//!
//! Components are indices into thread-local registries rather than objects.
//! Nesting is expressed with `Children` closures and an explicit
//! parent-context stack; every tree-building call returns a `Cleanup`.
//!
//! A [`ScopedProvider`] inserts a node that exposes one typed object to its
//! whole subtree. Descendants resolve it by walking parent links upward from
//! their [`Position`]:
//!
//! ```text
//! ScopedProvider<Session> (node 0)
//! └── ScopedProvider<Theme> (node 1)
//!     └── node "editor" (node 2)   ← of::<Session> walks 1, then hits 0
//! ```
//!
//! Replacing a mounted provider wrapper is suppressed from dependents
//! unconditionally: the wrapper is a pass-through, so only changes the held
//! object itself exposes are observable below it.
//!
//! ## Modules
//!
//! - [`types`] - `Cleanup` and `Children` closure aliases
//! - [`tree`] - Node registry, parent links, positions
//! - [`provider`] - `ScopedProvider`, `ProviderList`
//! - [`error`] - Lookup and update failures

pub mod error;
pub mod provider;
pub mod tree;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{ProviderError, Result};

pub use provider::{AnyProvider, ProviderList, ScopedProvider};

pub use tree::{
    NodeProps, Position, allocate_index, get_allocated_count, get_current_parent_index, get_id,
    get_index, get_parent_index, is_allocated, node, on_destroy, pop_parent_context,
    push_parent_context, release_index, reset_tree, set_parent_index,
};

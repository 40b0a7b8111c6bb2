//! Tree Registry - Index allocation and parent links.
//!
//! Manages the lifecycle of node indices:
//! - ID ↔ Index bidirectional mapping
//! - Free index pool for O(1) reuse
//! - Parent links walked by provider lookup
//! - Parent context stack for nested node creation

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use tracing::trace;

// =============================================================================
// Registry State
// =============================================================================

thread_local! {
    /// Map node ID to index.
    static ID_TO_INDEX: RefCell<HashMap<String, usize>> = RefCell::new(HashMap::new());

    /// Map index to node ID.
    static INDEX_TO_ID: RefCell<HashMap<usize, String>> = RefCell::new(HashMap::new());

    /// Set of currently allocated indices.
    static ALLOCATED_INDICES: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());

    /// Pool of freed indices for reuse.
    static FREE_INDICES: RefCell<Vec<usize>> = RefCell::new(Vec::new());

    /// Next index to allocate if pool is empty.
    static NEXT_INDEX: RefCell<usize> = const { RefCell::new(0) };

    /// Counter for generating unique IDs.
    static ID_COUNTER: RefCell<usize> = const { RefCell::new(0) };

    /// Parent link per node. Roots have no entry.
    static PARENT_INDEX: RefCell<HashMap<usize, usize>> = RefCell::new(HashMap::new());

    /// Stack of parent indices for nested node creation.
    static PARENT_STACK: RefCell<Vec<usize>> = RefCell::new(Vec::new());

    /// Destroy callbacks registered per index.
    static DESTROY_CALLBACKS: RefCell<HashMap<usize, Vec<Box<dyn FnOnce()>>>> = RefCell::new(HashMap::new());
}

// =============================================================================
// Parent Context Stack
// =============================================================================

/// Get the index of the node whose children are currently being built.
///
/// `None` at the tree root.
pub fn get_current_parent_index() -> Option<usize> {
    PARENT_STACK.with(|stack| stack.borrow().last().copied())
}

/// Push a parent index onto the stack.
pub fn push_parent_context(index: usize) {
    PARENT_STACK.with(|stack| {
        stack.borrow_mut().push(index);
    })
}

/// Pop a parent index from the stack.
pub fn pop_parent_context() {
    PARENT_STACK.with(|stack| {
        stack.borrow_mut().pop();
    })
}

// =============================================================================
// Parent Links
// =============================================================================

/// Record `parent` as the parent of `index`.
pub fn set_parent_index(index: usize, parent: usize) {
    PARENT_INDEX.with(|map| {
        map.borrow_mut().insert(index, parent);
    })
}

/// Parent of `index`, or `None` for roots and released indices.
pub fn get_parent_index(index: usize) -> Option<usize> {
    PARENT_INDEX.with(|map| map.borrow().get(&index).copied())
}

// =============================================================================
// Index Allocation
// =============================================================================

/// Allocate an index for a new node.
///
/// # Arguments
/// * `id` - Optional node ID. If not provided, one is generated.
///
/// # Returns
/// The allocated index.
pub fn allocate_index(id: Option<&str>) -> usize {
    // Generate ID if not provided
    let node_id = match id {
        Some(id) => id.to_string(),
        None => ID_COUNTER.with(|counter| {
            let mut counter = counter.borrow_mut();
            let id = format!("n{}", *counter);
            *counter += 1;
            id
        }),
    };

    // Check if already allocated
    let existing = ID_TO_INDEX.with(|map| map.borrow().get(&node_id).copied());
    if let Some(index) = existing {
        return index;
    }

    // Reuse free index or allocate new
    let index = FREE_INDICES.with(|free| {
        let mut free = free.borrow_mut();
        if let Some(index) = free.pop() {
            index
        } else {
            NEXT_INDEX.with(|next| {
                let mut next = next.borrow_mut();
                let index = *next;
                *next += 1;
                index
            })
        }
    });

    // Register mappings
    ID_TO_INDEX.with(|map| {
        map.borrow_mut().insert(node_id.clone(), index);
    });
    INDEX_TO_ID.with(|map| {
        map.borrow_mut().insert(index, node_id);
    });
    ALLOCATED_INDICES.with(|set| {
        set.borrow_mut().insert(index);
    });

    trace!(index, "allocated node");
    index
}

/// Release an index back to the pool.
///
/// Also recursively releases all children!
pub fn release_index(index: usize) {
    let id = INDEX_TO_ID.with(|map| map.borrow().get(&index).cloned());
    let Some(id) = id else { return };

    // FIRST: Find and release all children (recursive!)
    // Collect before releasing to avoid modifying while iterating.
    let children: Vec<usize> = ALLOCATED_INDICES.with(|set| {
        set.borrow()
            .iter()
            .copied()
            .filter(|&child_index| get_parent_index(child_index) == Some(index))
            .collect()
    });

    for child_index in children {
        release_index(child_index);
    }

    // Run destroy callbacks before cleanup
    run_destroy_callbacks(index);

    // Clean up mappings
    ID_TO_INDEX.with(|map| {
        map.borrow_mut().remove(&id);
    });
    INDEX_TO_ID.with(|map| {
        map.borrow_mut().remove(&index);
    });
    ALLOCATED_INDICES.with(|set| {
        set.borrow_mut().remove(&index);
    });
    PARENT_INDEX.with(|map| {
        map.borrow_mut().remove(&index);
    });

    // Return to pool for reuse
    FREE_INDICES.with(|free| {
        free.borrow_mut().push(index);
    });

    trace!(index, "released node");

    // When the tree empties, drop the pool so indices start from zero again.
    let is_empty = ALLOCATED_INDICES.with(|set| set.borrow().is_empty());
    if is_empty {
        FREE_INDICES.with(|free| {
            free.borrow_mut().clear();
        });
        NEXT_INDEX.with(|next| {
            *next.borrow_mut() = 0;
        });
    }
}

// =============================================================================
// Destroy Callbacks
// =============================================================================

/// Register a callback to run when the node at `index` is released.
pub fn on_destroy(index: usize, callback: impl FnOnce() + 'static) {
    DESTROY_CALLBACKS.with(|callbacks| {
        callbacks
            .borrow_mut()
            .entry(index)
            .or_default()
            .push(Box::new(callback));
    });
}

/// Run and clear destroy callbacks for an index.
fn run_destroy_callbacks(index: usize) {
    let callbacks = DESTROY_CALLBACKS.with(|callbacks| callbacks.borrow_mut().remove(&index));
    if let Some(callbacks) = callbacks {
        for callback in callbacks {
            callback();
        }
    }
}

// =============================================================================
// Lookups
// =============================================================================

/// Get index for a node ID.
pub fn get_index(id: &str) -> Option<usize> {
    ID_TO_INDEX.with(|map| map.borrow().get(id).copied())
}

/// Get ID for an index.
pub fn get_id(index: usize) -> Option<String> {
    INDEX_TO_ID.with(|map| map.borrow().get(&index).cloned())
}

/// Check if an index is currently allocated.
pub fn is_allocated(index: usize) -> bool {
    ALLOCATED_INDICES.with(|set| set.borrow().contains(&index))
}

/// Count of currently allocated nodes.
pub fn get_allocated_count() -> usize {
    ALLOCATED_INDICES.with(|set| set.borrow().len())
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Reset all tree state (for testing).
pub fn reset_tree() {
    ID_TO_INDEX.with(|map| map.borrow_mut().clear());
    INDEX_TO_ID.with(|map| map.borrow_mut().clear());
    ALLOCATED_INDICES.with(|set| set.borrow_mut().clear());
    FREE_INDICES.with(|free| free.borrow_mut().clear());
    NEXT_INDEX.with(|next| *next.borrow_mut() = 0);
    ID_COUNTER.with(|counter| *counter.borrow_mut() = 0);
    PARENT_INDEX.with(|map| map.borrow_mut().clear());
    PARENT_STACK.with(|stack| stack.borrow_mut().clear());
    DESTROY_CALLBACKS.with(|callbacks| callbacks.borrow_mut().clear());
    crate::provider::reset_entries();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_index() {
        reset_tree();

        let idx1 = allocate_index(None);
        let idx2 = allocate_index(None);
        let idx3 = allocate_index(Some("sidebar"));

        assert_eq!(idx1, 0);
        assert_eq!(idx2, 1);
        assert_eq!(idx3, 2);

        assert!(is_allocated(0));
        assert!(is_allocated(1));
        assert!(is_allocated(2));
        assert!(!is_allocated(3));

        assert_eq!(get_allocated_count(), 3);
    }

    #[test]
    fn test_release_and_reuse() {
        reset_tree();

        let idx1 = allocate_index(None);
        let idx2 = allocate_index(None);

        release_index(idx1);
        assert!(!is_allocated(idx1));
        assert!(is_allocated(idx2));

        // Should reuse the freed index
        let idx3 = allocate_index(None);
        assert_eq!(idx3, idx1);
    }

    #[test]
    fn test_id_mapping() {
        reset_tree();

        let idx = allocate_index(Some("status_bar"));
        assert_eq!(get_index("status_bar"), Some(idx));
        assert_eq!(get_id(idx), Some("status_bar".to_string()));
    }

    #[test]
    fn test_parent_context() {
        reset_tree();

        assert_eq!(get_current_parent_index(), None);

        push_parent_context(5);
        assert_eq!(get_current_parent_index(), Some(5));

        push_parent_context(10);
        assert_eq!(get_current_parent_index(), Some(10));

        pop_parent_context();
        assert_eq!(get_current_parent_index(), Some(5));

        pop_parent_context();
        assert_eq!(get_current_parent_index(), None);
    }

    #[test]
    fn test_release_is_recursive() {
        reset_tree();

        let root = allocate_index(None);
        let child = allocate_index(None);
        let grandchild = allocate_index(None);
        set_parent_index(child, root);
        set_parent_index(grandchild, child);

        release_index(root);
        assert!(!is_allocated(root));
        assert!(!is_allocated(child));
        assert!(!is_allocated(grandchild));
        assert_eq!(get_allocated_count(), 0);
    }

    #[test]
    fn test_destroy_callback() {
        use std::cell::Cell;
        use std::rc::Rc;

        reset_tree();

        let called = Rc::new(Cell::new(false));
        let called_clone = called.clone();

        let idx = allocate_index(None);
        on_destroy(idx, move || {
            called_clone.set(true);
        });

        assert!(!called.get());
        release_index(idx);
        assert!(called.get());
    }
}

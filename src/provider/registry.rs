//! Provider entries - typed objects attached to tree nodes.
//!
//! One entry per provider node: the held object (type-erased), its type
//! identity for exact-type matching, and a version signal that is the explicit
//! dirty-check seam for wrapper replacement. Reads go through the version
//! signal so a lookup made inside a reactive effect establishes a dependency;
//! the version only moves when a replacement is allowed to notify, which the
//! scoped provider never allows.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use spark_signals::{Signal, signal};

use crate::error::{ProviderError, Result};

struct Entry {
    type_id: TypeId,
    type_name: &'static str,
    object: Rc<dyn Any>,
    /// Bumped only when a replacement is allowed to notify dependents.
    version: Signal<u64>,
}

thread_local! {
    static ENTRIES: RefCell<HashMap<usize, Entry>> = RefCell::new(HashMap::new());
}

/// Record the entry for a freshly mounted provider node.
pub(crate) fn insert(
    index: usize,
    type_id: TypeId,
    type_name: &'static str,
    object: Rc<dyn Any>,
) {
    ENTRIES.with(|entries| {
        entries.borrow_mut().insert(
            index,
            Entry {
                type_id,
                type_name,
                object,
                version: signal(0u64),
            },
        );
    });
}

/// Entry at `index` if it holds a `T`.
///
/// Reads the entry's version signal, so calling this inside an effect links
/// the effect to future notifying replacements (of which the scoped provider
/// produces none).
pub(crate) fn lookup<T: 'static>(index: usize) -> Option<Rc<T>> {
    ENTRIES.with(|entries| {
        let entries = entries.borrow();
        let entry = entries.get(&index)?;
        if entry.type_id != TypeId::of::<T>() {
            return None;
        }
        let _ = entry.version.get();
        entry.object.clone().downcast::<T>().ok()
    })
}

/// Object held at `index`, checked against `T` without a reactive read.
///
/// Used by update to hand the old object to the suppression hook.
pub(crate) fn typed_object<T: 'static>(index: usize) -> Result<Rc<T>> {
    ENTRIES.with(|entries| {
        let entries = entries.borrow();
        let entry = entries
            .get(&index)
            .ok_or(ProviderError::NotMounted { index })?;
        entry
            .object
            .clone()
            .downcast::<T>()
            .map_err(|_| ProviderError::TypeMismatch {
                index,
                expected: std::any::type_name::<T>(),
                found: entry.type_name,
            })
    })
}

/// Swap the object at an already-mounted provider node.
///
/// `notify` comes from the suppression hook; only a `true` bumps the version
/// and re-runs effects that read through [`lookup`].
pub(crate) fn replace(
    index: usize,
    type_id: TypeId,
    type_name: &'static str,
    object: Rc<dyn Any>,
    notify: bool,
) -> Result<()> {
    let version = ENTRIES.with(|entries| {
        let mut entries = entries.borrow_mut();
        let entry = entries
            .get_mut(&index)
            .ok_or(ProviderError::NotMounted { index })?;
        if entry.type_id != type_id {
            return Err(ProviderError::TypeMismatch {
                index,
                expected: type_name,
                found: entry.type_name,
            });
        }
        entry.object = object;
        Ok(entry.version.clone())
    })?;

    if notify {
        version.set(version.get() + 1);
    }
    Ok(())
}

/// Whether a node currently holds a provider entry.
pub(crate) fn contains(index: usize) -> bool {
    ENTRIES.with(|entries| entries.borrow().contains_key(&index))
}

/// Drop the entry for a released provider node.
pub(crate) fn remove(index: usize) {
    ENTRIES.with(|entries| {
        entries.borrow_mut().remove(&index);
    });
}

/// Reset all entries (for testing). Called from `reset_tree`.
pub(crate) fn reset_entries() {
    ENTRIES.with(|entries| entries.borrow_mut().clear());
}

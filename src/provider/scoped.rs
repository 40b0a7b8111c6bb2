//! Scoped provider - exposes one object to every descendant of its node.
//!
//! A `ScopedProvider<T>` is a transient descriptor: it is recreated freely,
//! while the object it holds lives on. Mounting inserts a node into the tree
//! and records the object for that node; [`ScopedProvider::of`] resolves the
//! nearest such node above a position.

use std::any::{TypeId, type_name};
use std::rc::Rc;

use tracing::{debug, trace};

use super::registry as entries;
use crate::error::{ProviderError, Result};
use crate::tree::{
    Position, allocate_index, get_current_parent_index, get_parent_index, on_destroy,
    pop_parent_context, push_parent_context, release_index, set_parent_index,
};
use crate::types::{Children, Cleanup};

/// Makes a single typed object available to all descendants of its node,
/// without threading it through every intermediate component.
///
/// The object is fixed for the life of the descriptor: a new object requires
/// a new provider, never mutation of an existing one.
pub struct ScopedProvider<T: 'static> {
    object: Rc<T>,
    id: Option<String>,
    child: Option<Children>,
}

impl<T: 'static> ScopedProvider<T> {
    /// New provider descriptor holding `object`.
    pub fn new(object: T) -> Self {
        Self::from_shared(Rc::new(object))
    }

    /// New provider descriptor sharing an already-shared object.
    pub fn from_shared(object: Rc<T>) -> Self {
        Self {
            object,
            id: None,
            child: None,
        }
    }

    /// Set the node ID used for this provider's tree node.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach the subtree built under this provider.
    pub fn with_child(mut self, child: Children) -> Self {
        self.child = Some(child);
        self
    }

    /// The held object.
    pub fn object(&self) -> Rc<T> {
        Rc::clone(&self.object)
    }

    /// New descriptor with the same object and ID but a different child.
    ///
    /// Pure: the receiver is untouched. This is what [`ProviderList`]
    /// uses to attach the composed subtree to each descriptor.
    ///
    /// [`ProviderList`]: super::ProviderList
    pub fn rebind(&self, child: Children) -> Self {
        Self {
            object: Rc::clone(&self.object),
            id: self.id.clone(),
            child: Some(child),
        }
    }

    /// Whether replacing the provider at a node with this instance must
    /// notify dependents.
    ///
    /// Unconditionally `false`: the wrapper is a pass-through, so its
    /// recreation carries no observable change. Descendants react only to
    /// what the object itself exposes (signals, callbacks), never to the
    /// wrapper being swapped.
    pub fn update_should_notify(&self, _old: &Rc<T>) -> bool {
        false
    }

    /// Insert this provider into the tree under the current parent context.
    ///
    /// Returns a cleanup that releases the provider's node and, recursively,
    /// everything built beneath it.
    pub fn mount(self) -> Cleanup {
        let index = allocate_index(self.id.as_deref());
        if let Some(parent) = get_current_parent_index() {
            set_parent_index(index, parent);
        }

        // An ID collision reuses the existing node; its live entry is
        // replaced and the entry-removal callback is already registered.
        let replaces = entries::contains(index);
        if replaces {
            debug!(
                index,
                provided = type_name::<T>(),
                "provider id reuse replaces live entry"
            );
        }
        entries::insert(index, TypeId::of::<T>(), type_name::<T>(), self.object);
        if !replaces {
            on_destroy(index, move || entries::remove(index));
        }
        trace!(index, provided = type_name::<T>(), "mounted provider");

        if let Some(children) = self.child {
            push_parent_context(index);
            children();
            pop_parent_context();
        }

        Box::new(move || release_index(index))
    }

    /// Replace the provider wrapper at an already-mounted provider node.
    ///
    /// The suppression hook decides whether dependents are notified; for this
    /// provider it never allows it, so descendants keep running undisturbed
    /// even though the node now hands out this instance's object.
    pub fn update(self, index: usize) -> Result<()> {
        let old = entries::typed_object::<T>(index)?;
        let notify = self.update_should_notify(&old);
        entries::replace(index, TypeId::of::<T>(), type_name::<T>(), self.object, notify)
    }

    /// Nearest provider of `T` above `position`.
    ///
    /// Walks strictly upward through parent links; the first match wins.
    /// Fails with [`ProviderError::NotFound`] when no ancestor provides `T` -
    /// a missing dependency is a structural bug, never a default value.
    pub fn of(position: Position) -> Result<Rc<T>> {
        let mut current = get_parent_index(position.index());
        while let Some(index) = current {
            if let Some(object) = entries::lookup::<T>(index) {
                return Ok(object);
            }
            current = get_parent_index(index);
        }

        debug!(
            requested = type_name::<T>(),
            position = %position,
            "provider lookup failed"
        );
        Err(ProviderError::NotFound {
            type_name: type_name::<T>(),
            position: position.describe(),
        })
    }
}

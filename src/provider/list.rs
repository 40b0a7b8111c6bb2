//! Provider list - composes several providers into one nested chain.
//!
//! `ProviderList` is sugar over manual nesting: instead of indenting one
//! `with_child` closure per provider, callers hand over descriptors in order
//! and a single inner subtree. The list folds from the last descriptor
//! inward, so the first-listed provider ends up outermost.

use crate::types::{Children, Cleanup};

use super::scoped::ScopedProvider;

/// Type-erased provider descriptor.
///
/// Lets providers holding different object types share one list. The only
/// thing the list needs from a descriptor is "mount yourself with this
/// subtree as your child".
pub trait AnyProvider {
    /// Mount with `child` attached, replacing any child the descriptor
    /// already carried.
    fn mount_with(self: Box<Self>, child: Children) -> Cleanup;
}

impl<T: 'static> AnyProvider for ScopedProvider<T> {
    fn mount_with(self: Box<Self>, child: Children) -> Cleanup {
        self.rebind(child).mount()
    }
}

/// Composes N providers into one nested chain, equivalent to nesting them by
/// hand: first-listed outermost, last-listed the immediate parent of `child`.
pub struct ProviderList {
    providers: Vec<Box<dyn AnyProvider>>,
    child: Children,
}

impl ProviderList {
    /// New list of provider descriptors around a common inner subtree.
    pub fn new(providers: Vec<Box<dyn AnyProvider>>, child: Children) -> Self {
        Self { providers, child }
    }

    /// Mount the composed chain under the current parent context.
    ///
    /// Folds the descriptors from last to first, each wrapping the current
    /// subtree as its child. The returned cleanup releases the outermost
    /// provider's node, which reclaims the whole chain recursively.
    pub fn mount(self) -> Cleanup {
        let ProviderList {
            mut providers,
            child,
        } = self;

        if providers.is_empty() {
            // Nothing to compose: the child mounts directly under the current
            // parent and is reclaimed when that parent is released.
            child();
            return Box::new(|| {});
        }
        let outermost = providers.remove(0);

        let mut subtree = child;
        for provider in providers.into_iter().rev() {
            let inner = subtree;
            subtree = Box::new(move || {
                // The nested cleanup is dropped: inner nodes are released
                // when the enclosing provider's node is released.
                drop(provider.mount_with(inner));
            });
        }

        outermost.mount_with(subtree)
    }
}

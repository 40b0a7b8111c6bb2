//! Core types - cleanup and children closures.
//!
//! Every tree-building call in this crate returns a [`Cleanup`] and takes its
//! subtree as a [`Children`] closure. Subtrees are deferred closures rather
//! than pre-built values so the parent-context stack can assign parents
//! correctly: a closure runs while its owner's index is on the stack.

/// Cleanup function returned by tree-building calls.
///
/// Call this to unmount the subtree the call created and release its indices.
pub type Cleanup = Box<dyn FnOnce()>;

/// Deferred subtree builder.
///
/// Runs exactly once, under the parent context of the node it is attached to.
pub type Children = Box<dyn FnOnce()>;

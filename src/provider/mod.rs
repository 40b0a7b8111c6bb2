//! Providers - scoped dependency injection over the tree.
//!
//! This module provides the two provider building blocks:
//! - [`ScopedProvider`] - exposes one typed object to every descendant of its
//!   node, resolved with nearest-ancestor-wins lookup
//! - [`ProviderList`] - folds an ordered list of providers into one nested
//!   chain, first-listed outermost
//!
//! # Pattern: object stays outside
//!
//! A provider shares its object (`Rc<T>`), it never owns the object's
//! lifecycle. Creation and disposal belong to the caller, typically scoped to
//! the application root. Recreating a provider wrapper therefore carries no
//! meaning of its own, which is why wrapper replacement is suppressed from
//! dependents (see [`ScopedProvider::update_should_notify`]).
//!
//! ```ignore
//! use spark_provider::{node, NodeProps, Position, ScopedProvider};
//!
//! let session = Session::connect()?;
//! let cleanup = ScopedProvider::new(session)
//!     .with_child(Box::new(|| {
//!         node(NodeProps {
//!             id: Some("status".into()),
//!             ..Default::default()
//!         });
//!     }))
//!     .mount();
//!
//! let status = spark_provider::get_index("status").unwrap();
//! let session = ScopedProvider::<Session>::of(Position::node(status))?;
//! ```

mod list;
mod registry;
mod scoped;

pub use list::*;
pub use scoped::*;

pub(crate) use registry::reset_entries;

//! Error types for provider lookup and update.
//!
//! Every failure here signals a structural mistake in the tree (a provider
//! missing, misplaced, or of the wrong type). Nothing is retried and nothing
//! falls back to a default value: callers must never silently receive an
//! absent dependency.

use thiserror::Error;

/// Failure modes of provider lookup and update.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No provider of the requested type exists above the originating
    /// position. The provider is either missing or mounted below the
    /// consumer.
    #[error(
        "no provider of `{type_name}` found above `{position}`; \
         mount a ScopedProvider<{type_name}> above the consumer"
    )]
    NotFound {
        type_name: &'static str,
        position: String,
    },

    /// An update targeted a node that holds no provider entry.
    #[error("node {index} is not a mounted provider")]
    NotMounted { index: usize },

    /// An update targeted a provider holding a different type.
    #[error("provider at node {index} holds `{found}`, not `{expected}`")]
    TypeMismatch {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
}

/// Convenience alias for results in this crate.
pub type Result<T> = std::result::Result<T, ProviderError>;

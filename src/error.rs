//! Error types for the registries-config merge and projection pipeline.

use thiserror::Error;

/// Errors that can surface from [`crate::project_registries_conf`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectError {
    /// An entry in `insecure` or `blocked` was not a syntactically valid
    /// registries.conf scope (see [`crate::is_valid_registries_conf_scope`]).
    #[error("invalid registries.conf scope {scope:?}")]
    InvalidScope {
        /// The offending scope string.
        scope: String,
    },

    /// Internal: [`crate::mirrors_adjusted_for_nested_scope`] was invoked
    /// with a child scope that is not nested inside the parent scope. This
    /// cannot be triggered by a normal caller of
    /// [`crate::project_registries_conf`]; it indicates a bug in the
    /// projector itself.
    #[error("scope {child:?} is not nested inside {parent:?}")]
    ScopeMismatch {
        /// The scope that was expected to be the broader one.
        parent: String,
        /// The scope that was expected to be nested inside `parent`.
        child: String,
    },
}

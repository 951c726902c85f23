//! Errors reported by [`Tree`][crate::Tree] operations.

/// Errors returned when a [`Tree`][crate::Tree] can't perform a removal.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The tree has no nodes at all.
    #[error("The tree is empty.")]
    EmptyTree,
    /// No node in the tree holds the requested value.
    #[error("The value was not found in the tree.")]
    NotFound,
}

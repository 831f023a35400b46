//! Error types for the editing core.

/// Result type alias for flexlab operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while editing or restoring item attributes.
///
/// Per-field validation failures are deliberately *not* represented here:
/// they are local state on the edit session (an error flag per field plus the
/// `validation_changed` signal) and only gate the commit. Likewise a commit
/// or cancel against an item that has already been removed is a logged no-op,
/// not an error; the edit's target is simply gone.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Index outside the collection bounds.
    #[error("index {index} out of range (collection holds {count} items)")]
    IndexOutOfRange { index: usize, count: usize },

    /// Callback dispatch against an item identity that has left the collection.
    #[error("item is no longer part of the collection")]
    StaleItem,

    /// A persisted record names an item kind this build does not recognize.
    #[error("unknown item kind '{0}'")]
    UnknownItemKind(String),

    /// Commit attempted while one or more fields are marked invalid.
    #[error("{count} field(s) failed validation; commit rejected")]
    InvalidFields { count: usize },
}

impl Error {
    /// Create an out-of-range error for the given index and collection size.
    pub fn index_out_of_range(index: usize, count: usize) -> Self {
        Self::IndexOutOfRange { index, count }
    }

    /// Create an unknown-kind error.
    pub fn unknown_item_kind(kind: impl Into<String>) -> Self {
        Self::UnknownItemKind(kind.into())
    }
}

//! Error types for list operations.

use thiserror::Error;

/// Result alias for list operations.
pub type Result<T> = core::result::Result<T, ListError>;

/// Error returned when a list operation rejects its arguments.
///
/// A failed operation never mutates the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    /// The index violates the bound of the operation.
    ///
    /// `node_at` and `insert_at` accept `index == len`; `block_at` and
    /// `remove_at` require `index < len`.
    #[error("index {index} out of range for list of length {len}")]
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// Length of the list at the time of the call.
        len: usize,
    },

    /// A required node or block could not be used.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
}

impl ListError {
    #[inline]
    pub(crate) const fn out_of_range(index: usize, len: usize) -> Self {
        ListError::OutOfRange { index, len }
    }

    /// Returns `true` for [`ListError::OutOfRange`].
    #[inline]
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self, ListError::OutOfRange { .. })
    }

    /// Returns `true` for [`ListError::InvalidArgument`].
    #[inline]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, ListError::InvalidArgument(_))
    }
}

/// Why an argument was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    /// The operation needs at least one node.
    #[error("the list is empty")]
    EmptyList,

    /// The key does not name a node of this list. It belongs to another
    /// list, or its node was already removed.
    #[error("the node is not in the list")]
    NodeNotFound,

    /// No node of the list wraps the given block.
    #[error("the block is not in the list")]
    BlockNotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        let oor = ListError::out_of_range(5, 3);
        assert!(oor.is_out_of_range());
        assert!(!oor.is_invalid_argument());

        let invalid: ListError = InvalidArgument::NodeNotFound.into();
        assert!(invalid.is_invalid_argument());
        assert!(!invalid.is_out_of_range());
    }

    #[test]
    fn messages() {
        assert_eq!(
            ListError::out_of_range(5, 3).to_string(),
            "index 5 out of range for list of length 3"
        );
        assert_eq!(
            ListError::from(InvalidArgument::EmptyList).to_string(),
            "the list is empty"
        );
        assert_eq!(
            ListError::from(InvalidArgument::BlockNotFound).to_string(),
            "the block is not in the list"
        );
    }
}

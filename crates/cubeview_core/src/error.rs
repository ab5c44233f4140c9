use crate::FACELET_COUNT;

/// Error produced when a facelet state or move cannot be used.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    /// Facelet state does not have exactly [`FACELET_COUNT`] characters.
    #[error("facelet state must have {FACELET_COUNT} characters; got {len}")]
    InvalidState {
        /// Number of characters in the rejected state.
        len: usize,
    },
    /// Move token could not be parsed.
    #[error("invalid move {token:?}: {reason}")]
    InvalidMove {
        /// Rejected token.
        token: String,
        /// What is wrong with it.
        reason: MoveError,
    },
}

/// Reason that a move token is invalid.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Token is empty.
    #[error("empty move")]
    Empty,
    /// First character is not one of `UDLRFB`.
    #[error("unknown face {0:?}")]
    UnknownFace(char),
    /// Suffix is not one of `'`, `2`, or `2'`.
    #[error("unknown modifier {0:?}")]
    UnknownModifier(String),
}

/// Error type for history buffer operations.
use thiserror::Error;

/// Errors returned by `HistoryBuffer`.
///
/// Navigation (`undo`, `repeat`, `forget_current`) never fails; it is a
/// no-op at the boundaries. Only reading the current item of an empty
/// history and constructing with a zero capacity are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("there are no items in the history")]
    EmptyHistory,
    #[error("history capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),
}

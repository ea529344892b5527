/*!
# Core Error Type

Structural failures of the [`IndexedMinHeap`](crate::core::heap::IndexedMinHeap) are
programming errors, not domain outcomes, and are surfaced through this type. Domain
outcomes — a missing source/target, a negative edge weight, a disconnected graph — are
never represented as `CoreError`; they are encoded directly in the algorithms' `Result`
structs (see `core::dijkstra`, `core::astar`, `core::mst`).
*/

use std::error::Error;
use std::fmt;

/// Unified error type for the heap's structural failure modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// `pop`/`top` called on a heap with no live entries.
    EmptyHeap,
    /// `get`/`decrease_key` referenced a handle that is not live (already popped, or
    /// never issued by this heap).
    UnknownHandle,
    /// `decrease_key` was given a payload that does not strictly dominate the entry's
    /// current payload under the heap's comparator.
    NotSmaller,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::EmptyHeap => write!(f, "heap is empty"),
            CoreError::UnknownHandle => write!(f, "handle does not refer to a live entry"),
            CoreError::NotSmaller => {
                write!(f, "decrease_key value does not dominate the current payload")
            }
        }
    }
}

impl Error for CoreError {}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CoreError::EmptyHeap), "heap is empty");
        assert_eq!(
            format!("{}", CoreError::UnknownHandle),
            "handle does not refer to a live entry"
        );
        assert_eq!(
            format!("{}", CoreError::NotSmaller),
            "decrease_key value does not dominate the current payload"
        );
    }
}

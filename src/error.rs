//! Error type shared by the ring core and the queue surface.

use thiserror::Error;

/// Failures surfaced by fallible ring and queue operations.
///
/// Every operation returning an `Error` leaves the ring exactly as it was
/// before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An argument was absent or out of range (zero-capacity buffer,
    /// zero group size, ...).
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument
        reason: &'static str,
    },

    /// Allocating the payload copy or the node failed.
    #[error("allocation failed: requested {size} bytes")]
    OutOfMemory {
        /// Number of bytes requested
        size: usize,
    },

    /// Removal was attempted on an empty ring.
    #[error("the queue is empty")]
    Empty,

    /// Duplicate-run removal was attempted on a ring that is not sorted
    /// ascending.
    #[error("the queue is not sorted in ascending order")]
    Unsorted,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(reason: &'static str) -> Self {
        Error::InvalidArgument { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn error_messages() {
        assert_eq!(
            Error::invalid("zero capacity").to_string(),
            "invalid argument: zero capacity"
        );
        assert_eq!(
            Error::OutOfMemory { size: 32 }.to_string(),
            "allocation failed: requested 32 bytes"
        );
        assert_eq!(Error::Empty.to_string(), "the queue is empty");
    }
}

use thiserror::Error;

/// Error types for FIFO operations.
///
/// Every failing call reports the error synchronously and leaves the FIFO
/// state exactly as it was before the call. None of these conditions are
/// fatal to the instance except [`FifoError::ResourceExhausted`], which can
/// only occur at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FifoError {
    /// A reserve (or internal region request) exceeded the free space.
    ///
    /// Non-fatal: retry once data has been read out, or reserve less.
    #[error("not enough free space in FIFO for reserve - requested {requested}, available {available}")]
    CapacityExceeded {
        /// Number of elements requested.
        requested: usize,
        /// Number of elements actually available.
        available: usize,
    },
    /// A commit exceeded the currently reserved amount.
    ///
    /// Indicates a caller protocol violation: committing more than was
    /// reserved.
    #[error("not enough reserved space in FIFO for commit - requested {requested}, available {available}")]
    ReservationExceeded {
        /// Number of elements requested.
        requested: usize,
        /// Number of elements actually reserved.
        available: usize,
    },
    /// A read exceeded the currently committed amount.
    ///
    /// Non-fatal: wait for more data to be committed.
    #[error("read larger than committed size - requested {requested}, available {available}")]
    ReadUnderflow {
        /// Number of elements requested.
        requested: usize,
        /// Number of elements actually committed.
        available: usize,
    },
    /// The backing buffer could not be allocated at construction.
    #[error("failed to allocate FIFO backing buffer of {capacity} elements")]
    ResourceExhausted {
        /// The capacity that was requested.
        capacity: usize,
    },
}

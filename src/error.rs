//! Error types shared by the bounded channel and its configuration.

/// Reasons a [`BlockChannel`](crate::BlockChannel) could not be created.
///
/// These are reported once, at construction, and are fatal to that instance.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CreateError {
    /// `block_size` was zero.
    #[error("block size must be at least one byte")]
    ZeroBlockSize,
    /// `capacity` was zero.
    #[error("capacity must be at least one block")]
    ZeroCapacity,
    /// `block_size * capacity` does not fit in `usize`.
    #[error("{block_size} bytes x {capacity} blocks overflows the address space")]
    Overflow { block_size: usize, capacity: usize },
    /// The storage buffer could not be allocated.
    #[error("failed to allocate {bytes} bytes of slot storage")]
    Allocation { bytes: usize },
}

/// Reasons a put, get or peek did not transfer a block.
///
/// `SizeMismatch` is a programming error at the call site. The other
/// variants are ordinary outcomes under load; retry later.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferError {
    /// The caller's buffer does not fit the channel's block size.
    #[error("buffer of {actual} bytes does not fit block size {expected}")]
    SizeMismatch { expected: usize, actual: usize },
    /// Every slot is occupied.
    #[error("channel full")]
    Full,
    /// No slot is occupied.
    #[error("channel empty")]
    Empty,
    /// A blocking call ran out of time before the channel had room or data.
    #[error("timed out")]
    Timeout,
}

impl TransferError {
    /// Returns `true` for `Full`, `Empty` and `Timeout`.
    #[inline]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, TransferError::SizeMismatch { .. })
    }
}

/// Result type for block transfers.
pub type Result<T> = std::result::Result<T, TransferError>;

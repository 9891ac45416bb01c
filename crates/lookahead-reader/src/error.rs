use thiserror::Error;

/// Errors raised by [`RingBuffer`](crate::RingBuffer) operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// A ring buffer must hold at least one character.
    #[error("buffer capacity must be greater than zero")]
    ZeroCapacity,
    /// A character was added while every slot held unconsumed input.
    #[error("buffer full")]
    Full,
    /// A character was removed while no input was buffered.
    #[error("buffer empty")]
    Empty,
    /// A mark was requested with a read-ahead limit the buffer cannot honor.
    #[error("mark limit {limit} exceeds buffer capacity {capacity}")]
    MarkLimitExceedsCapacity {
        /// The requested read-ahead limit.
        limit: usize,
        /// The fixed capacity of the buffer.
        capacity: usize,
    },
    /// `reset` was called without a mark, or after the mark was overwritten.
    #[error("not marked or mark invalidated")]
    InvalidMark,
}

/// Errors raised by [`LookAheadReader`](crate::LookAheadReader).
///
/// `E` is the error type of the wrapped [`Source`](crate::Source); it is
/// passed through unchanged in [`ReadError::Source`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadError<E> {
    /// More characters were requested than the buffer can hold.
    #[error("requested lookahead exceeds buffer capacity ({requested} > {capacity})")]
    LookaheadExceedsCapacity {
        /// Number of buffered characters that were requested.
        requested: usize,
        /// The fixed capacity of the buffer.
        capacity: usize,
    },
    /// A ring buffer operation failed.
    #[error(transparent)]
    Buffer(#[from] BufferError),
    /// The wrapped source failed.
    #[error("source error: {0}")]
    Source(E),
}

/// Coarse classification of an error, for callers that only need to decide
/// how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A lookahead or mark limit exceeded the fixed capacity. Construct the
    /// reader with a larger capacity.
    Configuration,
    /// An internal invariant was violated.
    State,
    /// The source failed.
    Stream,
    /// `reset` had no valid mark to return to.
    Mark,
}

impl BufferError {
    /// Classifies this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ZeroCapacity | Self::MarkLimitExceedsCapacity { .. } => ErrorKind::Configuration,
            Self::Full | Self::Empty => ErrorKind::State,
            Self::InvalidMark => ErrorKind::Mark,
        }
    }
}

impl<E> ReadError<E> {
    /// Classifies this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LookaheadExceedsCapacity { .. } => ErrorKind::Configuration,
            Self::Buffer(err) => err.kind(),
            Self::Source(_) => ErrorKind::Stream,
        }
    }
}

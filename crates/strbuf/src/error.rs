use thiserror::Error;

use crate::size::MAX_SIZE;

/// A fault raised by an operation on an existing buffer.
///
/// Every fault also sets the buffer's sticky error flag (see
/// [`Buffer::error`](crate::Buffer::error)). The buffer is left as it was
/// before the call, except that the replacing operations
/// ([`cpy`](crate::Buffer::cpy), [`printf`](crate::Buffer::printf) and
/// friends) leave it empty.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The heap allocator or the slot pool could not provide storage.
    #[error("out of memory")]
    OutOfMemory,
    /// The storage has a fixed capacity and it is exhausted.
    #[error("no room left in fixed-capacity storage")]
    NoRoom,
    /// The request cannot be represented in the configured size type.
    #[error("size or position would exceed {}", MAX_SIZE)]
    RangeOverflow,
    /// A raw mode value that is neither insert nor overwrite.
    #[error("invalid mode {0}")]
    InvalidMode(u8),
    /// `unputc` was called without an immediately preceding put.
    #[error("nothing to undo")]
    NothingToUndo,
    /// The text-formatting primitive failed or was inconsistent between
    /// measuring and rendering.
    #[error("formatting failed")]
    Format,
}

/// Why a constructor did not produce a buffer.
///
/// Kept apart from [`Error`] because there is no buffer yet to carry the
/// sticky flag.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionError {
    /// A zero-length array cannot even hold the terminator.
    #[error("caller-supplied array is empty")]
    EmptyArray,
    /// `reuse` found no NUL byte within the array.
    #[error("no terminator within the caller-supplied array")]
    Unterminated,
    /// The initial content is longer than the storage can hold.
    #[error("content does not fit in the allocated storage")]
    TooLong,
    /// Storage allocation or formatting failed.
    #[error(transparent)]
    Fault(#[from] Error),
}

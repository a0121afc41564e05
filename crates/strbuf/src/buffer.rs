use core::{ffi::CStr, fmt};

use bstr::ByteSlice;

#[cfg(feature = "alloc")]
use crate::{AllocOptions, storage::Heap};
use crate::{
    ConstructionError, Error, Mode,
    size::{MAX_SIZE, narrow},
    state::{CursorState, Flags},
    storage::{Allocate, Borrowed, Ownership, Storage},
    write::bounded_len,
};

/// A NUL-terminated byte string with a cursor.
///
/// Writes happen at the cursor, either shifting the tail ([`Mode::Insert`])
/// or replacing it ([`Mode::Overwrite`]). The content is always followed by
/// a NUL byte, so [`as_ptr`](Buffer::as_ptr) can be handed to C string
/// consumers at any time.
///
/// Failing operations return an [`Error`], leave the buffer untouched and set
/// a sticky flag readable through [`error`](Buffer::error), so a sequence of
/// writes can be checked once at the end.
///
/// # Examples
///
/// ```rust
/// use strbuf::{HeapBuffer, Mode};
///
/// let mut sb = HeapBuffer::alloc(0).unwrap();
/// sb.putc(b'a').unwrap();
/// sb.puts(b"bc").unwrap();
/// assert_eq!(sb.as_bytes(), b"abc");
///
/// sb.seek(1).unwrap();
/// sb.set_mode(Mode::Overwrite);
/// sb.puts(b"XY").unwrap();
/// assert_eq!(sb.as_bytes(), b"aXY");
/// assert!(!sb.error());
/// ```
pub struct Buffer<S: Storage> {
    pub(crate) state: CursorState,
    pub(crate) storage: S,
}

/// A buffer over a caller-owned array.
pub type BorrowedBuffer<'a> = Buffer<Borrowed<'a>>;

/// A buffer over owned heap memory.
#[cfg(feature = "alloc")]
pub type HeapBuffer = Buffer<Heap>;

/// A buffer over a slot of the static pool.
#[cfg(feature = "pool")]
pub type PooledBuffer = Buffer<crate::storage::Pooled>;

impl<'a> Buffer<Borrowed<'a>> {
    /// Uses `bytes` as empty storage. Arrays longer than
    /// [`MAX_SIZE`](crate::MAX_SIZE) are only used up to that length.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::EmptyArray`] if `bytes` has no room for the
    /// terminator.
    pub fn wrap(bytes: &'a mut [u8]) -> Result<Self, ConstructionError> {
        if bytes.is_empty() {
            return Err(ConstructionError::EmptyArray);
        }
        log::trace!("use buffer of {} bytes", bytes.len());
        let mut storage = Borrowed::new(bytes);
        storage.bytes_mut()[0] = 0;
        Ok(Self::from_parts(storage, 0))
    }

    /// Uses `bytes` as storage, keeping the NUL-terminated string already at
    /// its start as the initial content. The cursor is placed at its end.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::EmptyArray`] for an empty array and
    /// [`ConstructionError::Unterminated`] when no NUL byte lies within the
    /// usable part of the array.
    pub fn reuse(bytes: &'a mut [u8]) -> Result<Self, ConstructionError> {
        if bytes.is_empty() {
            return Err(ConstructionError::EmptyArray);
        }
        log::trace!("reuse buffer of {} bytes", bytes.len());
        let storage = Borrowed::new(bytes);
        let len = storage
            .bytes()
            .find_byte(0)
            .ok_or(ConstructionError::Unterminated)?;
        Ok(Self::from_parts(storage, len))
    }
}

impl<S: Allocate> Buffer<S> {
    /// Allocates an empty buffer with room for about `size_hint` bytes.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfMemory`] (wrapped) when storage cannot be obtained.
    pub fn alloc(size_hint: usize) -> Result<Self, ConstructionError> {
        let mut storage = S::allocate(size_hint)?;
        storage.bytes_mut()[0] = 0;
        Ok(Self::from_parts(storage, 0))
    }

    /// Copies `s` up to its first NUL byte (or all of it) into a new buffer.
    ///
    /// # Errors
    ///
    /// As [`ndup`](Buffer::ndup).
    pub fn dup(s: &[u8]) -> Result<Self, ConstructionError> {
        Self::ndup(s, usize::MAX)
    }

    /// Copies at most `n` bytes of `s`, stopping early at a NUL byte, into a
    /// new buffer. The cursor is placed at the end of the copy.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::TooLong`] when the copy does not fit the size
    /// type or the allocated storage, and a wrapped [`Error::OutOfMemory`]
    /// when storage cannot be obtained.
    pub fn ndup(s: &[u8], n: usize) -> Result<Self, ConstructionError> {
        let len = bounded_len(s, n);
        if len >= MAX_SIZE {
            return Err(ConstructionError::TooLong);
        }
        let mut sb = Self::alloc(len + 1)?;
        if sb.capacity() <= len {
            return Err(ConstructionError::TooLong);
        }
        let bytes = sb.storage.bytes_mut();
        bytes[..len].copy_from_slice(&s[..len]);
        bytes[len] = 0;
        sb.state = CursorState::with_len(narrow(len));
        Ok(sb)
    }
}

#[cfg(feature = "alloc")]
impl Buffer<Heap> {
    /// Like [`alloc`](Buffer::alloc), with explicit sizing options.
    ///
    /// # Errors
    ///
    /// A wrapped [`Error::OutOfMemory`] when the allocator refuses.
    pub fn alloc_with(size_hint: usize, options: &AllocOptions) -> Result<Self, ConstructionError> {
        let mut storage = Heap::allocate_with(size_hint, options)?;
        storage.bytes_mut()[0] = 0;
        Ok(Self::from_parts(storage, 0))
    }
}

impl<S: Storage> Buffer<S> {
    pub(crate) fn from_parts(storage: S, len: usize) -> Self {
        debug_assert!(len < storage.capacity());
        debug_assert_eq!(storage.bytes()[len], 0);
        Self {
            state: CursorState::with_len(narrow(len)),
            storage,
        }
    }

    /// Records `error` in the sticky flag and hands it back for returning.
    pub(crate) fn fail(&mut self, error: Error) -> Error {
        log::debug!("buffer fault: {error}");
        self.state.flags.insert(Flags::ERROR);
        error
    }

    /// The content, without the terminator.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage.bytes()[..self.state.len()]
    }

    /// The content followed by its terminator.
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.storage.bytes()[..=self.state.len()]
    }

    /// Mutable access to the content. The terminator is not included, so it
    /// cannot be disturbed; writing NUL bytes inside the content is allowed
    /// and makes [`len`](Buffer::len) exceed the C string length.
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        let len = self.state.len();
        &mut self.storage.bytes_mut()[..len]
    }

    /// The content as a C string, up to the first NUL byte.
    #[must_use]
    pub fn as_cstr(&self) -> &CStr {
        CStr::from_bytes_until_nul(self.as_bytes_with_nul()).unwrap_or_default()
    }

    /// Pointer to the terminated content, valid until the next mutation.
    #[must_use]
    pub fn as_ptr(&self) -> *const u8 {
        self.storage.bytes().as_ptr()
    }

    /// Mutable pointer to the terminated content, valid until the next
    /// mutation.
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.storage.bytes_mut().as_mut_ptr()
    }

    /// Length of the content in bytes, terminator excluded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.len()
    }

    /// Whether the content is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.len == 0
    }

    /// Usable bytes of the backing array, terminator included.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Who owns the backing array.
    #[must_use]
    pub fn ownership(&self) -> Ownership {
        self.storage.ownership()
    }

    /// Cursor offset. May exceed [`len`](Buffer::len) after a seek past the
    /// end; the gap is zero-filled by the next write.
    #[must_use]
    pub fn position(&self) -> usize {
        self.state.pos()
    }

    /// Moves the cursor. Discards the undo level and any pending restore.
    ///
    /// # Errors
    ///
    /// [`Error::RangeOverflow`] when `pos` is not representable, or for
    /// fixed-capacity storage, when `pos` lies outside the array.
    pub fn seek(&mut self, pos: usize) -> Result<(), Error> {
        log::trace!("seek to {pos}");
        if pos >= MAX_SIZE || (!S::GROWABLE && pos >= self.capacity()) {
            return Err(self.fail(Error::RangeOverflow));
        }
        self.state.pos = narrow(pos);
        self.state.forget_edits();
        Ok(())
    }

    /// Current edit mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Switches between insert and overwrite. Discards the undo level.
    pub fn set_mode(&mut self, mode: Mode) {
        self.state.flags.remove(Flags::UNDO | Flags::UNDO_EXTENDS);
        self.state
            .flags
            .set(Flags::OVERWRITE, mode == Mode::Overwrite);
    }

    /// [`set_mode`](Buffer::set_mode) for callers holding the mode as a raw
    /// integer (`0` insert, `1` overwrite).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidMode`] for any other value; the mode is unchanged.
    pub fn set_mode_raw(&mut self, mode: u8) -> Result<(), Error> {
        match Mode::try_from(mode) {
            Ok(mode) => {
                self.set_mode(mode);
                Ok(())
            }
            Err(error) => Err(self.fail(error)),
        }
    }

    /// Whether any operation has failed since construction or the last
    /// [`clear_error`](Buffer::clear_error).
    #[must_use]
    pub fn error(&self) -> bool {
        self.state.flags.contains(Flags::ERROR)
    }

    /// Resets the sticky error flag.
    pub fn clear_error(&mut self) {
        self.state.flags.remove(Flags::ERROR);
    }

    /// Panics if the buffer's structural invariants do not hold.
    #[cfg(any(test, feature = "fuzzing"))]
    pub fn check_invariants(&self) {
        let len = self.state.len();
        assert!(len < self.capacity(), "len {len} reaches capacity");
        assert_eq!(self.storage.bytes()[len], 0, "missing terminator");
        assert!(self.state.pos() < MAX_SIZE, "position out of range");
        if !S::GROWABLE {
            assert!(self.state.pos() < self.capacity(), "position past array");
        }
    }
}

impl<S: Storage> fmt::Debug for Buffer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("content", &self.as_bytes().as_bstr())
            .field("position", &self.position())
            .field("capacity", &self.capacity())
            .field("mode", &self.mode())
            .field("error", &self.error())
            .field("ownership", &self.ownership())
            .finish()
    }
}

impl<S: Storage> fmt::Display for Buffer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bytes().as_bstr(), f)
    }
}

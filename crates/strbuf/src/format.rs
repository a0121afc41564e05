//! Formatted text at the cursor.
//!
//! Formatting itself is delegated to a [`TextFormat`] implementation, which
//! reports how long its output is and then renders it, terminator included,
//! straight into a reservation. `core::fmt` arguments implement it, so
//! `format_args!` works out of the box.

use core::fmt;

use crate::{
    Buffer, ConstructionError, Error,
    size::{MAX_SIZE, narrow},
    state::CursorState,
    storage::{Allocate, Storage},
};

/// A text-formatting primitive: measures its output, then renders it.
pub trait TextFormat {
    /// Exact number of bytes [`render`](TextFormat::render) will produce,
    /// terminator excluded.
    ///
    /// # Errors
    ///
    /// [`Error::Format`] if the text cannot be produced.
    fn measure(&self) -> Result<usize, Error>;

    /// Renders the text into `dest`, which is one byte longer than the
    /// measured length, and terminates it with a NUL in that last byte.
    ///
    /// # Errors
    ///
    /// [`Error::Format`] if rendering fails or produces a different length
    /// than measured.
    fn render(&self, dest: &mut [u8]) -> Result<(), Error>;
}

struct Counter(usize);

impl fmt::Write for Counter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

struct SliceWriter<'a> {
    dest: &'a mut [u8],
    written: usize,
}

impl fmt::Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.written + s.len();
        let dest = self.dest.get_mut(self.written..end).ok_or(fmt::Error)?;
        dest.copy_from_slice(s.as_bytes());
        self.written = end;
        Ok(())
    }
}

impl TextFormat for fmt::Arguments<'_> {
    fn measure(&self) -> Result<usize, Error> {
        let mut counter = Counter(0);
        fmt::write(&mut counter, *self).map_err(|_| Error::Format)?;
        Ok(counter.0)
    }

    fn render(&self, dest: &mut [u8]) -> Result<(), Error> {
        let Some((terminator, body)) = dest.split_last_mut() else {
            return Err(Error::Format);
        };
        let mut writer = SliceWriter {
            dest: body,
            written: 0,
        };
        fmt::write(&mut writer, *self).map_err(|_| Error::Format)?;
        if writer.written != writer.dest.len() {
            return Err(Error::Format);
        }
        *terminator = 0;
        Ok(())
    }
}

impl<S: Storage> Buffer<S> {
    /// Writes formatted text at the cursor, following the mode.
    ///
    /// Either the whole text is written or nothing changes. In overwrite mode
    /// the bytes being replaced are kept after the end of the string until
    /// the formatter has succeeded, so the storage needs room for them too.
    ///
    /// # Errors
    ///
    /// [`Error::Format`] from the formatter, otherwise as
    /// [`reserve`](Buffer::reserve).
    pub fn putf<F: TextFormat>(&mut self, text: F) -> Result<(), Error> {
        let n = match text.measure() {
            Ok(n) => n,
            Err(error) => return Err(self.fail(error)),
        };
        let saved = self.state;
        let start = self.reserve_at_cursor(n)?;

        let replaced = if saved.is_overwrite() {
            n.min(saved.len().saturating_sub(saved.pos()))
        } else {
            0
        };
        let parked = self.state.len() + 1;
        if replaced > 0 {
            if let Err(error) = self.ensure(replaced, self.state.len()) {
                self.roll_back(saved, n, 0, parked);
                return Err(self.fail(error));
            }
            self.storage
                .bytes_mut()
                .copy_within(start..start + replaced, parked);
        }

        let rendered = text.render(&mut self.storage.bytes_mut()[start..=start + n]);
        // The formatter's terminator landed on the byte after the
        // reservation.
        self.restore();
        rendered.map_err(|error| {
            self.roll_back(saved, n, replaced, parked);
            self.fail(error)
        })
    }

    /// Undoes a reservation of `n` bytes made from `saved`, bringing back
    /// `replaced` overwritten bytes parked at `parked`.
    fn roll_back(&mut self, saved: CursorState, n: usize, replaced: usize, parked: usize) {
        let (old_len, old_pos) = (saved.len(), saved.pos());
        let len = self.state.len();
        let bytes = self.storage.bytes_mut();
        if saved.is_overwrite() {
            bytes.copy_within(parked..parked + replaced, old_pos);
        } else {
            bytes.copy_within(old_pos + n..=len, old_pos);
        }
        bytes[old_len] = 0;
        log::trace!("rolled back {n} bytes at {old_pos}");
        self.state = saved;
    }

    /// Replaces the content with formatted text.
    ///
    /// # Errors
    ///
    /// As [`putf`](Buffer::putf). The buffer is left empty on failure.
    pub fn printf<F: TextFormat>(&mut self, text: F) -> Result<(), Error> {
        self.clear();
        self.putf(text)
    }
}

impl<S: Allocate> Buffer<S> {
    /// Builds a buffer holding formatted text, with the cursor at its end.
    ///
    /// # Errors
    ///
    /// A wrapped [`Error::Format`] from the formatter,
    /// [`ConstructionError::TooLong`] when the text does not fit, and a
    /// wrapped [`Error::OutOfMemory`] when storage cannot be obtained.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strbuf::HeapBuffer;
    ///
    /// let sb = HeapBuffer::format(format_args!("Hello {}", 99)).unwrap();
    /// assert_eq!(sb.as_bytes(), b"Hello 99");
    /// assert_eq!(sb.position(), 8);
    /// ```
    pub fn format<F: TextFormat>(text: F) -> Result<Self, ConstructionError> {
        let n = text.measure()?;
        if n >= MAX_SIZE {
            return Err(ConstructionError::TooLong);
        }
        let mut sb = Self::alloc(n + 1)?;
        if sb.capacity() <= n {
            return Err(ConstructionError::TooLong);
        }
        text.render(&mut sb.storage.bytes_mut()[..=n])?;
        sb.state = CursorState::with_len(narrow(n));
        Ok(sb)
    }
}

impl<S: Storage> fmt::Write for Buffer<S> {
    /// Writes all of `s` at the cursor, following the mode. Embedded NUL
    /// bytes are written too, as with [`putf`](Buffer::putf).
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.put_bytes(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// Writes formatted text at a buffer's cursor.
///
/// ```rust
/// use strbuf::{HeapBuffer, putf};
///
/// let mut sb = HeapBuffer::dup(b"R2").unwrap();
/// putf!(sb, "D{}", 2).unwrap();
/// assert_eq!(sb.as_bytes(), b"R2D2");
/// ```
#[macro_export]
macro_rules! putf {
    ($buffer:expr, $($arg:tt)*) => {
        $buffer.putf(::core::format_args!($($arg)*))
    };
}

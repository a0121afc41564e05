//! Writing at the cursor.
//!
//! Every insertion funnels through [`Buffer::reserve`]: it makes room for
//! `n` bytes at the cursor, applies the mode, moves the cursor past the
//! reservation and hands the region back. The region is `n + 1` bytes long.
//! The extra byte is the first byte after the reservation, which routines
//! that always terminate their output (formatters, C copy helpers) clobber
//! with a NUL. Its previous value is kept as a shadow so
//! [`Buffer::restore`] can put it back, which saves both a spare byte of
//! capacity and a second pass over the tail.

use bstr::ByteSlice;

use crate::{
    Buffer, Error,
    size::narrow,
    state::Flags,
    storage::Storage,
};

/// Length of `s` up to its first NUL byte, looking at no more than `n`
/// bytes.
pub(crate) fn bounded_len(s: &[u8], n: usize) -> usize {
    let s = &s[..n.min(s.len())];
    s.find_byte(0).unwrap_or(s.len())
}

impl<S: Storage> Buffer<S> {
    /// Reserves `n` bytes at the cursor and returns the offset where they
    /// start (the old cursor).
    pub(crate) fn reserve_at_cursor(&mut self, n: usize) -> Result<usize, Error> {
        let old_len = self.state.len();
        let old_pos = self.state.pos();
        debug_assert!(old_len < self.capacity());
        debug_assert_eq!(self.storage.bytes()[old_len], 0);
        log::trace!("about to write {n} bytes at {old_pos}");

        let overwrite = self.state.is_overwrite();
        // Highest offset whose content this write keeps or extends.
        let top = if overwrite || old_pos > old_len {
            old_pos
        } else {
            old_len
        };

        if let Err(error) = self.ensure(n, top) {
            return Err(self.fail(error));
        }

        let bytes = self.storage.bytes_mut();
        let mut len = old_len;

        if old_pos > old_len {
            // The cursor was parked past the end: the gap reads as zeros,
            // including the byte at the cursor which had no terminator yet.
            log::trace!("zeroing between len {old_len} and pos {old_pos}");
            bytes[old_len..=old_pos].fill(0);
            len = old_pos;
        }

        if overwrite {
            // As if the write were `n` single-byte puts: undoing the last one
            // brings back the byte it replaced, or the terminator if it wrote
            // at or past the old end.
            if n > 0 {
                let last = old_pos + n - 1;
                let extends = last >= old_len;
                self.state.undo_char = if extends { 0 } else { bytes[last] };
                self.state.flags.set(Flags::UNDO_EXTENDS, extends);
            }
        } else {
            bytes.copy_within(old_pos..=len, old_pos + n);
            len += n;
            self.state.flags.remove(Flags::UNDO_EXTENDS);
        }

        let pos = old_pos + n;
        if pos > len {
            log::trace!("bumping length from {len} to {pos}");
            len = pos;
            bytes[pos] = 0;
        }

        self.state.shadow = bytes[pos];
        self.state.len = narrow(len);
        self.state.pos = narrow(pos);
        self.state.flags.insert(Flags::WRITE_PENDING);
        self.state.flags.set(Flags::UNDO, n > 0);
        Ok(old_pos)
    }

    /// Marks the reservation as filled without its boundary byte having been
    /// touched.
    fn commit(&mut self) {
        self.state.flags.remove(Flags::WRITE_PENDING);
    }

    /// Reserves `n` bytes at the cursor for the caller to fill directly.
    ///
    /// The returned region is `n + 1` bytes: the `n` reserved bytes and the
    /// byte that follows them. Writing a terminator into that last byte is
    /// allowed; call [`restore`](Buffer::restore) afterwards to repair it.
    /// The reserved bytes hold unspecified values until written.
    ///
    /// In insert mode the tail moves up by `n`. In overwrite mode the region
    /// covers existing content, extending the string if it reaches past the
    /// end. A cursor parked past the end is first joined to the content by
    /// zero bytes.
    ///
    /// # Errors
    ///
    /// [`Error::RangeOverflow`] when the result would not be representable,
    /// [`Error::NoRoom`] or [`Error::OutOfMemory`] when storage cannot grow.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strbuf::HeapBuffer;
    ///
    /// let mut sb = HeapBuffer::dup(b"world").unwrap();
    /// sb.seek(0).unwrap();
    /// let region = sb.reserve(6).unwrap();
    /// // A C-style formatter writes its text and a terminator.
    /// region.copy_from_slice(b"hello\0\0");
    /// region[5] = b' ';
    /// sb.restore();
    /// assert_eq!(sb.as_bytes(), b"hello world");
    /// ```
    pub fn reserve(&mut self, n: usize) -> Result<&mut [u8], Error> {
        let start = self.reserve_at_cursor(n)?;
        Ok(&mut self.storage.bytes_mut()[start..=start + n])
    }

    /// Puts back the byte following the most recent reservation. Does nothing
    /// if there is no pending reservation.
    pub fn restore(&mut self) {
        if self.state.flags.contains(Flags::WRITE_PENDING) {
            let pos = self.state.pos();
            log::trace!("restored {:#04x} at {pos}", self.state.shadow);
            self.storage.bytes_mut()[pos] = self.state.shadow;
            self.state.flags.remove(Flags::WRITE_PENDING);
        }
    }

    /// Terminates the visible string at the cursor while keeping everything
    /// after it; [`restore`](Buffer::restore) joins the two halves again.
    ///
    /// # Errors
    ///
    /// As [`reserve`](Buffer::reserve).
    pub fn split(&mut self) -> Result<(), Error> {
        let region = self.reserve(0)?;
        region[0] = 0;
        Ok(())
    }

    /// Writes one byte at the cursor.
    ///
    /// # Errors
    ///
    /// As [`reserve`](Buffer::reserve).
    pub fn putc(&mut self, c: u8) -> Result<(), Error> {
        self.nputc(c, 1)
    }

    /// Writes `n` copies of `c` at the cursor.
    ///
    /// # Errors
    ///
    /// As [`reserve`](Buffer::reserve).
    pub fn nputc(&mut self, c: u8, n: usize) -> Result<(), Error> {
        let start = self.reserve_at_cursor(n)?;
        self.storage.bytes_mut()[start..start + n].fill(c);
        self.commit();
        Ok(())
    }

    /// Writes `s` up to its first NUL byte at the cursor.
    ///
    /// # Errors
    ///
    /// As [`reserve`](Buffer::reserve).
    pub fn puts(&mut self, s: &[u8]) -> Result<(), Error> {
        self.nputs(s, usize::MAX)
    }

    /// Writes at most `n` bytes of `s`, stopping early at a NUL byte.
    ///
    /// # Errors
    ///
    /// As [`reserve`](Buffer::reserve).
    pub fn nputs(&mut self, s: &[u8], n: usize) -> Result<(), Error> {
        self.put_bytes(&s[..bounded_len(s, n)])
    }

    /// Writes every byte of `s` at the cursor, NUL bytes included.
    pub(crate) fn put_bytes(&mut self, s: &[u8]) -> Result<(), Error> {
        let start = self.reserve_at_cursor(s.len())?;
        self.storage.bytes_mut()[start..start + s.len()].copy_from_slice(s);
        self.commit();
        Ok(())
    }

    /// Takes back the last byte written by the immediately preceding put and
    /// returns it.
    ///
    /// In insert mode the byte is removed. In overwrite mode the byte it
    /// replaced comes back; if it was written at or past the old end the
    /// string shortens instead. Only one level is kept, and any seek, mode
    /// change or deletion in between discards it.
    ///
    /// # Errors
    ///
    /// [`Error::NothingToUndo`] when there is no such put.
    pub fn unputc(&mut self) -> Result<u8, Error> {
        if !self.state.flags.contains(Flags::UNDO) {
            return Err(self.fail(Error::NothingToUndo));
        }

        let pos = self.state.pos();
        let mut len = self.state.len();
        debug_assert!(pos > 0 && pos <= len);
        let new_pos = pos - 1;
        let bytes = self.storage.bytes_mut();
        let removed = bytes[new_pos];

        if self.state.is_overwrite() {
            bytes[new_pos] = self.state.undo_char;
            if self.state.flags.contains(Flags::UNDO_EXTENDS) {
                len = new_pos;
                bytes[len] = 0;
            }
        } else {
            bytes.copy_within(pos..=len, new_pos);
            len -= 1;
        }

        self.state.len = narrow(len);
        self.state.pos = narrow(new_pos);
        self.state.forget_edits();
        Ok(removed)
    }

    /// Empties the buffer and moves the cursor to the start. The mode and the
    /// error flag are kept.
    pub fn clear(&mut self) {
        self.state.len = 0;
        self.state.pos = 0;
        self.storage.bytes_mut()[0] = 0;
        self.state.forget_edits();
    }

    /// Replaces the content with `s` up to its first NUL byte.
    ///
    /// # Errors
    ///
    /// As [`reserve`](Buffer::reserve). The buffer is left empty on failure.
    pub fn cpy(&mut self, s: &[u8]) -> Result<(), Error> {
        self.ncpy(s, usize::MAX)
    }

    /// Replaces the content with at most `n` bytes of `s`.
    ///
    /// # Errors
    ///
    /// As [`reserve`](Buffer::reserve). The buffer is left empty on failure.
    pub fn ncpy(&mut self, s: &[u8], n: usize) -> Result<(), Error> {
        self.clear();
        self.nputs(s, n)
    }
}

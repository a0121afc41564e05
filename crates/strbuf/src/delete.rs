use crate::{Buffer, size::narrow, storage::Storage};

impl<S: Storage> Buffer<S> {
    /// Deletes everything between the cursor and `target`, in either
    /// direction, and leaves the cursor at the lower of the two. Both ends
    /// are clamped to the content, so `usize::MAX` deletes through the end.
    ///
    /// In overwrite mode nothing is removed: the string never shrinks there,
    /// and the call only moves the cursor. The undo level and any pending
    /// restore are discarded either way.
    pub fn delete_to(&mut self, target: usize) {
        let len = self.state.len();
        let a = target.min(len);
        let b = self.state.pos().min(len);
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        log::trace!("delete {lo}..{hi}");

        if !self.state.is_overwrite() {
            self.storage.bytes_mut().copy_within(hi..=len, lo);
            self.state.len = narrow(len - (hi - lo));
        }

        self.state.pos = narrow(lo);
        self.state.forget_edits();
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::{BorrowedBuffer, Mode};

    fn buffer_with<'a>(array: &'a mut [u8], content: &[u8], pos: usize) -> BorrowedBuffer<'a> {
        let mut sb = BorrowedBuffer::wrap(array).unwrap();
        sb.puts(content).unwrap();
        sb.seek(pos).unwrap();
        sb
    }

    #[rstest]
    #[case::backwards(6, 3, b"DELME".as_slice())]
    #[case::forwards(1, 2, b"DLETEME".as_slice())]
    #[case::to_end(6, usize::MAX, b"DELETE".as_slice())]
    #[case::to_start(3, 0, b"ETEME".as_slice())]
    #[case::empty_range(4, 4, b"DELETEME".as_slice())]
    fn deletes_between_cursor_and_target(
        #[case] pos: usize,
        #[case] target: usize,
        #[case] expected: &[u8],
    ) {
        let mut array = [0u8; 32];
        let mut sb = buffer_with(&mut array, b"DELETEME", pos);
        sb.delete_to(target);
        assert_eq!(sb.as_bytes(), expected);
        assert_eq!(sb.position(), pos.min(target));
        sb.check_invariants();
    }

    #[test]
    fn overwrite_mode_only_moves_the_cursor() {
        let mut array = [0u8; 32];
        let mut sb = buffer_with(&mut array, b"DELETEME", 6);
        sb.set_mode(Mode::Overwrite);
        sb.delete_to(2);
        assert_eq!(sb.as_bytes(), b"DELETEME");
        assert_eq!(sb.position(), 2);
    }

    #[test]
    fn cursor_past_the_end_is_clamped() {
        let mut array = [0u8; 32];
        let mut sb = buffer_with(&mut array, b"abc", 10);
        sb.delete_to(1);
        assert_eq!(sb.as_bytes(), b"a");
        assert_eq!(sb.position(), 1);
    }

    #[test]
    fn deletion_discards_the_undo_level() {
        let mut array = [0u8; 32];
        let mut sb = buffer_with(&mut array, b"abc", 3);
        sb.putc(b'd').unwrap();
        sb.delete_to(3);
        assert!(sb.unputc().is_err());
    }
}

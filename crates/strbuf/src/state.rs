use bitflags::bitflags;

use crate::{
    Mode,
    size::{Size, widen},
};

bitflags! {
    /// Packed per-buffer state bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub(crate) struct Flags: u8 {
        /// One level of `unputc` is available.
        const UNDO = 1 << 0;
        /// Sticky fault indicator.
        const ERROR = 1 << 1;
        /// `shadow` holds the byte at `pos` from before the last reservation.
        const WRITE_PENDING = 1 << 2;
        const OVERWRITE = 1 << 3;
        /// The last overwrite-mode put wrote its final character at or past
        /// the old end, so undoing it shortens the string.
        const UNDO_EXTENDS = 1 << 4;
    }
}

/// Mutable bookkeeping of one buffer. Capacity is owned by the storage.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CursorState {
    pub(crate) len: Size,
    pub(crate) pos: Size,
    pub(crate) flags: Flags,
    /// Byte `unputc` writes back in overwrite mode.
    pub(crate) undo_char: u8,
    /// Byte `restore` writes back at `pos`.
    pub(crate) shadow: u8,
}

impl CursorState {
    pub(crate) fn with_len(len: Size) -> Self {
        Self {
            len,
            pos: len,
            ..Self::default()
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        widen(self.len)
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        widen(self.pos)
    }

    pub(crate) fn mode(&self) -> Mode {
        if self.flags.contains(Flags::OVERWRITE) {
            Mode::Overwrite
        } else {
            Mode::Insert
        }
    }

    #[inline]
    pub(crate) fn is_overwrite(&self) -> bool {
        self.flags.contains(Flags::OVERWRITE)
    }

    /// Drops both the put-undo level and any pending restore.
    pub(crate) fn forget_edits(&mut self) {
        self.flags
            .remove(Flags::UNDO | Flags::UNDO_EXTENDS | Flags::WRITE_PENDING);
    }
}

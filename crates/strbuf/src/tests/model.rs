//! A straightforward `Vec<u8>` rendition of the editing semantics, used as
//! the oracle for property tests.

use std::vec::Vec;

use quickcheck::{Arbitrary, Gen};

use crate::{Buffer, Error, Mode, storage::Storage};

#[derive(Debug, Clone, Copy)]
enum Undo {
    Remove,
    Replace(u8),
    Truncate,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Model {
    pub(crate) content: Vec<u8>,
    pub(crate) pos: usize,
    overwrite: bool,
    undo: Option<Undo>,
}

impl Model {
    fn pad_to_cursor(&mut self) {
        if self.pos > self.content.len() {
            self.content.resize(self.pos, 0);
        }
    }

    pub(crate) fn put(&mut self, bytes: &[u8]) {
        self.pad_to_cursor();
        let n = bytes.len();
        if self.overwrite {
            if n > 0 {
                let last = self.pos + n - 1;
                self.undo = Some(if last >= self.content.len() {
                    Undo::Truncate
                } else {
                    Undo::Replace(self.content[last])
                });
            }
            for (i, &b) in bytes.iter().enumerate() {
                let at = self.pos + i;
                if at < self.content.len() {
                    self.content[at] = b;
                } else {
                    self.content.push(b);
                }
            }
        } else {
            self.content.splice(self.pos..self.pos, bytes.iter().copied());
            self.undo = Some(Undo::Remove);
        }
        if n == 0 {
            self.undo = None;
        }
        self.pos += n;
    }

    pub(crate) fn unput(&mut self) -> Option<u8> {
        let undo = self.undo.take()?;
        let at = self.pos - 1;
        let removed = self.content[at];
        match undo {
            Undo::Remove => {
                self.content.remove(at);
            }
            Undo::Replace(original) => self.content[at] = original,
            Undo::Truncate => self.content.truncate(at),
        }
        self.pos = at;
        Some(removed)
    }

    pub(crate) fn seek(&mut self, pos: usize) {
        self.pos = pos;
        self.undo = None;
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        self.overwrite = mode == Mode::Overwrite;
        self.undo = None;
    }

    pub(crate) fn delete_to(&mut self, target: usize) {
        let len = self.content.len();
        let a = target.min(len);
        let b = self.pos.min(len);
        let (lo, hi) = (a.min(b), a.max(b));
        if !self.overwrite {
            self.content.drain(lo..hi);
        }
        self.pos = lo;
        self.undo = None;
    }
}

/// One editing step.
#[derive(Debug, Clone)]
pub(crate) enum Op {
    Puts(Vec<u8>),
    Putc(u8),
    Nputc(u8, u8),
    Putf(u16),
    Seek(u8),
    SetMode(Mode),
    Unputc,
    DeleteTo(u8),
    DeleteToEnd,
}

fn letter(g: &mut Gen) -> u8 {
    b'a' + u8::arbitrary(g) % 26
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        match u8::arbitrary(g) % 9 {
            0 => {
                let len = usize::from(u8::arbitrary(g) % 9);
                Op::Puts((0..len).map(|_| letter(g)).collect())
            }
            1 => Op::Putc(letter(g)),
            2 => Op::Nputc(letter(g), u8::arbitrary(g) % 5),
            3 => Op::Putf(u16::arbitrary(g)),
            4 => Op::Seek(u8::arbitrary(g) % 48),
            5 => Op::SetMode(if bool::arbitrary(g) {
                Mode::Overwrite
            } else {
                Mode::Insert
            }),
            6 => Op::Unputc,
            7 => Op::DeleteTo(u8::arbitrary(g) % 48),
            _ => Op::DeleteToEnd,
        }
    }
}

impl Op {
    /// Applies the step to the buffer, and to the model only if the buffer
    /// accepted it.
    pub(crate) fn apply<S: Storage>(&self, sb: &mut Buffer<S>, model: &mut Model) -> Result<(), Error> {
        match self {
            Op::Puts(bytes) => sb.puts(bytes).map(|()| model.put(bytes)),
            Op::Putc(c) => sb.putc(*c).map(|()| model.put(&[*c])),
            Op::Nputc(c, n) => {
                let run = std::vec![*c; usize::from(*n)];
                sb.nputc(*c, usize::from(*n)).map(|()| model.put(&run))
            }
            Op::Putf(value) => {
                let text = std::format!("<{value}>");
                sb.putf(format_args!("<{value}>"))
                    .map(|()| model.put(text.as_bytes()))
            }
            Op::Seek(pos) => sb.seek(usize::from(*pos)).map(|()| model.seek(usize::from(*pos))),
            Op::SetMode(mode) => {
                sb.set_mode(*mode);
                model.set_mode(*mode);
                Ok(())
            }
            Op::Unputc => {
                let got = sb.unputc();
                if let Ok(c) = got {
                    assert_eq!(model.unput(), Some(c), "unputc returned the wrong byte");
                } else {
                    assert!(model.undo.is_none(), "model expected an undo level");
                }
                got.map(|_| ())
            }
            Op::DeleteTo(target) => {
                sb.delete_to(usize::from(*target));
                model.delete_to(usize::from(*target));
                Ok(())
            }
            Op::DeleteToEnd => {
                sb.delete_to(usize::MAX);
                model.delete_to(usize::MAX);
                Ok(())
            }
        }
    }
}

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use strbuf::{BorrowedBuffer, Buffer, HeapBuffer, Mode, Storage};

#[derive(Debug, Arbitrary)]
enum Op {
    Puts(Vec<u8>),
    Nputc(u8, u8),
    Putf(u32),
    Seek(u8),
    Overwrite(bool),
    Unputc,
    DeleteTo(u8),
    Split,
    Restore,
    Clear,
}

#[derive(Debug, Arbitrary)]
struct Input {
    fixed_capacity: u8,
    ops: Vec<Op>,
}

/// Plain `Vec` rendition of the editing semantics.
#[derive(Default)]
struct Model {
    content: Vec<u8>,
    pos: usize,
    overwrite: bool,
    /// What undoing the last put does: `Some(b)` puts `b` back, `None`
    /// removes the byte.
    undo: Option<Option<u8>>,
    /// Byte hidden by a pending split.
    pending: Option<u8>,
}

impl Model {
    fn put(&mut self, bytes: &[u8]) {
        if self.pos > self.content.len() {
            self.content.resize(self.pos, 0);
        }
        let n = bytes.len();
        if self.overwrite {
            if n > 0 {
                self.undo = Some(self.content.get(self.pos + n - 1).copied());
            }
            let end = (self.pos + n).max(self.content.len());
            self.content.resize(end, 0);
            self.content[self.pos..self.pos + n].copy_from_slice(bytes);
        } else {
            self.content.splice(self.pos..self.pos, bytes.iter().copied());
            self.undo = Some(None);
        }
        if n == 0 {
            self.undo = None;
        }
        self.pos += n;
        self.pending = None;
    }

    fn unput(&mut self) -> Option<u8> {
        let undo = self.undo.take()?;
        self.pos -= 1;
        let removed = self.content[self.pos];
        match undo {
            Some(original) => self.content[self.pos] = original,
            None if self.overwrite => self.content.truncate(self.pos),
            None => {
                self.content.remove(self.pos);
            }
        }
        self.pending = None;
        Some(removed)
    }

    fn split(&mut self) {
        self.put(&[]);
        if self.pos < self.content.len() {
            self.pending = Some(self.content[self.pos]);
            self.content[self.pos] = 0;
        }
    }

    fn restore(&mut self) {
        if let Some(shadow) = self.pending.take() {
            self.content[self.pos] = shadow;
        }
    }

    fn delete_to(&mut self, target: usize) {
        let len = self.content.len();
        let a = target.min(len);
        let b = self.pos.min(len);
        let (lo, hi) = (a.min(b), a.max(b));
        if !self.overwrite {
            self.content.drain(lo..hi);
        }
        self.pos = lo;
        self.undo = None;
        self.pending = None;
    }
}

fn run<S: Storage>(sb: &mut Buffer<S>, ops: &[Op]) {
    let mut model = Model::default();

    for op in ops {
        let accepted = match op {
            Op::Puts(bytes) => {
                let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
                sb.puts(bytes).map(|()| model.put(&bytes[..len]))
            }
            Op::Nputc(c, n) => {
                let n = usize::from(*n);
                sb.nputc(*c, n).map(|()| model.put(&vec![*c; n]))
            }
            Op::Putf(value) => {
                let text = format!("{value:x}");
                sb.putf(format_args!("{value:x}"))
                    .map(|()| model.put(text.as_bytes()))
            }
            Op::Seek(pos) => sb.seek(usize::from(*pos)).map(|()| {
                model.pos = usize::from(*pos);
                model.undo = None;
                model.pending = None;
            }),
            Op::Overwrite(on) => {
                sb.set_mode(if *on { Mode::Overwrite } else { Mode::Insert });
                model.overwrite = *on;
                model.undo = None;
                Ok(())
            }
            Op::Unputc => {
                let got = sb.unputc();
                assert_eq!(got.ok(), model.unput());
                got.map(|_| ())
            }
            Op::DeleteTo(target) => {
                sb.delete_to(usize::from(*target));
                model.delete_to(usize::from(*target));
                Ok(())
            }
            Op::Split => sb.split().map(|()| model.split()),
            Op::Restore => {
                sb.restore();
                model.restore();
                Ok(())
            }
            Op::Clear => {
                sb.clear();
                model.content.clear();
                model.pos = 0;
                model.undo = None;
                model.pending = None;
                Ok(())
            }
        };

        sb.check_invariants();
        if accepted.is_err() {
            assert!(sb.error());
        }
        assert_eq!(sb.as_bytes(), model.content.as_slice());
        assert_eq!(sb.position(), model.pos);
    }
}

fuzz_target!(|input: Input| {
    let mut array = vec![0u8; usize::from(input.fixed_capacity).max(1)];
    let mut fixed = BorrowedBuffer::wrap(&mut array).unwrap();
    run(&mut fixed, &input.ops);

    let mut heap = HeapBuffer::alloc(0).unwrap();
    run(&mut heap, &input.ops);
});

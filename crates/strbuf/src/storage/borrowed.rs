use super::{Ownership, Storage, sealed::Sealed};
use crate::{Error, size::MAX_SIZE};

/// A caller-owned array.
#[derive(Debug)]
pub struct Borrowed<'a> {
    bytes: &'a mut [u8],
}

impl<'a> Borrowed<'a> {
    /// Wraps `bytes`, ignoring anything past [`MAX_SIZE`].
    pub(crate) fn new(bytes: &'a mut [u8]) -> Self {
        let usable = bytes.len().min(MAX_SIZE);
        Self {
            bytes: &mut bytes[..usable],
        }
    }
}

impl Sealed for Borrowed<'_> {}

impl Storage for Borrowed<'_> {
    const GROWABLE: bool = false;

    fn bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[..]
    }

    fn grow(&mut self, _new_capacity: usize, _live: usize) -> Result<(), Error> {
        log::trace!("external buffer of {} bytes exhausted", self.bytes.len());
        Err(Error::NoRoom)
    }

    fn ownership(&self) -> Ownership {
        Ownership::Borrowed
    }
}

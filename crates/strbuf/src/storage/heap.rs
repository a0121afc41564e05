use alloc::vec::Vec;
use core::fmt;

use super::{Allocate, Ownership, Storage, sealed::Sealed};
use crate::{AllocOptions, Error, INLINE_CAPACITY, size::MAX_SIZE};

#[allow(clippy::large_enum_variant)]
enum Repr {
    /// Array held in the buffer value itself. Only the first `capacity`
    /// bytes are in use.
    Inline {
        bytes: [u8; INLINE_CAPACITY],
        capacity: usize,
    },
    /// Separately allocated array, resized in place on every growth.
    Spilled(Vec<u8>),
}

/// Memory owned by the buffer: small arrays live inline, larger or grown
/// ones on the heap.
pub struct Heap {
    repr: Repr,
    growth_factor: usize,
}

fn zeroed(capacity: usize) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(capacity)
        .map_err(|_| Error::OutOfMemory)?;
    bytes.resize(capacity, 0);
    Ok(bytes)
}

impl Heap {
    pub(crate) fn allocate_with(size_hint: usize, options: &AllocOptions) -> Result<Self, Error> {
        let capacity = size_hint.max(options.default_capacity).clamp(1, MAX_SIZE);
        let repr = if capacity > options.inline_capacity.min(INLINE_CAPACITY) {
            log::trace!("oversize buffer of {capacity} bytes");
            Repr::Spilled(zeroed(capacity)?)
        } else {
            log::trace!("inline buffer of {capacity} bytes");
            Repr::Inline {
                bytes: [0; INLINE_CAPACITY],
                capacity,
            }
        };
        Ok(Self {
            repr,
            growth_factor: options.growth_factor.max(2),
        })
    }

    /// Whether the array has been allocated separately, either because it
    /// started oversize or because it has grown.
    #[must_use]
    pub fn is_spilled(&self) -> bool {
        matches!(self.repr, Repr::Spilled(_))
    }
}

impl Sealed for Heap {}

impl Storage for Heap {
    const GROWABLE: bool = true;

    fn bytes(&self) -> &[u8] {
        match &self.repr {
            Repr::Inline { bytes, capacity } => &bytes[..*capacity],
            Repr::Spilled(bytes) => bytes,
        }
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        match &mut self.repr {
            Repr::Inline { bytes, capacity } => &mut bytes[..*capacity],
            Repr::Spilled(bytes) => bytes,
        }
    }

    fn grow(&mut self, new_capacity: usize, live: usize) -> Result<(), Error> {
        let spilled = match &mut self.repr {
            Repr::Spilled(bytes) => {
                let extra = new_capacity.saturating_sub(bytes.len());
                bytes
                    .try_reserve_exact(extra)
                    .map_err(|_| Error::OutOfMemory)?;
                bytes.resize(new_capacity, 0);
                log::trace!("reallocated buffer to {new_capacity} bytes");
                return Ok(());
            }
            Repr::Inline { bytes, .. } => {
                let mut spilled = zeroed(new_capacity)?;
                spilled[..live].copy_from_slice(&bytes[..live]);
                spilled
            }
        };
        log::trace!("moved inline buffer to the heap with {new_capacity} bytes");
        self.repr = Repr::Spilled(spilled);
        Ok(())
    }

    fn growth_factor(&self) -> usize {
        self.growth_factor
    }

    fn ownership(&self) -> Ownership {
        Ownership::Heap
    }
}

impl Allocate for Heap {
    fn allocate(size_hint: usize) -> Result<Self, Error> {
        Self::allocate_with(size_hint, &AllocOptions::default())
    }
}

impl fmt::Debug for Heap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heap")
            .field("capacity", &self.capacity())
            .field("spilled", &self.is_spilled())
            .finish()
    }
}

//! A static table of fixed-size slots for targets with a few kilobytes of
//! RAM and no heap.
//!
//! Slots are claimed through a bitmap. A claimed slot is handed out as a
//! `&'static mut` array; the bit guarantees nobody else holds it. The table
//! is initialised with every slot free and is never torn down.

use core::{
    cell::UnsafeCell,
    fmt,
    sync::atomic::{AtomicU8, Ordering},
};

use super::{Allocate, Ownership, Storage, sealed::Sealed};
use crate::{Error, size::MAX_SIZE};

/// Number of slots in the table. The bitmap is a `u8`, so at most 8.
pub const POOL_SLOTS: usize = 8;

/// Capacity of every slot, terminator included.
pub const POOL_SLOT_SIZE: usize = if MAX_SIZE < 248 { MAX_SIZE } else { 248 };

const _: () = assert!(POOL_SLOTS <= u8::BITS as usize);

struct Slots(UnsafeCell<[[u8; POOL_SLOT_SIZE]; POOL_SLOTS]>);

// SAFETY: a slot is only ever reachable through the `Pooled` that set its bit
// in `IN_USE`.
unsafe impl Sync for Slots {}

static SLOTS: Slots = Slots(UnsafeCell::new([[0; POOL_SLOT_SIZE]; POOL_SLOTS]));
static IN_USE: AtomicU8 = AtomicU8::new(0);

/// Number of free slots left in the table.
#[must_use]
pub fn pool_available() -> usize {
    POOL_SLOTS - IN_USE.load(Ordering::Acquire).count_ones() as usize
}

fn claim() -> Option<usize> {
    let mut map = IN_USE.load(Ordering::Acquire);
    loop {
        let free = (!map).trailing_zeros() as usize;
        if free >= POOL_SLOTS {
            return None;
        }
        match IN_USE.compare_exchange_weak(
            map,
            map | (1 << free),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => return Some(free),
            Err(actual) => map = actual,
        }
    }
}

/// One claimed slot of the static table.
pub struct Pooled {
    index: u8,
    bytes: &'static mut [u8; POOL_SLOT_SIZE],
}

impl Sealed for Pooled {}

impl Storage for Pooled {
    const GROWABLE: bool = false;

    fn bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[..]
    }

    fn grow(&mut self, _new_capacity: usize, _live: usize) -> Result<(), Error> {
        log::trace!("pool slot {} exhausted", self.index);
        Err(Error::NoRoom)
    }

    fn ownership(&self) -> Ownership {
        Ownership::Pooled
    }
}

impl Allocate for Pooled {
    fn allocate(_size_hint: usize) -> Result<Self, Error> {
        let Some(index) = claim() else {
            log::debug!("all {POOL_SLOTS} pool slots in use");
            return Err(Error::OutOfMemory);
        };
        // SAFETY: `claim` set bit `index`, which no other live `Pooled` holds,
        // and `index < POOL_SLOTS` keeps the pointer inside the table.
        let bytes = unsafe {
            &mut *SLOTS
                .0
                .get()
                .cast::<[u8; POOL_SLOT_SIZE]>()
                .add(index)
        };
        log::trace!("claimed pool slot {index}");
        #[allow(clippy::cast_possible_truncation)]
        let index = index as u8;
        Ok(Self { index, bytes })
    }
}

impl Drop for Pooled {
    fn drop(&mut self) {
        IN_USE.fetch_and(!(1u8 << self.index), Ordering::Release);
        log::trace!("released pool slot {}", self.index);
    }
}

impl fmt::Debug for Pooled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pooled").field("index", &self.index).finish()
    }
}

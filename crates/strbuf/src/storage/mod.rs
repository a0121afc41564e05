//! Backing arrays for buffers.
//!
//! Three strategies share one capability interface, [`Storage`]:
//!
//! - [`Borrowed`]: a caller-owned slice. Never grows, never freed here.
//! - [`Pooled`]: a slot of a small static table, claimed through a bitmap
//!   (`pool` feature). Never grows; the slot returns to the table on drop.
//! - [`Heap`]: an owned array that starts exact-size and is substituted by a
//!   geometrically growing one when a write needs more room (`alloc` feature).
//!
//! The set is sealed: the write protocol relies on each implementation
//! keeping `bytes().len() == capacity()` and on `grow` preserving the live
//! prefix.

mod borrowed;
#[cfg(feature = "alloc")]
mod heap;
#[cfg(feature = "pool")]
mod pool;

pub use borrowed::Borrowed;
#[cfg(feature = "alloc")]
pub use heap::Heap;
#[cfg(feature = "pool")]
pub use pool::{POOL_SLOT_SIZE, POOL_SLOTS, Pooled, pool_available};

use crate::Error;

mod sealed {
    pub trait Sealed {}
}

/// Who owns the backing array, and therefore what dropping a buffer does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Caller-owned; dropping the buffer leaves the array untouched.
    Borrowed,
    /// A slot of the static pool; dropping the buffer frees the slot.
    Pooled,
    /// Owned heap memory; dropping the buffer frees it.
    Heap,
}

/// The backing array of a buffer.
pub trait Storage: sealed::Sealed {
    /// Whether [`grow`](Storage::grow) can ever succeed.
    const GROWABLE: bool;

    /// The whole usable array, `capacity()` bytes long.
    fn bytes(&self) -> &[u8];

    /// Mutable view of the whole usable array.
    fn bytes_mut(&mut self) -> &mut [u8];

    /// Usable bytes, including the one reserved for the terminator.
    fn capacity(&self) -> usize {
        self.bytes().len()
    }

    /// Replaces the array with one of `new_capacity` bytes whose first
    /// `live` bytes equal the current ones. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// [`Error::NoRoom`] for fixed-capacity storage, [`Error::OutOfMemory`]
    /// when the allocator refuses.
    fn grow(&mut self, new_capacity: usize, live: usize) -> Result<(), Error>;

    /// Multiplier the growth policy applies to the current capacity.
    fn growth_factor(&self) -> usize {
        2
    }

    /// Ownership variant of this storage.
    fn ownership(&self) -> Ownership;
}

/// Storage the engine can obtain on its own, without a caller-supplied
/// array.
pub trait Allocate: Storage + Sized {
    /// Obtains storage suitable for about `size_hint` bytes. Strategies with
    /// a fixed slot size ignore the hint.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfMemory`] when the heap or the pool is exhausted.
    fn allocate(size_hint: usize) -> Result<Self, Error>;
}

//! A cursor-addressable, NUL-terminated byte string buffer.
//!
//! [`Buffer`] keeps a cursor into its content and writes there in insert or
//! overwrite [`Mode`]. The content is always terminated, so it can be passed
//! to C string consumers at any point. Code that writes its own output, such
//! as a formatter, can fill a [`reserve`](Buffer::reserve)d region directly
//! and [`restore`](Buffer::restore) the byte its terminator clobbered.
//!
//! Storage is pluggable:
//!
//! | Storage | Feature | Grows | Freed on drop |
//! |---|---|---|---|
//! | [`Borrowed`] | always | no | no |
//! | [`Pooled`] | `pool` | no | slot returns to the pool |
//! | [`Heap`] | `alloc` | geometrically | yes |
//!
//! With `default-features = false` only caller-owned storage is available
//! and nothing is ever allocated.

#![no_std]
#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffer;
mod delete;
mod error;
mod format;
mod growth;
mod mode;
#[cfg(feature = "alloc")]
mod options;
mod size;
mod state;
pub mod storage;
mod write;

#[cfg(all(test, feature = "alloc"))]
mod tests;

#[cfg(feature = "alloc")]
pub use buffer::HeapBuffer;
#[cfg(feature = "pool")]
pub use buffer::PooledBuffer;
pub use buffer::{BorrowedBuffer, Buffer};
pub use error::{ConstructionError, Error};
pub use format::TextFormat;
pub use mode::Mode;
#[cfg(feature = "alloc")]
pub use options::{AllocOptions, DEFAULT_CAPACITY, GROWTH_FACTOR, INLINE_CAPACITY};
pub use size::{MAX_SIZE, Size};
#[cfg(feature = "alloc")]
pub use storage::Heap;
#[cfg(feature = "pool")]
pub use storage::Pooled;
pub use storage::{Allocate, Borrowed, Ownership, Storage};

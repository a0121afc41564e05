//! The integer type used for lengths, positions and capacities.
//!
//! Buffer bookkeeping is stored in the narrowest type the target needs: 16
//! bits by default, 8 bits with the `compact` feature. Public APIs take and
//! return `usize`; conversion happens at the edge of the engine.

/// Bookkeeping integer for hosted and mid-sized targets.
#[cfg(not(feature = "compact"))]
pub type Size = u16;

/// Bookkeeping integer for constrained builds.
#[cfg(feature = "compact")]
pub type Size = u8;

/// Largest value a [`Size`] can hold, and therefore the largest capacity a
/// buffer can ever report.
pub const MAX_SIZE: usize = Size::MAX as usize;

/// Narrows a value that the caller has already range-checked against
/// [`MAX_SIZE`].
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn narrow(value: usize) -> Size {
    debug_assert!(value <= MAX_SIZE, "{value} exceeds MAX_SIZE");
    value as Size
}

#[inline]
pub(crate) fn widen(value: Size) -> usize {
    usize::from(value)
}

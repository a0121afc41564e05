/// Sizing options for heap-backed buffers.
///
/// These correspond to the engine's build-time constants and are exposed so
/// callers with unusual allocation profiles can tune them per buffer.
///
/// # Examples
///
/// ```rust
/// use strbuf::{AllocOptions, HeapBuffer};
///
/// let options = AllocOptions {
///     default_capacity: 32,
///     inline_capacity: 32,
///     ..Default::default()
/// };
/// let sb = HeapBuffer::alloc_with(0, &options).unwrap();
/// assert_eq!(sb.capacity(), 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocOptions {
    /// Smallest capacity ever allocated. Size hints below this are raised to
    /// it.
    ///
    /// # Default
    ///
    /// `256`
    pub default_capacity: usize,

    /// Largest capacity kept inside the buffer value itself, with no
    /// separate allocation. Anything larger starts life as a heap-allocated,
    /// growable array. Values above [`INLINE_CAPACITY`] are treated as
    /// [`INLINE_CAPACITY`].
    ///
    /// # Default
    ///
    /// `256`
    pub inline_capacity: usize,

    /// Multiplier applied to the capacity whenever a write needs more room.
    /// Values below 2 are treated as 2.
    ///
    /// # Default
    ///
    /// `2`
    pub growth_factor: usize,
}

/// Capacity used when no (or a too small) size hint is given.
pub const DEFAULT_CAPACITY: usize = 256;
/// Size of the array every heap-backed buffer carries inline.
pub const INLINE_CAPACITY: usize = 256;
/// Geometric growth multiplier.
pub const GROWTH_FACTOR: usize = 2;

impl Default for AllocOptions {
    fn default() -> Self {
        Self {
            default_capacity: DEFAULT_CAPACITY,
            inline_capacity: INLINE_CAPACITY,
            growth_factor: GROWTH_FACTOR,
        }
    }
}

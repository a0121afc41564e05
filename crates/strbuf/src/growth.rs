use crate::{Buffer, Error, size::MAX_SIZE, storage::Storage};

/// Next capacity when `capacity` is too small: multiplied by `factor`,
/// clamped to [`MAX_SIZE`], and at least `required`.
pub(crate) fn next_capacity(capacity: usize, factor: usize, required: usize) -> usize {
    let grown = if capacity <= MAX_SIZE / factor {
        capacity * factor
    } else {
        MAX_SIZE
    };
    grown.max(required)
}

impl<S: Storage> Buffer<S> {
    /// Makes sure `n` bytes plus a terminator fit after offset `top`.
    ///
    /// Nothing changes on failure. Growth keeps the first `len + 1` bytes.
    pub(crate) fn ensure(&mut self, n: usize, top: usize) -> Result<(), Error> {
        debug_assert!(top < MAX_SIZE);
        if n >= MAX_SIZE - top {
            log::trace!("integer range exhausted (top={top}, n={n})");
            return Err(Error::RangeOverflow);
        }

        let capacity = self.capacity();
        let room = capacity.saturating_sub(top);
        log::trace!("need {n} bytes, have {room} bytes");
        if n < room {
            return Ok(());
        }

        let new_capacity = next_capacity(capacity, self.storage.growth_factor(), top + n + 1);
        self.storage.grow(new_capacity, self.state.len() + 1)
    }
}

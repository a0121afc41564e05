mod model;

#[cfg(feature = "pool")]
mod pool;

use std::string::String;

use crate::{Buffer, storage::Storage};

/// Serialises tests that claim slots of the process-wide pool, so the
/// exhaustion tests see a predictable number of free slots.
#[cfg(feature = "pool")]
pub(crate) static POOL_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(feature = "pool")]
pub(crate) fn lock_pool() -> std::sync::MutexGuard<'static, ()> {
    POOL_LOCK
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// What a C consumer would print starting at `offset`: bytes up to the next
/// NUL.
pub(crate) fn c_string_at<S: Storage>(sb: &Buffer<S>, offset: usize) -> String {
    let bytes = &sb.as_bytes_with_nul()[offset..];
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Number of quickcheck cases, scaled up on CI.
pub(crate) fn quickcheck_tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

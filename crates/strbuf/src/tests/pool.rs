use std::{vec, vec::Vec};

use super::{lock_pool, workflow::check_session};
use crate::{
    ConstructionError, Error, Ownership, PooledBuffer,
    storage::{POOL_SLOT_SIZE, POOL_SLOTS, pool_available},
};

#[test]
fn exhausting_the_pool_fails_until_a_slot_is_freed() {
    let _guard = lock_pool();
    assert_eq!(pool_available(), POOL_SLOTS);

    let mut held: Vec<PooledBuffer> = (0..POOL_SLOTS)
        .map(|_| PooledBuffer::alloc(0).unwrap())
        .collect();
    assert_eq!(pool_available(), 0);
    assert_eq!(
        PooledBuffer::alloc(0).unwrap_err(),
        ConstructionError::Fault(Error::OutOfMemory)
    );

    held.pop();
    assert_eq!(pool_available(), 1);
    let again = PooledBuffer::dup(b"again").unwrap();
    assert_eq!(again.as_bytes(), b"again");
    assert_eq!(again.ownership(), Ownership::Pooled);

    drop(again);
    drop(held);
    assert_eq!(pool_available(), POOL_SLOTS);
}

#[test]
fn slots_are_reused_after_release() {
    let _guard = lock_pool();
    for round in 0..3 * POOL_SLOTS {
        let mut sb = PooledBuffer::alloc(0).unwrap();
        // A recycled slot may hold stale bytes, only the terminator matters.
        assert!(sb.is_empty());
        sb.nputc(b"0123456789"[round % 10], 5).unwrap();
        sb.check_invariants();
    }
    assert_eq!(pool_available(), POOL_SLOTS);
}

#[test]
fn a_slot_never_grows() {
    let _guard = lock_pool();
    let mut sb = PooledBuffer::alloc(10 * POOL_SLOT_SIZE).unwrap();
    assert_eq!(sb.capacity(), POOL_SLOT_SIZE);
    sb.nputc(b'x', POOL_SLOT_SIZE - 1).unwrap();
    // With the narrow size type the slot spans the whole representable
    // range, so the size check trips first.
    let full = if cfg!(feature = "compact") {
        Error::RangeOverflow
    } else {
        Error::NoRoom
    };
    assert_eq!(sb.putc(b'y'), Err(full));
    assert_eq!(sb.len(), POOL_SLOT_SIZE - 1);
    assert!(sb.error());
    assert_eq!(sb.seek(POOL_SLOT_SIZE), Err(Error::RangeOverflow));
}

#[test]
fn duplicates_must_fit_a_slot() {
    let _guard = lock_pool();
    let long = vec![b'a'; POOL_SLOT_SIZE];
    assert_eq!(
        PooledBuffer::dup(&long).unwrap_err(),
        ConstructionError::TooLong
    );
    // The slot claimed for the failed copy went back to the pool.
    assert_eq!(pool_available(), POOL_SLOTS);

    let sb = PooledBuffer::ndup(&long, POOL_SLOT_SIZE - 1).unwrap();
    assert_eq!(sb.len(), POOL_SLOT_SIZE - 1);
}

#[test]
fn session_over_a_pool_slot() {
    let _guard = lock_pool();
    let mut sb = PooledBuffer::dup(b"DUP").unwrap();
    check_session(&mut sb, "DUP");
}

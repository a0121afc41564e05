//! Behaviour as seen from outside the crate: what C string consumers and
//! formatting machinery observe.
#![allow(missing_docs)]
#![cfg(feature = "alloc")]

use std::ffi::CStr;

use strbuf::{BorrowedBuffer, HeapBuffer, Mode, putf};

#[test]
fn pointer_always_reads_as_a_terminated_string() {
    let mut sb = HeapBuffer::alloc(0).unwrap();
    for word in ["alpha ", "beta ", "gamma"] {
        sb.puts(word.as_bytes()).unwrap();
        // SAFETY: the buffer keeps its content NUL-terminated and is not
        // mutated while the pointer is in use.
        let seen = unsafe { CStr::from_ptr(sb.as_ptr().cast()) };
        assert_eq!(seen.to_bytes(), sb.as_bytes());
    }
    assert_eq!(sb.as_cstr().to_str().unwrap(), "alpha beta gamma");
}

#[test]
fn caller_array_holds_the_terminated_result() {
    let mut array = [0xFFu8; 16];
    {
        let mut sb = BorrowedBuffer::wrap(&mut array).unwrap();
        sb.puts(b"world").unwrap();
        sb.seek(0).unwrap();
        putf!(sb, "{}, ", "hello").unwrap();
    }
    let text = CStr::from_bytes_until_nul(&array).unwrap();
    assert_eq!(text.to_bytes(), b"hello, world");
}

#[test]
fn debug_and_display() {
    let mut sb = HeapBuffer::dup(b"ab").unwrap();
    sb.seek(4).unwrap();
    sb.set_mode(Mode::Overwrite);
    sb.puts(b"cd").unwrap();

    assert_eq!(sb.to_string(), "ab\0\0cd");
    insta::assert_snapshot!(
        format!("{sb:?}"),
        @r#"Buffer { content: "ab\0\0cd", position: 6, capacity: 256, mode: Overwrite, error: false, ownership: Heap }"#
    );
}

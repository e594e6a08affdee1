//! Process-wide pool of reusable growable buffers backing [`super::StreamFramer`] instances
//! (spec §5, §9: "take from pool, exclusively own, return on close").

use std::sync::{Mutex, OnceLock};

use bytes::BytesMut;

/// Buffers beyond this count are dropped on release rather than pooled, so a burst of
/// short-lived connections doesn't pin memory indefinitely.
const POOL_CAPACITY: usize = 64;

fn pool() -> &'static Mutex<Vec<BytesMut>> {
    static POOL: OnceLock<Mutex<Vec<BytesMut>>> = OnceLock::new();
    POOL.get_or_init(|| Mutex::new(Vec::new()))
}

/// Takes a buffer from the pool, allocating a fresh (empty) one if the pool has none to offer.
pub fn acquire() -> BytesMut {
    pool().lock().expect("buffer pool mutex poisoned").pop().unwrap_or_default()
}

/// Returns a buffer for reuse by a future [`acquire`], after clearing its contents.
pub fn release(mut buf: BytesMut) {
    buf.clear();
    let mut guard = pool().lock().expect("buffer pool mutex poisoned");
    if guard.len() < POOL_CAPACITY {
        guard.push(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquired_buffer_starts_empty() {
        let buf = acquire();
        assert!(buf.is_empty());
        release(buf);
    }

    #[test]
    fn released_buffer_is_cleared_before_reuse() {
        let mut buf = acquire();
        buf.extend_from_slice(b"stale data");
        release(buf);
        let reused = acquire();
        assert!(reused.is_empty());
        release(reused);
    }
}

//! Keyboard wraparound over the displayed option list (pure).
//!
//! The highlighted row is `Option<usize>`; `None` means no row is highlighted.
//! An empty list has no defined modulus, so both moves leave the index as is.

/// Advance the highlighted row by one, wrapping past the end.
///
/// From no highlight, lands on the first row.
pub fn next_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return current;
    }
    Some(match current {
        Some(index) => (index + 1) % len,
        None => 0,
    })
}

/// Retreat the highlighted row by one, wrapping before the start.
///
/// Computed as `(index + len - 1) % len` so it never goes negative.
/// From no highlight, lands on the last row.
pub fn prev_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return current;
    }
    Some(match current {
        Some(index) => (index % len + len - 1) % len,
        None => len - 1,
    })
}

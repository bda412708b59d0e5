//! Stack growth for deeply nested source
//!
//! Blocks, parenthesized values and nested definitions recurse once per
//! level. The recursive entry points of the parser and the printer run
//! through [`ensure_sufficient_stack`], which moves onto a fresh stack
//! segment when the current one is nearly exhausted.

/// Grow when less than this much stack remains
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

//! Stack growth guard for deep type-graph recursion.
//!
//! Type descriptions can nest composites arbitrarily deep (a pointer to a
//! pointer to a const array of ...). Folding and closure walks recurse once
//! per edge, so every recursive entry point goes through
//! [`ensure_sufficient_stack`].
//!
//! - **Native targets**: grows the stack on demand through `stacker`.
//! - **WASM targets**: plain call.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (1MB).
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn depth(pool: &Pool, idx: Idx) -> usize {
///     ensure_sufficient_stack(|| match pool.kind(idx).inner() {
///         Some(inner) => depth(pool, inner) + 1,
///         None => 0,
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

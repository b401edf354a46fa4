//! Stack safety for deep recursion.
//!
//! The parser descends once per nesting level and the evaluator once per
//! AST node and call frame, so deeply nested source (or deep recursion in a
//! script) can exhaust the native stack. Wrapping those recursive entry
//! points in [`ensure_sufficient_stack`] grows the stack on demand instead.
//!
//! - **Native targets**: `stacker::maybe_grow`.
//! - **WASM targets**: direct call.

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

//! Stack growth for deeply nested templates.
//!
//! Block nesting in a template maps to recursion when the block tree is
//! rebuilt and again when it is interpreted, so a template with thousands of
//! nested `if`/`for` blocks would otherwise overflow the native stack.

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Space that must remain before recursing (100KB).
    const RED_ZONE: usize = 100 * 1024;

    /// Size of each newly allocated stack segment (1MB).
    const GROW_BY: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, GROW_BY, f)
}

/// WASM manages its own stack; call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

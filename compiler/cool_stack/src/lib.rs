//! Stack growth for recursive tree walks.
//!
//! The codec encodes and decodes the AST by plain recursion, one call per
//! node. Source programs with long `let` chains or deeply nested arithmetic
//! produce trees deep enough to exhaust the default thread stack, so every
//! recursive step goes through [`ensure_sufficient_stack`].
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker` allocates a fresh stack segment on demand.
//! - **WASM targets**: passthrough.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn decode_expr(&mut self, node: &Value) -> Result<Expr, CodecError> {
///     ensure_sufficient_stack(|| self.decode_expr_inner(node))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM version: the runtime manages the stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

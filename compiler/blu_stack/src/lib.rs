//! Host stack growth for tree-recursive passes.
//!
//! The parser, analyser and evaluator recurse once per nested node and once
//! per Blu function call. User programs are bounded by the interpreter's
//! configured call depth; this crate makes sure the host stack never runs out
//! first by growing it on demand (`stacker`). On wasm32 it is a passthrough.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const GROWTH: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if the red zone has been reached.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nest(depth: u32) -> u32 {
        ensure_sufficient_stack(|| if depth == 0 { 0 } else { nest(depth - 1) + 1 })
    }

    #[test]
    fn test_passes_result_through() {
        let result: Result<&str, ()> = ensure_sufficient_stack(|| Ok("value"));
        assert_eq!(result, Ok("value"));
    }

    #[test]
    fn test_deep_nesting_grows_stack() {
        assert_eq!(nest(200_000), 200_000);
    }
}

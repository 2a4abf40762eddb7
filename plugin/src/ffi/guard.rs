//! Panic guards for the exported entry points.
//!
//! Unwinding across the C boundary is undefined behaviour, so every
//! `extern "C"` export runs its body through [`guard`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::error;

/// Text of a panic payload as produced by `panic!`.
pub fn describe(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<opaque panic payload>")
}

/// Run the body of export `op`. A panic is logged with the export name and
/// turned into `fallback`, the value the host treats as failure.
pub fn guard<T>(op: &'static str, fallback: T, body: impl FnOnce() -> T) -> T {
    panic::catch_unwind(AssertUnwindSafe(body)).unwrap_or_else(|payload| {
        error!(export = op, panic = describe(&*payload), "export panicked, answering host with fallback");
        fallback
    })
}

pub fn guard_void(op: &'static str, body: impl FnOnce()) {
    guard(op, (), body)
}

#![allow(
    clippy::result_large_err,
    reason = "EvalError is fundamental; boxing would add noise across every crate"
)]
//! Quill Model - runtime values of the quill template language.
//!
//! This crate provides:
//! - The `Model` union and its call-capability tag
//! - Raw `HostValue`s and the `ObjectWrapper` wrap/unwrap capability
//! - Host-native callables (`HostMethod`, simple and extended)
//! - `Namespace`, the shared scope captured by closures
//! - `UnboundCallable` / `BoundCallable`
//! - Evaluation errors (`EvalError`, `EvalErrorKind`, factory functions)
//!
//! Everything here is `Send + Sync` so parsed templates and captured
//! closures can be shared by concurrent runs.

mod callable;
pub mod errors;
mod host;
mod method;
mod namespace;
mod value;

pub use callable::{BoundCallable, UnboundCallable};
pub use errors::{
    BacktraceFrame, ErrorLocation, EvalBacktrace, EvalError, EvalErrorKind, EvalResult,
};
pub use host::{DefaultObjectWrapper, HostValue, ObjectWrapper};
pub use method::{ExtendedFn, HostArguments, HostMethod, SimpleFn};
pub use namespace::Namespace;
pub use value::{CallCapability, Model};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn shared_types_are_thread_safe() {
        assert_send_sync::<Model>();
        assert_send_sync::<Namespace>();
        assert_send_sync::<BoundCallable>();
        assert_send_sync::<HostMethod>();
        assert_send_sync::<EvalError>();
    }
}

//! Shared error plumbing.
//!
//! Every error enum in the crate implements [`ErrorCode`] so callers get a
//! grepable code and a retryable flag alongside the human-readable message.

/// Grepable error code and retryable flag for structured error reporting.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

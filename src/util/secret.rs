//! Logging for secret material
//!
//! `trace_secret!` takes the same arguments as `trace!`. Unless the crate is
//! built with the `trace-secrets` feature it expands to nothing, so neither
//! the format string nor its arguments ever reach a logger.

#[cfg(feature = "trace-secrets")]
macro_rules! trace_secret {
    ($($arg:tt)+) => {
        trace!($($arg)+)
    };
}

#[cfg(not(feature = "trace-secrets"))]
macro_rules! trace_secret {
    ($($arg:tt)+) => {};
}

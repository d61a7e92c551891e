//! Adding context to failures on their way out.
//!
//! A destructor cannot replace a panic that is already unwinding, so context
//! is attached by scope instead: [`wrap`] runs a closure and re-raises any
//! unwind with the context in front of it. [`Context`] does the same for
//! `Result` values that have not been turned into panics yet.

use crate::Error;
use crate::guard::{IntoBoxedError, catch, raise};
use std::fmt::Display;

/// Run `f`; if it unwinds, panic again with `"{context}: {payload}"`.
///
/// Scopes nest, so context accumulates left to right as the failure travels
/// outward.
///
/// ```no_run
/// let name = "example";
/// // panic: file: example: No such file or directory (os error 2)
/// let text = scr::wrap(format!("file: {name}"), || {
///     scr::must(std::fs::read_to_string(name))
/// });
/// # let _ = text;
/// ```
#[track_caller]
pub fn wrap<T, C, F>(context: C, f: F) -> T
where
    C: Display,
    F: FnOnce() -> T,
{
    match catch(f) {
        Ok(value) => value,
        Err(error) => raise(error.context(context)),
    }
}

/// [`wrap`] with the context built by `format!`.
///
/// ```no_run
/// let name = "example";
/// let len = scr::wrapf!("file: {}", name => {
///     scr::must(std::fs::metadata(name)).len()
/// });
/// # let _ = len;
/// ```
#[macro_export]
macro_rules! wrapf {
    ($fmt:literal $(, $arg:expr)* => $body:expr) => {
        $crate::wrap(::std::format!($fmt $(, $arg)*), || $body)
    };
}

/// Context for `Result` values, without unwinding.
pub trait Context<T> {
    /// Wrap the error, if any, with `context` in front of it.
    ///
    /// # Errors
    ///
    /// Returns the wrapped error when `self` is `Err`.
    fn context<C: Display>(self, context: C) -> Result<T, Error>;

    /// Like [`Context::context`], building the context only on failure.
    ///
    /// # Errors
    ///
    /// Returns the wrapped error when `self` is `Err`.
    fn with_context<C, F>(self, f: F) -> Result<T, Error>
    where
        C: Display,
        F: FnOnce() -> C;
}

impl<T, E: IntoBoxedError> Context<T> for Result<T, E> {
    fn context<C: Display>(self, context: C) -> Result<T, Error> {
        self.map_err(|e| Error::from_boxed(e.into()).context(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, Error>
    where
        C: Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::from_boxed(e.into()).context(f()))
    }
}

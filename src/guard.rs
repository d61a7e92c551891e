//! Turning error values into unwinds and back.

use crate::Error;
use std::cell::Cell;
use std::error::Error as StdError;
use std::panic::{self, AssertUnwindSafe};

/// Anything `Box<dyn Error + Send + Sync>` can be built from: error types,
/// already boxed errors, and plain `String`/`&str` messages.
pub trait IntoBoxedError: Into<Box<dyn StdError + Send + Sync + 'static>> {}

impl<E> IntoBoxedError for E where E: Into<Box<dyn StdError + Send + Sync + 'static>> {}

thread_local! {
    static CATCH_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Whether the current thread is inside [`catch`], so a panic raised now
/// will be recovered rather than end the script.
pub(crate) fn catching() -> bool {
    CATCH_DEPTH.with(|depth| depth.get() > 0)
}

/// Unwind with `error` as the payload.
#[track_caller]
pub fn raise(error: Error) -> ! {
    panic::panic_any(error)
}

/// Panic if `result` is an error.
///
/// # Panics
///
/// With the error as an [`Error`] payload when `result` is `Err`.
///
/// ```no_run
/// scr::err(std::env::set_current_dir("example"));
/// ```
#[track_caller]
pub fn err<E: IntoBoxedError>(result: Result<(), E>) {
    if let Err(e) = result {
        raise(Error::from_boxed(e.into()));
    }
}

/// Panic if `result` is an error, otherwise return its value.
///
/// # Panics
///
/// With the error as an [`Error`] payload when `result` is `Err`.
///
/// ```no_run
/// let f = scr::must(std::fs::File::create("example"));
/// ```
#[track_caller]
pub fn must<T, E: IntoBoxedError>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => raise(Error::from_boxed(e.into())),
    }
}

/// Panic with `message`. See [`crate::panicf!`] for the formatting variant.
#[track_caller]
pub fn fail(message: impl Into<String>) -> ! {
    raise(Error::msg(message))
}

/// Run `f`, turning an unwind into `Err`.
///
/// Any payload is accepted: errors raised by this crate are returned as they
/// were raised, ordinary `panic!` messages become [`Error::Message`].
///
/// # Errors
///
/// Returns the payload of the unwind if `f` panics.
pub fn catch<T, F>(f: F) -> Result<T, Error>
where
    F: FnOnce() -> T,
{
    CATCH_DEPTH.with(|depth| depth.set(depth.get() + 1));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    CATCH_DEPTH.with(|depth| depth.set(depth.get() - 1));
    result.map_err(Error::from_panic)
}

/// Format a message with `format!` syntax and panic with it.
///
/// ```no_run
/// let arg = "-x";
/// scr::panicf!("invalid argument: {}", arg);
/// ```
#[macro_export]
macro_rules! panicf {
    ($($arg:tt)+) => {
        $crate::fail(::std::format!($($arg)+))
    };
}

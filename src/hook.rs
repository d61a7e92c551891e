//! Reporting failures that nobody caught.

use crate::Error;
use crate::guard::catching;
use std::error::Error as StdError;
use std::fmt::Write;
use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;
use std::sync::Once;

static INSTALL: Once = Once::new();

/// Install a panic hook that prints [`Error`] payloads readably.
///
/// Rust's default hook only knows string payloads and would print
/// `Box<dyn Any>` for ours. Other payloads still go to the previous hook.
/// Failures raised inside [`crate::catch`] (including [`crate::wrap`] scopes)
/// are recovered by the caller and only logged at debug level.
/// Calling this more than once has no further effect.
pub fn install_panic_hook() {
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let Some(error) = info.payload().downcast_ref::<Error>() else {
                previous(info);
                return;
            };
            if catching() {
                tracing::debug!(error = %error, "recovered script failure");
                return;
            }
            tracing::debug!(error = %error, "unhandled script failure");

            let location = info
                .location()
                .map(|l| format!(" at {l}"))
                .unwrap_or_default();
            eprintln!("{}", report(error, &location));
        }));
    });
}

/// Render `error` with its cause chain, one cause per line.
fn report(error: &Error, location: &str) -> String {
    let mut out = format!("panic{location}: {error}");
    let mut source = StdError::source(error);
    while let Some(cause) = source {
        let _ = write!(out, "\n  caused by: {cause}");
        source = cause.source();
    }
    out
}

/// Entry point for a script: run `f` and turn an unwind into a failure exit.
///
/// ```no_run
/// use std::process::ExitCode;
///
/// fn main() -> ExitCode {
///     scr::script(|| {
///         scr::exec("git", ["status"]);
///     })
/// }
/// ```
pub fn script<F: FnOnce()>(f: F) -> ExitCode {
    install_panic_hook();
    // Not `catch`: this is the outermost frame, so the hook must report.
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(payload) => {
            let error = Error::from_panic(payload);
            tracing::debug!(error = %error, "exiting with failure");
            ExitCode::FAILURE
        }
    }
}

//! The unwind payload carried by every panic this crate raises.

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::process::ExitStatus;

/// A script failure.
///
/// Every helper that aborts the current operation does so with
/// `std::panic::panic_any(Error)`, so a caller catching the unwind can always
/// downcast the payload to this type (see [`crate::catch`]).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error value produced elsewhere and funneled through `err`/`must`/`close`.
    #[error(transparent)]
    Source(Box<dyn StdError + Send + Sync + 'static>),

    /// A subprocess ran but did not exit successfully.
    #[error(transparent)]
    Exit(#[from] ExitError),

    /// The program could not be found on `PATH`.
    #[error("exec: {program:?}: executable file not found in $PATH")]
    NotFound { program: String },

    /// The program was found but could not be started.
    #[error("exec: {program:?}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// An ad hoc message, see [`crate::panicf!`].
    #[error("{0}")]
    Message(String),

    /// An inner failure with caller supplied context in front of it.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap any error value. An `Error` passed in is returned as is.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from_boxed(Box::new(error))
    }

    /// Wrap an already boxed error value.
    #[must_use]
    pub fn from_boxed(error: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        match error.downcast::<Error>() {
            Ok(error) => *error,
            Err(error) => Error::Source(error),
        }
    }

    /// Build an error from a bare message.
    pub fn msg(message: impl Into<String>) -> Self {
        Error::Message(message.into())
    }

    /// Recover an `Error` from a caught panic payload.
    ///
    /// Payloads raised by this crate come back unchanged. Plain `panic!`
    /// payloads (`String` or `&'static str`) become [`Error::Message`].
    #[must_use]
    pub fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        let payload = match payload.downcast::<Error>() {
            Ok(error) => return *error,
            Err(payload) => payload,
        };
        let payload = match payload.downcast::<String>() {
            Ok(message) => return Error::Message(*message),
            Err(payload) => payload,
        };
        match payload.downcast::<&'static str>() {
            Ok(message) => Error::Message((*message).to_string()),
            Err(_) => Error::Message("Box<dyn Any>".to_string()),
        }
    }

    /// Put `context` in front of this error, keeping it as the source.
    #[must_use]
    pub fn context(self, context: impl fmt::Display) -> Self {
        Error::Context {
            context: context.to_string(),
            source: Box::new(self),
        }
    }

    /// Look through any context layers for an error of type `E`.
    #[must_use]
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        match self {
            Error::Source(inner) => inner.downcast_ref::<E>(),
            Error::Exit(exit) => (exit as &(dyn StdError + 'static)).downcast_ref::<E>(),
            Error::Launch { source, .. } => {
                (source as &(dyn StdError + 'static)).downcast_ref::<E>()
            }
            Error::Context { source, .. } => source.downcast_ref::<E>(),
            Error::NotFound { .. } | Error::Message(_) => None,
        }
    }
}

impl From<Box<dyn StdError + Send + Sync + 'static>> for Error {
    fn from(error: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        Self::from_boxed(error)
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Source(Box::new(error))
    }
}

/// A child process that finished with a failure status.
///
/// Displays like `exit status 1`, or `signal: 9` for a process killed by a
/// signal on Unix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitError {
    status: ExitStatus,
}

impl ExitError {
    #[must_use]
    pub fn new(status: ExitStatus) -> Self {
        Self { status }
    }

    #[must_use]
    pub fn status(&self) -> ExitStatus {
        self.status
    }

    /// Exit code, `None` if the process was terminated by a signal.
    #[must_use]
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = self.status.code() {
            return write!(f, "exit status {code}");
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = self.status.signal() {
                return write!(f, "signal: {signal}");
            }
        }

        write!(f, "exit status unknown")
    }
}

impl StdError for ExitError {}

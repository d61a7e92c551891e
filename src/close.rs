//! Closing resources and panicking when that fails.

use crate::Error;
use crate::guard::raise;
use std::error::Error as StdError;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::ops::{Deref, DerefMut};
use std::process::Child;
use std::thread;

/// A resource whose release can fail.
///
/// `Drop` has nowhere to report an error, so types that can lose data on
/// release (buffered writers, files, child processes) get an explicit close.
pub trait Close {
    type Error: StdError + Send + Sync + 'static;

    fn close(self) -> Result<(), Self::Error>;
}

impl Close for File {
    type Error = io::Error;

    /// Releases the handle. `File` writes are unbuffered, so there is nothing
    /// left to flush; use [`Synced`] when the data must reach the disk.
    fn close(self) -> io::Result<()> {
        drop(self);
        Ok(())
    }
}

/// A file that is synced to disk when closed.
///
/// ```no_run
/// use std::io::Write;
///
/// let mut f = scr::closing(scr::Synced(scr::must(std::fs::File::create("example"))));
/// scr::err(writeln!(f, "hello"));
/// ```
#[derive(Debug)]
pub struct Synced(pub File);

impl Close for Synced {
    type Error = io::Error;

    fn close(self) -> io::Result<()> {
        self.0.sync_all()
    }
}

impl Deref for Synced {
    type Target = File;

    fn deref(&self) -> &File {
        &self.0
    }
}

impl DerefMut for Synced {
    fn deref_mut(&mut self) -> &mut File {
        &mut self.0
    }
}

impl<W: Write> Close for BufWriter<W> {
    type Error = io::Error;

    fn close(mut self) -> io::Result<()> {
        self.flush()
    }
}

impl Close for Child {
    type Error = Error;

    /// Waits for the process and fails unless it exited successfully.
    fn close(mut self) -> Result<(), Error> {
        let status = self.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(crate::ExitError::new(status).into())
        }
    }
}

/// Close `resource` and panic on error.
///
/// # Panics
///
/// With the close error as an [`Error`] payload.
///
/// ```no_run
/// use std::io::Write;
///
/// let mut f = std::io::BufWriter::new(scr::must(std::fs::File::create("example")));
/// scr::err(writeln!(f, "hello"));
/// scr::close(f);
/// ```
#[track_caller]
pub fn close<C: Close>(resource: C) {
    tracing::debug!(resource = std::any::type_name::<C>(), "closing");
    if let Err(e) = resource.close() {
        raise(Error::new(e));
    }
}

/// Hold `resource` until the end of the scope, then [`close`] it.
///
/// The returned guard derefs to the resource. It closes on every exit path;
/// when the scope is left by a panic, a close error is logged instead of
/// raised, since a second panic would abort the process.
///
/// ```no_run
/// use std::io::Write;
///
/// let mut f = scr::closing(scr::must(std::fs::File::create("example")));
/// scr::err(writeln!(f, "hello"));
/// ```
pub fn closing<C: Close>(resource: C) -> Closing<C> {
    Closing {
        resource: Some(resource),
    }
}

/// Guard returned by [`closing`].
#[derive(Debug)]
pub struct Closing<C: Close> {
    resource: Option<C>,
}

impl<C: Close> Closing<C> {
    /// Close now instead of at the end of the scope.
    #[track_caller]
    pub fn finish(mut self) {
        if let Some(resource) = self.resource.take() {
            close(resource);
        }
    }

    /// Give the resource back without closing it.
    #[must_use]
    pub fn into_inner(mut self) -> Option<C> {
        self.resource.take()
    }
}

impl<C: Close> Deref for Closing<C> {
    type Target = C;

    fn deref(&self) -> &C {
        match &self.resource {
            Some(resource) => resource,
            None => unreachable!("resource is only taken by value-consuming methods"),
        }
    }
}

impl<C: Close> DerefMut for Closing<C> {
    fn deref_mut(&mut self) -> &mut C {
        match &mut self.resource {
            Some(resource) => resource,
            None => unreachable!("resource is only taken by value-consuming methods"),
        }
    }
}

impl<C: Close> Drop for Closing<C> {
    fn drop(&mut self) {
        let Some(resource) = self.resource.take() else {
            return;
        };
        if thread::panicking() {
            if let Err(e) = resource.close() {
                tracing::warn!(error = %e, "close failed while unwinding");
            }
        } else {
            close(resource);
        }
    }
}

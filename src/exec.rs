//! Running subprocesses wired to this process's standard streams.

use crate::{Error, ExitError};
use crate::guard::{err, raise};
use std::ffi::OsStr;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Build a [`Command`] for `name` with stdin, stdout and stderr inherited from
/// this process.
///
/// The command is not started, so it can be customized first:
///
/// ```no_run
/// use scr::Run;
///
/// let mut c = scr::exec_cmd("cargo", ["build", "--release"]);
/// c.env("CARGO_TARGET_DIR", "/tmp/target");
/// scr::err(c.run());
/// ```
pub fn exec_cmd<N, I, S>(name: N, args: I) -> Command
where
    N: AsRef<OsStr>,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(name);
    cmd.args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    cmd
}

/// Run `name` with `args` to completion and panic if it fails to start or
/// exits unsuccessfully.
///
/// # Panics
///
/// With [`Error::Exit`], [`Error::NotFound`] or [`Error::Launch`].
///
/// ```no_run
/// scr::exec("git", ["status"]);
/// ```
#[track_caller]
pub fn exec<N, I, S>(name: N, args: I)
where
    N: AsRef<OsStr>,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    err(exec_cmd(name, args).run());
}

/// Resolve `name` to an executable on `PATH`.
///
/// # Panics
///
/// With [`Error::NotFound`] if there is no such executable.
#[track_caller]
pub fn look_path(name: impl AsRef<OsStr>) -> PathBuf {
    let name = name.as_ref();
    match which::which(name) {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(program = ?name, error = %e, "lookup failed");
            raise(Error::NotFound {
                program: name.to_string_lossy().into_owned(),
            })
        }
    }
}

/// Run a command to completion, treating a failure exit status as an error.
pub trait Run {
    /// # Errors
    ///
    /// [`Error::NotFound`] or [`Error::Launch`] if the process cannot be
    /// started, [`Error::Exit`] if it exits unsuccessfully.
    fn run(&mut self) -> Result<(), Error>;
}

impl Run for Command {
    fn run(&mut self) -> Result<(), Error> {
        tracing::debug!(
            program = ?self.get_program(),
            args = ?self.get_args().collect::<Vec<_>>(),
            "running command"
        );

        let status = self
            .status()
            .map_err(|e| launch_error(self.get_program(), e))?;

        if status.success() {
            Ok(())
        } else {
            tracing::debug!(program = ?self.get_program(), %status, "command failed");
            Err(ExitError::new(status).into())
        }
    }
}

/// `NotFound` from spawning also covers a missing working directory or
/// interpreter, so it only becomes [`Error::NotFound`] for a bare program name
/// that a `PATH` search cannot resolve either.
fn launch_error(program: &OsStr, error: io::Error) -> Error {
    let missing = error.kind() == io::ErrorKind::NotFound
        && !program.to_string_lossy().chars().any(std::path::is_separator)
        && which::which(program).is_err();
    let program = program.to_string_lossy().into_owned();
    if missing {
        Error::NotFound { program }
    } else {
        Error::Launch {
            program,
            source: error,
        }
    }
}

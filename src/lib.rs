//! # scr
//!
//! Helpers for short automation scripts that simply panic on errors, like a
//! shell script running with `set -e`.
//!
//! ```no_run
//! use std::io::{BufRead, BufReader};
//!
//! // grep "abc" example
//! let re = scr::must(regex::Regex::new("abc"));
//! let f = BufReader::new(scr::must(std::fs::File::open("example")));
//! for line in f.lines() {
//!     let line = scr::must(line);
//!     if re.is_match(&line) {
//!         println!("{line}");
//!     }
//! }
//! ```
//!
//! Every panic raised here carries an [`Error`] payload. [`script`] installs a
//! panic hook that reports it and turns it into a failure exit code.

pub mod cli;
pub mod close;
pub mod error;
pub mod exec;
pub mod guard;
pub mod hook;
pub mod wrap;

pub use close::{Close, Closing, Synced, close, closing};
pub use error::{Error, ExitError};
pub use exec::{Run, exec, exec_cmd, look_path};
pub use guard::{IntoBoxedError, catch, err, fail, must, raise};
pub use hook::{install_panic_hook, script};
pub use wrap::{Context, wrap};

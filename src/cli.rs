//! CLI module containing the main entry point logic.

use crate::{exec, must, script};
use clap::{Parser as ClapParser, Subcommand};
use regex::bytes::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI arguments for the scr tool.
#[derive(ClapParser)]
#[command(name = "scr")]
#[command(version = PKG_VERSION)]
#[command(about = "Script steps that stop at the first failure", long_about = None)]
struct Cli {
    /// Log what runs (SCR_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program with this process's stdin, stdout and stderr
    Exec {
        /// Program to run
        name: String,

        /// Arguments passed to the program
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Print lines matching a regular expression
    Grep {
        /// Regular expression to match
        pattern: String,

        /// File to search (stdin if omitted)
        file: Option<PathBuf>,
    },
}

/// Main CLI logic. Parses arguments, sets up logging and runs the command.
#[must_use]
pub fn run_cli() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    script(|| match cli.command {
        Commands::Exec { name, args } => exec(name, args),
        Commands::Grep { pattern, file } => grep(&pattern, file.as_deref()),
    })
}

/// Log to stderr, filtered by `SCR_LOG` or the verbosity flag.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SCR_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    // A subscriber can only be set once per process.
    if fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing already initialized");
    }
}

/// Print the lines of `file` (or stdin) that match `pattern`.
fn grep(pattern: &str, file: Option<&Path>) {
    let re = must(Regex::new(pattern));
    let mut out = crate::closing(BufWriter::new(io::stdout().lock()));
    match file {
        Some(path) => {
            let input =
                crate::closing(crate::wrapf!("{}", path.display() => must(File::open(path))));
            search(&re, BufReader::new(&*input), &mut *out);
        }
        None => search(&re, io::stdin().lock(), &mut *out),
    }
}

/// Write every line of `input` matching `re` to `out`, newline terminated.
fn search<R: BufRead, W: Write>(re: &Regex, input: R, out: &mut W) {
    for line in input.split(b'\n') {
        let line = must(line);
        let line = line.strip_suffix(b"\r").unwrap_or(&line);
        if re.is_match(line) {
            crate::err(out.write_all(line));
            crate::err(out.write_all(b"\n"));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exec_keeps_hyphen_arguments() {
        let cli = Cli::try_parse_from(["scr", "exec", "sh", "-c", "exit 1"]).unwrap();
        match cli.command {
            Commands::Exec { name, args } => {
                assert_eq!(name, "sh");
                assert_eq!(args, ["-c", "exit 1"]);
            }
            Commands::Grep { .. } => panic!("expected exec"),
        }
    }

    #[test]
    fn test_search_matches_lines() {
        let re = Regex::new("abc").unwrap();
        let mut out = Vec::new();
        search(&re, &b"xabcx\nnope\r\nabc\n"[..], &mut out);
        assert_eq!(out, b"xabcx\nabc\n");
    }

    #[test]
    fn test_search_bad_pattern() {
        let error = crate::catch(|| grep("(", None)).unwrap_err();
        assert!(error.downcast_ref::<regex::Error>().is_some());
    }
}

//! Common test helpers shared across integration tests

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)] // Not all helpers are used by every test file

use std::fs::{self, File};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Path of the compiled `scr` binary
pub fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_scr"))
}

/// Helper to create a temporary directory for tests
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// An anonymous file holding `data`, rewound so a child can read it as stdin
pub fn input_file(data: &[u8]) -> File {
    let mut tmp = tempfile::tempfile().unwrap();
    tmp.write_all(data).unwrap();
    tmp.seek(SeekFrom::Start(0)).unwrap();
    tmp
}

/// A named file to hand to a child as stdout or stderr, read back afterwards
pub fn output_file() -> tempfile::NamedTempFile {
    tempfile::NamedTempFile::new().unwrap()
}

pub fn read_output(file: &tempfile::NamedTempFile) -> Vec<u8> {
    fs::read(file.path()).unwrap()
}

/// Write `content` to `name` inside `dir`
pub fn create_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Line ending the platform's echo-style commands produce
pub fn line_suffix() -> &'static str {
    if cfg!(windows) { "\r\n" } else { "" }
}

/// Helper to create a Command for the binary, isolated from the user's log settings
pub fn test_command(binary: &PathBuf) -> Command {
    let mut cmd = Command::new(binary);
    cmd.env_remove("SCR_LOG");
    cmd
}

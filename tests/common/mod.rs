//! Shared integration-test helpers: fixture lookup, temp config files, and
//! running the `schedcfg` binary as a child process.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

/// Returns the path of a file under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Writes `contents` to a fresh temporary file.
///
/// The file is deleted when the returned handle is dropped.
#[allow(clippy::missing_panics_doc)]
pub fn temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    std::io::Write::write_all(&mut file, contents.as_bytes()).expect("failed to write config");
    file
}

/// Runs the `schedcfg` binary with `args` and waits for it to exit.
#[allow(clippy::missing_panics_doc)]
pub fn run_schedcfg(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_schedcfg"))
        .args(args)
        .env_remove("SCHEDCFG_LOG_LEVEL")
        .env_remove("SCHEDCFG_SEQUENTIAL")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run schedcfg")
}

/// Lossy stderr of a finished process.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Lossy stdout of a finished process.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

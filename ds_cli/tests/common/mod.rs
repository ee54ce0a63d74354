//! Shared fixture for end-to-end tests: a temporary directory holding a
//! status file and a keep file, and a helper to run the binary against them.

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

pub struct TestContext {
    _tmp: TempDir,
    pub status_file: PathBuf,
    pub keep_file: PathBuf,
}

/// Captured result of one run.
pub struct RunResult {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl RunResult {
    pub fn lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }
}

impl TestContext {
    pub fn new(status: &str) -> Self {
        let tmp = TempDir::new().unwrap();
        let status_file = tmp.path().join("status");
        let keep_file = tmp.path().join("keep");
        fs::write(&status_file, status).unwrap();
        Self {
            _tmp: tmp,
            status_file,
            keep_file,
        }
    }

    pub fn write_keep(&self, content: &str) {
        fs::write(&self.keep_file, content).unwrap();
    }

    pub fn read_keep(&self) -> String {
        fs::read_to_string(&self.keep_file).unwrap()
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_debsweep"));
        cmd.arg("-f")
            .arg(&self.status_file)
            .arg("-k")
            .arg(&self.keep_file)
            .args(args)
            .env_remove("DEBSWEEP_LOG");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> RunResult {
        let output = self.command(args).stdin(Stdio::null()).output().unwrap();
        RunResult::from(output)
    }

    pub fn run_with_stdin(&self, args: &[&str], input: &str) -> RunResult {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        child
            .stdin
            .take()
            .unwrap()
            .write_all(input.as_bytes())
            .unwrap();
        RunResult::from(child.wait_with_output().unwrap())
    }
}

impl From<Output> for RunResult {
    fn from(output: Output) -> Self {
        Self {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Build one installed stanza.
pub fn stanza(name: &str, section: &str, extra: &[&str]) -> String {
    let mut text = format!(
        "Package: {}\nStatus: install ok installed\nPriority: optional\nSection: {}\n",
        name, section
    );
    for line in extra {
        text.push_str(line);
        text.push('\n');
    }
    text
}

/// Join stanzas with blank lines.
pub fn status_file(stanzas: &[String]) -> String {
    stanzas.join("\n")
}

//! Metric collectors.
//!
//! Each collector runs one external program and parses its captured stdout.
//! Programs are started through [`CommandRunner`] so the parsing and the run
//! pipeline can be exercised without texcount, pdfinfo or git installed.

pub mod diffs;
pub mod pages;
pub mod words;

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::Error;

pub use diffs::count_diffs;
pub use pages::count_pages;
pub use words::count_words;

/// Runs an external program to completion and returns its stdout.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&OsStr], cwd: Option<&Path>) -> Result<String, Error>;
}

/// Runs programs as child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&OsStr], cwd: Option<&Path>) -> Result<String, Error> {
        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        debug!(program, ?args, "Running collector");
        let output = command.output().map_err(|source| Error::ToolSpawn {
            tool: program.to_string(),
            source,
        })?;

        if !output.status.success() {
            return Err(Error::ToolFailed {
                tool: program.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Last whitespace-separated field of the first line containing `label`,
/// parsed as an integer.
fn last_field_of_line(tool: &str, output: &str, label: &str) -> Result<u64, Error> {
    let line = output
        .lines()
        .find(|line| line.contains(label))
        .ok_or_else(|| Error::tool_output(tool, format!("no line containing {:?}", label)))?;

    let field = line
        .split_whitespace()
        .last()
        .ok_or_else(|| Error::tool_output(tool, format!("empty {:?} line", label)))?;

    field
        .parse()
        .map_err(|_| Error::tool_output(tool, format!("{:?} is not a count in {:?}", field, line)))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_field_of_line() {
        let out = "Title: x\nPages:          12\nPage size: a4\n";
        assert_eq!(last_field_of_line("pdfinfo", out, "Pages:").unwrap(), 12);
    }

    #[test]
    fn test_last_field_missing_line() {
        let err = last_field_of_line("pdfinfo", "Title: x\n", "Pages:").unwrap_err();
        assert!(matches!(err, Error::ToolOutput { .. }));
    }

    #[test]
    fn test_system_runner_missing_program() {
        let err = SystemRunner
            .run("texprogress-no-such-program", &[], None)
            .unwrap_err();
        assert!(matches!(err, Error::ToolSpawn { .. }));
    }
}

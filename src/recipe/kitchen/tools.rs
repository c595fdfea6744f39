// src/recipe/kitchen/tools.rs

//! Seams to the external tools the Kitchen drives
//!
//! The Kitchen never runs `git` or `cmake` itself; it goes through these
//! traits so a harness (or a test) can substitute its own implementation.
//! Implementations report a tool that ran but exited non-zero as an `Ok`
//! [`ToolOutput`]; `Err` means the tool could not be started at all.

use crate::recipe::format::SourceSection;
use crate::recipe::kitchen::cmake::CMakeConfig;
use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::{Command, Output};

/// Captured result of one external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Command line, for logs and error messages
    pub command: String,
    /// Exit code, `None` if killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Build from a finished process
    pub fn from_output(command: impl Into<String>, output: &Output) -> Self {
        Self {
            command: command.into(),
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// A successful run with no output
    pub fn success(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            status: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// A run that exited with `code` and printed `stderr`
    pub fn failure(command: impl Into<String>, code: i32, stderr: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            status: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status == Some(0)
    }

    /// What the tool said about the failure, untouched
    ///
    /// Both streams are kept: Ninja and MSVC print the compiler error on
    /// stdout and only a summary line on stderr. Stdout comes first.
    pub fn diagnostics(&self) -> String {
        [&self.stdout, &self.stderr]
            .into_iter()
            .filter(|stream| !stream.trim().is_empty())
            .map(|stream| stream.trim_end_matches(['\n', '\r']))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Failure message in the form used by every step error
    pub fn failure_message(&self) -> String {
        format!(
            "{} failed with exit code {:?}\n{}",
            self.command,
            self.status,
            self.diagnostics()
        )
    }
}

/// Fetches the recipe source into a work directory
pub trait SourceFetcher: Send + Sync {
    /// Clone `source.branch` of `source.git` into `work_dir/source.clone_dir`
    fn fetch(&self, source: &SourceSection, work_dir: &Path) -> io::Result<ToolOutput>;
}

/// Configures, builds and installs a fetched source tree
pub trait BuildTool: Send + Sync {
    /// Generate the build system for `config`
    fn configure(&self, config: &CMakeConfig) -> io::Result<ToolOutput>;

    /// Compile the configured tree
    fn build(&self, config: &CMakeConfig) -> io::Result<ToolOutput>;

    /// Install the compiled artifacts into the install prefix
    fn install(&self, config: &CMakeConfig) -> io::Result<ToolOutput>;
}

/// Run `program` with `args` and capture its output
pub(crate) fn run_command<I, S>(
    program: &Path,
    args: I,
    current_dir: Option<&Path>,
    envs: &[(&str, &str)],
) -> io::Result<ToolOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<S> = args.into_iter().collect();
    let command_line = std::iter::once(program.as_os_str())
        .chain(args.iter().map(|a| -> &OsStr { a.as_ref() }))
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ");

    let mut command = Command::new(program);
    command.args(&args).envs(envs.iter().copied());
    if let Some(dir) = current_dir {
        command.current_dir(dir);
    }

    let output = command.output()?;
    Ok(ToolOutput::from_output(command_line, &output))
}

/// Locate `name` on PATH
pub(crate) fn locate(name: &str) -> io::Result<std::path::PathBuf> {
    which::which(name).map_err(|e| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} not found on PATH: {}", name, e),
        )
    })
}

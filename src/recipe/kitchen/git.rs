// src/recipe/kitchen/git.rs

//! Source fetching with the git command-line client

use super::tools::{locate, run_command, SourceFetcher, ToolOutput};
use crate::recipe::format::SourceSection;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fetches sources with `git clone -b <branch>`
#[derive(Debug, Clone, Default)]
pub struct GitFetcher {
    /// Explicit git binary; looked up on PATH when unset
    program: Option<PathBuf>,
}

impl GitFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific git binary
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }

    fn program(&self) -> io::Result<PathBuf> {
        match &self.program {
            Some(p) => Ok(p.clone()),
            None => locate("git"),
        }
    }
}

/// Arguments for cloning `source` (relative to the work directory)
pub fn clone_args(source: &SourceSection) -> Vec<String> {
    vec![
        "clone".to_string(),
        "-b".to_string(),
        source.branch.clone(),
        source.git.clone(),
        source.clone_dir.clone(),
    ]
}

impl SourceFetcher for GitFetcher {
    fn fetch(&self, source: &SourceSection, work_dir: &Path) -> io::Result<ToolOutput> {
        let git = self.program()?;
        debug!("Using git at {}", git.display());

        // A missing credential must fail the clone, not block on a prompt
        run_command(
            &git,
            clone_args(source),
            Some(work_dir),
            &[("GIT_TERMINAL_PROMPT", "0")],
        )
    }
}

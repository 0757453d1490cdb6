// Copyright (c) 2026 - present svn2git contributors
// SPDX-License-Identifier: MIT

//! Subversion working copy driver

use std::path::Path;

use crate::error::ScmError;
use crate::runner::CommandRunner;

const SVN_COMMAND: &str = "svn";
const NON_INTERACTIVE: &str = "--non-interactive";

/// A Subversion working copy driven through the `svn` client
#[derive(Debug, Clone)]
pub struct SvnRepo {
    runner: CommandRunner,
}

impl SvnRepo {
    /// Use the working copy at `path`
    ///
    /// The directory is only checked for existence. A directory that is not
    /// a working copy fails on the first `svn` command.
    ///
    /// # Errors
    ///
    /// Returns `ScmError::InvalidWorkingDir` if `path` is not a directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ScmError> {
        Ok(Self {
            runner: CommandRunner::new(path)?,
        })
    }

    /// Echo commands at INFO level
    #[must_use]
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.runner = self.runner.with_echo(echo);
        self
    }

    /// Get the working copy path
    #[must_use]
    pub fn workdir(&self) -> &Path {
        self.runner.working_dir()
    }

    /// Run `svn log --xml`, optionally limited to a revision range
    ///
    /// # Errors
    ///
    /// Returns `ScmError::CommandFailed` if `svn` exits unsuccessfully.
    pub fn log_xml(&self, from: Option<&str>, to: Option<&str>) -> Result<String, ScmError> {
        let mut args = vec!["log".to_string(), "--xml".to_string(), NON_INTERACTIVE.to_string()];
        if let Some(range) = revision_range(from, to) {
            args.push("-r".to_string());
            args.push(range);
        }
        self.runner.run(SVN_COMMAND, &args)
    }

    /// Run `svn diff` between two revisions
    ///
    /// Paths in the output are relative to the working copy, so the diff
    /// applies with zero leading components stripped.
    ///
    /// # Errors
    ///
    /// Returns `ScmError::CommandFailed` if `svn` exits unsuccessfully.
    pub fn diff(&self, before: u64, after: u64) -> Result<Vec<u8>, ScmError> {
        let range = format!("{before}:{after}");
        self.runner
            .run_bytes(SVN_COMMAND, ["diff", NON_INTERACTIVE, "-r", range.as_str()])
    }
}

/// Build the `-r` argument for `svn log`
///
/// A missing lower bound starts at revision 1 and a missing upper bound ends
/// at `HEAD`. Returns `None` when neither bound is given.
#[must_use]
pub fn revision_range(from: Option<&str>, to: Option<&str>) -> Option<String> {
    match (from, to) {
        (None, None) => None,
        (from, to) => Some(format!("{}:{}", from.unwrap_or("1"), to.unwrap_or("HEAD"))),
    }
}

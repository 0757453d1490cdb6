// Copyright (c) 2026 - present svn2git contributors
// SPDX-License-Identifier: MIT

//! Error types for svn2git-scm

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while driving `svn` or `git`
#[derive(Debug, Error)]
pub enum ScmError {
    /// The working directory does not exist or is not a directory
    #[error("Invalid working directory: {}", path.display())]
    InvalidWorkingDir {
        /// The directory that was rejected
        path: PathBuf,
    },

    /// The directory is not inside a git work tree
    #[error("Not a valid git repository: {}", path.display())]
    NotARepository {
        /// The directory that was checked
        path: PathBuf,
    },

    /// The executable could not be found on `PATH`
    #[error("Command not found: {program}")]
    ProgramNotFound {
        /// Name of the missing executable
        program: String,
    },

    /// The command ran and exited unsuccessfully
    #[error("Command `{command}` exited with ({exit_code}): {stderr}")]
    CommandFailed {
        /// The command line, for display only
        command: String,
        /// Exit status, -1 when terminated by a signal
        exit_code: i32,
        /// Captured standard error
        stderr: String,
    },

    /// Other IO failures (spawning, temporary files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The pre-computed diff directory does not exist
    #[error("Patch directory does not exist: {}", path.display())]
    PatchDirectoryNotFound {
        /// The configured directory
        path: PathBuf,
    },

    /// No pre-computed diff file for a revision pair
    #[error("Cannot find diff file: {}", path.display())]
    DiffNotFound {
        /// The file that was expected
        path: PathBuf,
    },
}

impl ScmError {
    /// Whether the error comes from an external process exiting unsuccessfully
    #[must_use]
    pub fn is_command_failure(&self) -> bool {
        matches!(self, Self::CommandFailed { .. })
    }
}

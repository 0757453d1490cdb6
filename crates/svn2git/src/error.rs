// Copyright (c) 2026 - present svn2git contributors
// SPDX-License-Identifier: MIT

//! Error taxonomy for a migration run
//!
//! Every failure is fatal. Components return their own error types, which
//! are gathered into [`MigrateError`] and classified into four kinds that
//! decide the process exit code.

use std::fmt;
use std::process::ExitCode;

use svn2git_log::LogError;
use svn2git_scm::ScmError;
use thiserror::Error;

use crate::config::ConfigError;

/// Any failure that aborts a migration run
#[derive(Debug, Error)]
pub enum MigrateError {
    /// Invalid command line configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Loading the revision log or authors file failed
    #[error(transparent)]
    Log(#[from] LogError),

    /// Running `svn` or `git`, or reading a diff, failed
    #[error(transparent)]
    Scm(#[from] ScmError),

    /// A replayer was asked to run a second time
    #[error("Replay already started; create a new replayer for another run")]
    AlreadyRun,
}

/// Classification of failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing working directory, not a valid repository
    Configuration,
    /// Malformed or incomplete log or authors document
    Parse,
    /// A diff, log or authors file is missing or unreadable
    FileNotFound,
    /// An external process exited unsuccessfully
    Command,
}

impl ErrorKind {
    /// Process exit code reported for this kind
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Configuration => 2,
            Self::Parse => 3,
            Self::FileNotFound => 4,
            Self::Command => 5,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configuration => "configuration error",
            Self::Parse => "parse error",
            Self::FileNotFound => "file not found",
            Self::Command => "command error",
        };
        f.write_str(name)
    }
}

impl MigrateError {
    /// Classify the error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(e) => match e {
                ConfigError::FileNotFound { .. } => ErrorKind::FileNotFound,
                ConfigError::DirectoryNotFound { .. }
                | ConfigError::NotADirectory { .. }
                | ConfigError::SaveLogFailed(..) => ErrorKind::Configuration,
            },
            Self::Log(e) => match e {
                LogError::FileNotFound { .. } | LogError::Io(_) => ErrorKind::FileNotFound,
                LogError::Xml(_)
                | LogError::InvalidDocument { .. }
                | LogError::MissingRevision
                | LogError::InvalidRevision { .. }
                | LogError::MissingField { .. }
                | LogError::InvalidAuthorLine { .. } => ErrorKind::Parse,
            },
            Self::Scm(e) => match e {
                ScmError::InvalidWorkingDir { .. }
                | ScmError::NotARepository { .. }
                | ScmError::PatchDirectoryNotFound { .. } => ErrorKind::Configuration,
                ScmError::DiffNotFound { .. } => ErrorKind::FileNotFound,
                ScmError::ProgramNotFound { .. }
                | ScmError::CommandFailed { .. }
                | ScmError::Io(_) => ErrorKind::Command,
            },
            Self::AlreadyRun => ErrorKind::Configuration,
        }
    }

    /// Exit code for the process
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.kind().exit_code())
    }
}

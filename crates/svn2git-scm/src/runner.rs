// Copyright (c) 2026 - present svn2git contributors
// SPDX-License-Identifier: MIT

//! External command execution
//!
//! Both drivers shell out through [`CommandRunner`]. Commands are spawned
//! directly with an argument vector, never through a shell, so revision
//! numbers, authors and log messages need no quoting.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, error, info, trace};

use crate::error::ScmError;

/// Synchronous runner for commands inside one working directory
#[derive(Debug, Clone)]
pub struct CommandRunner {
    working_dir: PathBuf,
    echo: bool,
}

impl CommandRunner {
    /// Create a runner for an existing directory
    ///
    /// Echo is on by default.
    ///
    /// # Errors
    ///
    /// Returns `ScmError::InvalidWorkingDir` if `working_dir` is not a directory.
    pub fn new(working_dir: impl AsRef<Path>) -> Result<Self, ScmError> {
        let working_dir = working_dir.as_ref();
        if !working_dir.is_dir() {
            return Err(ScmError::InvalidWorkingDir {
                path: working_dir.to_path_buf(),
            });
        }
        Ok(Self {
            working_dir: working_dir.to_path_buf(),
            echo: true,
        })
    }

    /// Log each command at INFO (`true`) or DEBUG (`false`) before running it
    #[must_use]
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Get the working directory
    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Whether commands are echoed at INFO level
    #[must_use]
    pub fn echo(&self) -> bool {
        self.echo
    }

    /// Run a command and return its standard output as text
    ///
    /// Invalid UTF-8 is replaced, use [`CommandRunner::run_bytes`] when the
    /// output must be preserved exactly.
    ///
    /// # Errors
    ///
    /// See [`CommandRunner::run_bytes`].
    pub fn run<I, S>(&self, program: &str, args: I) -> Result<String, ScmError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let stdout = self.run_bytes(program, args)?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }

    /// Run a command and return its raw standard output
    ///
    /// The command inherits no standard input, so a client waiting for a
    /// prompt answer fails instead of hanging.
    ///
    /// # Errors
    ///
    /// Returns `ScmError::ProgramNotFound` if the executable is missing,
    /// `ScmError::Io` if it cannot be spawned, and `ScmError::CommandFailed`
    /// if it exits unsuccessfully.
    pub fn run_bytes<I, S>(&self, program: &str, args: I) -> Result<Vec<u8>, ScmError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let command_line = display_command(program, &args);

        if self.echo {
            info!("> {command_line}");
        } else {
            debug!("> {command_line}");
        }

        let output = Command::new(program)
            .args(&args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ScmError::ProgramNotFound {
                        program: program.to_string(),
                    }
                } else {
                    ScmError::Io(e)
                }
            })?;

        if output.status.success() {
            debug!(command = %command_line, bytes = output.stdout.len(), "Command succeeded");
            trace!(stdout = %String::from_utf8_lossy(&output.stdout));
            Ok(output.stdout)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let exit_code = output.status.code().unwrap_or(-1);
            error!(command = %command_line, exit_code, stderr = %stderr, "Command failed");
            Err(ScmError::CommandFailed {
                command: command_line,
                exit_code,
                stderr,
            })
        }
    }
}

/// Render a command line for logs and error messages
///
/// Arguments containing whitespace or quotes are wrapped in double quotes.
/// The result is for humans only and is never passed to a shell.
pub fn display_command<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
    let mut line = program.to_string();
    for arg in args {
        let arg = arg.as_ref().to_string_lossy();
        line.push(' ');
        if arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || c == '"') {
            line.push('"');
            line.push_str(&arg.replace('"', "\\\""));
            line.push('"');
        } else {
            line.push_str(&arg);
        }
    }
    line
}

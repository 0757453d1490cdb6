//! Configuration for the svn2git migration
//!
//! This module provides the command line interface: where the Subversion
//! working copy and the git work tree live, where the revision log and diffs
//! come from, and logging options.

use std::path::{Path, PathBuf};

use clap::Parser;
use svn2git_log::DEFAULT_DOMAIN;
use svn2git_scm::DEFAULT_PATCH_PATTERN;

/// Replay Subversion revisions as git commits
///
/// Every pair of consecutive revisions in the log is turned into a diff and
/// applied to the git work tree as one commit carrying the later revision's
/// author, date and message.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "svn2git")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subversion working copy
    ///
    /// Used for `svn log` when no --log file is given and for `svn diff`
    /// when no --patches directory is given. Defaults to the current directory.
    #[arg(short, long, value_name = "DIR", env = "SVN2GIT_SVN")]
    pub svn: Option<PathBuf>,

    /// Git work tree receiving the commits
    ///
    /// Uncommitted changes in it are discarded. Defaults to the current directory.
    #[arg(short, long, value_name = "DIR", env = "SVN2GIT_GIT")]
    pub git: Option<PathBuf>,

    /// First revision of the range passed to `svn log`
    #[arg(short, long, value_name = "REV")]
    pub from: Option<String>,

    /// Last revision of the range passed to `svn log`
    #[arg(short, long, value_name = "REV")]
    pub to: Option<String>,

    /// Read revisions from a saved `svn log --xml` file instead of running `svn log`
    ///
    /// Takes precedence over --from and --to.
    #[arg(short, long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Read diffs from this directory instead of running `svn diff`
    #[arg(short, long, value_name = "DIR")]
    pub patches: Option<PathBuf>,

    /// Authors file mapping Subversion users to git identities
    ///
    /// One mapping per line: `svn-user Full Name <email>`.
    #[arg(short, long, value_name = "FILE")]
    pub authors: Option<PathBuf>,

    /// File name pattern of diffs in the --patches directory
    ///
    /// The first `%d` is replaced by the older revision, the second by the
    /// newer one. Defaults to `parselog_%d-%d.diff`.
    #[arg(long, value_name = "PATTERN")]
    pub patch_pattern: Option<String>,

    /// Mail domain for authors missing from the authors file
    ///
    /// Unmapped users become `user <user@DOMAIN>`. Defaults to `slct.pl`.
    #[arg(long, value_name = "DOMAIN")]
    pub default_domain: Option<String>,

    /// Save the XML printed by `svn log` to this file for later --log runs
    #[arg(long, value_name = "FILE")]
    pub save_log: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// Get the Subversion working copy, defaulting to the current directory
    #[must_use]
    pub fn svn_path(&self) -> PathBuf {
        self.svn.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the git work tree, defaulting to the current directory
    #[must_use]
    pub fn git_path(&self) -> PathBuf {
        self.git.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the diff file name pattern
    #[must_use]
    pub fn patch_pattern(&self) -> &str {
        self.patch_pattern.as_deref().unwrap_or(DEFAULT_PATCH_PATTERN)
    }

    /// Get the mail domain for unmapped authors
    #[must_use]
    pub fn default_domain(&self) -> &str {
        self.default_domain.as_deref().unwrap_or(DEFAULT_DOMAIN)
    }

    /// Whether the run talks to the Subversion working copy at all
    ///
    /// With both a saved log and exported diffs, `svn` is never invoked.
    #[must_use]
    pub fn needs_svn(&self) -> bool {
        self.log.is_none() || self.patches.is_none()
    }

    /// Whether --from or --to were given but will be ignored because of --log
    #[must_use]
    pub fn range_ignored(&self) -> bool {
        self.log.is_some() && (self.from.is_some() || self.to.is_some())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The git work tree, or the svn working copy when it is needed, is
    ///   missing or not a directory
    /// - The patches directory is given but missing or not a directory
    /// - The log or authors file is given but missing
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.needs_svn() {
            check_dir("--svn", &self.svn_path())?;
        }
        check_dir("--git", &self.git_path())?;
        if let Some(ref patches) = self.patches {
            check_dir("--patches", patches)?;
        }
        if let Some(ref log) = self.log {
            check_file("--log", log)?;
        }
        if let Some(ref authors) = self.authors {
            check_file("--authors", authors)?;
        }
        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

fn check_dir(option: &'static str, path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::DirectoryNotFound {
            option,
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(ConfigError::NotADirectory {
            option,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn check_file(option: &'static str, path: &Path) -> Result<(), ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::FileNotFound {
            option,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A directory option points nowhere
    #[error("{option}: directory not found: {}", path.display())]
    DirectoryNotFound {
        /// The command line option
        option: &'static str,
        /// The rejected path
        path: PathBuf,
    },

    /// A directory option points at something else
    #[error("{option}: not a directory: {}", path.display())]
    NotADirectory {
        /// The command line option
        option: &'static str,
        /// The rejected path
        path: PathBuf,
    },

    /// A file option points nowhere
    #[error("{option}: file not found: {}", path.display())]
    FileNotFound {
        /// The command line option
        option: &'static str,
        /// The rejected path
        path: PathBuf,
    },

    /// Failed to write the saved log
    #[error("Failed to save svn log to {0}: {1}")]
    SaveLogFailed(PathBuf, std::io::Error),
}

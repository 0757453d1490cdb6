// Copyright (c) 2026 - present svn2git contributors
// SPDX-License-Identifier: MIT

//! Git target repository driver
//!
//! Each replayed revision becomes one commit: the diff is applied to the
//! work tree with `git apply`, everything is staged with `git add -A`, and
//! the commit carries the Subversion author, date and message.

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::{Path, PathBuf};

use git2::Repository;
use svn2git_log::Revision;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::ScmError;
use crate::runner::CommandRunner;

const GIT_COMMAND: &str = "git";
const NONEXISTENT: &[u8] = b"\t(nonexistent)";
const DEV_NULL: &[u8] = b"/dev/null";

/// A repository that replayed revisions are committed into
///
/// Implemented by [`GitRepo`]; the replay loop only depends on this trait so
/// it can run against test doubles.
pub trait TargetRepository {
    /// Discard every uncommitted change in the work tree
    ///
    /// # Errors
    ///
    /// Returns `ScmError` if the reset command fails.
    fn reset_hard(&mut self) -> Result<(), ScmError>;

    /// Apply `diff` to the work tree and commit it as `revision`
    ///
    /// On failure the work tree may be left partially patched.
    ///
    /// # Errors
    ///
    /// Returns `ScmError` if applying, staging or committing fails.
    fn apply_patch(&mut self, revision: &Revision, diff: &[u8]) -> Result<(), ScmError>;
}

/// A git work tree driven through the `git` client
#[derive(Debug, Clone)]
pub struct GitRepo {
    runner: CommandRunner,
    temp_dir: Option<PathBuf>,
}

impl GitRepo {
    /// Open the git work tree containing `path`
    ///
    /// # Errors
    ///
    /// Returns `ScmError::InvalidWorkingDir` if `path` is not a directory and
    /// `ScmError::NotARepository` if it is not inside a non-bare repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ScmError> {
        let path = path.as_ref();
        let runner = CommandRunner::new(path)?;

        let not_a_repo = || ScmError::NotARepository {
            path: path.to_path_buf(),
        };
        let repo = Repository::discover(path).map_err(|_| not_a_repo())?;
        if repo.is_bare() {
            return Err(not_a_repo());
        }
        debug!(path = %path.display(), git_dir = %repo.path().display(), "Opened git repository");

        Ok(Self {
            runner,
            temp_dir: None,
        })
    }

    /// Echo commands at INFO level
    #[must_use]
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.runner = self.runner.with_echo(echo);
        self
    }

    /// Create patch files in `dir` instead of the system temp directory
    #[must_use]
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Get the work tree path
    #[must_use]
    pub fn workdir(&self) -> &Path {
        self.runner.working_dir()
    }

    /// Write the diff to a temporary file that is deleted when dropped
    fn write_patch(&self, diff: &[u8]) -> Result<NamedTempFile, ScmError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("svn2git-").suffix(".diff");
        let mut file = match self.temp_dir {
            Some(ref dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(diff)?;
        file.flush()?;
        Ok(file)
    }

    fn git<I, S>(&self, args: I) -> Result<String, ScmError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.runner.run(GIT_COMMAND, args)
    }
}

impl TargetRepository for GitRepo {
    fn reset_hard(&mut self) -> Result<(), ScmError> {
        self.git(["reset", "--hard"])?;
        Ok(())
    }

    fn apply_patch(&mut self, revision: &Revision, diff: &[u8]) -> Result<(), ScmError> {
        let blank = diff.iter().all(u8::is_ascii_whitespace);

        if blank {
            warn!(revision = revision.revision, "Empty diff, recording an empty commit");
        } else {
            let patch = self.write_patch(&mark_missing_sides(diff))?;
            self.git([
                OsStr::new("apply"),
                OsStr::new("-p0"),
                OsStr::new("--whitespace=nowarn"),
                patch.path().as_os_str(),
            ])?;
        }

        self.git(["add", "-A"])?;
        self.git(commit_args(revision, blank))?;
        Ok(())
    }
}

/// Point the header of an added or deleted file at `/dev/null`
///
/// `svn diff` labels the missing side of a file header `(nonexistent)`.
/// `git apply` would read that as an existing empty file, leaving deleted
/// files behind as empty files and failing on added ones.
fn mark_missing_sides(diff: &[u8]) -> Cow<'_, [u8]> {
    if !diff.windows(NONEXISTENT.len()).any(|w| w == NONEXISTENT) {
        return Cow::Borrowed(diff);
    }

    let lines: Vec<&[u8]> = diff.split_inclusive(|&b| b == b'\n').collect();
    let mut out = Vec::with_capacity(diff.len());
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        match lines.get(i + 1) {
            Some(next) if line.starts_with(b"--- ") && next.starts_with(b"+++ ") => {
                push_header(&mut out, b"--- ", line);
                push_header(&mut out, b"+++ ", next);
                i += 2;
            }
            _ => {
                out.extend_from_slice(line);
                i += 1;
            }
        }
    }
    Cow::Owned(out)
}

fn push_header(out: &mut Vec<u8>, marker: &[u8], line: &[u8]) {
    let content_len = line
        .iter()
        .rposition(|&b| b != b'\n' && b != b'\r')
        .map_or(0, |pos| pos + 1);
    let (content, eol) = line.split_at(content_len);
    if content.ends_with(NONEXISTENT) {
        out.extend_from_slice(marker);
        out.extend_from_slice(DEV_NULL);
        out.extend_from_slice(eol);
    } else {
        out.extend_from_slice(line);
    }
}

/// Arguments for `git commit` recording `revision`
fn commit_args(revision: &Revision, allow_empty: bool) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "commit".into(),
        "--allow-empty-message".into(),
        "-m".into(),
        revision.message.clone().into(),
        format!("--author={}", revision.author).into(),
        format!("--date={}", revision.date).into(),
    ];
    if allow_empty {
        args.push("--allow-empty".into());
    }
    args
}

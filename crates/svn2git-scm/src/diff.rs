// Copyright (c) 2026 - present svn2git contributors
// SPDX-License-Identifier: MIT

//! Diff providers
//!
//! A [`DiffProvider`] returns the unified diff that takes the repository from
//! one revision to the next. Diffs come either from a directory of files
//! exported earlier ([`FileDiffProvider`]) or straight from `svn diff`
//! ([`SvnDiffProvider`]). Neither caches anything.

use std::path::{Path, PathBuf};

use svn2git_log::Revision;
use tracing::debug;

use crate::error::ScmError;
use crate::svn::SvnRepo;

/// File name pattern for exported diffs, filled with the two revision numbers
pub const DEFAULT_PATCH_PATTERN: &str = "parselog_%d-%d.diff";

/// Source of the diff between two revisions
pub trait DiffProvider {
    /// Get the diff that turns `before` into `after`
    ///
    /// # Errors
    ///
    /// Returns `ScmError` if the diff cannot be produced.
    fn diff(&self, before: &Revision, after: &Revision) -> Result<Vec<u8>, ScmError>;
}

/// Fill the first two `%d` (or `%s`) placeholders of `pattern`
///
/// `%%` becomes a literal `%`. Placeholders beyond the second are left as-is.
#[must_use]
pub fn fill_pattern(pattern: &str, before: u64, after: u64) -> String {
    let mut values = [before, after].into_iter();
    let mut out = String::with_capacity(pattern.len() + 16);
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some(conv @ ('d' | 's')) => {
                chars.next();
                match values.next() {
                    Some(value) => out.push_str(&value.to_string()),
                    None => {
                        out.push('%');
                        out.push(conv);
                    }
                }
            }
            Some('%') => {
                chars.next();
                out.push('%');
            }
            _ => out.push('%'),
        }
    }

    out
}

/// Reads diffs exported ahead of time from a directory
#[derive(Debug, Clone)]
pub struct FileDiffProvider {
    directory: PathBuf,
    pattern: String,
}

impl FileDiffProvider {
    /// Read diffs from `directory`, named by `pattern`
    ///
    /// # Errors
    ///
    /// Returns `ScmError::PatchDirectoryNotFound` if `directory` is not a directory.
    pub fn new(directory: impl AsRef<Path>, pattern: impl Into<String>) -> Result<Self, ScmError> {
        let directory = directory.as_ref();
        if !directory.is_dir() {
            return Err(ScmError::PatchDirectoryNotFound {
                path: directory.to_path_buf(),
            });
        }
        Ok(Self {
            directory: directory.to_path_buf(),
            pattern: pattern.into(),
        })
    }

    /// Get the directory diffs are read from
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Get the file name pattern
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Path of the diff file for a revision pair
    #[must_use]
    pub fn path_for(&self, before: u64, after: u64) -> PathBuf {
        self.directory
            .join(fill_pattern(&self.pattern, before, after))
    }
}

impl DiffProvider for FileDiffProvider {
    fn diff(&self, before: &Revision, after: &Revision) -> Result<Vec<u8>, ScmError> {
        let path = self.path_for(before.revision, after.revision);
        if !path.is_file() {
            return Err(ScmError::DiffNotFound { path });
        }
        let diff = std::fs::read(&path)?;
        debug!(path = %path.display(), bytes = diff.len(), "Read diff file");
        Ok(diff)
    }
}

/// Asks `svn diff` for every revision pair
#[derive(Debug, Clone)]
pub struct SvnDiffProvider {
    svn: SvnRepo,
}

impl SvnDiffProvider {
    /// Produce diffs from the given working copy
    #[must_use]
    pub fn new(svn: SvnRepo) -> Self {
        Self { svn }
    }

    /// Get the underlying working copy
    #[must_use]
    pub fn svn(&self) -> &SvnRepo {
        &self.svn
    }
}

impl DiffProvider for SvnDiffProvider {
    fn diff(&self, before: &Revision, after: &Revision) -> Result<Vec<u8>, ScmError> {
        self.svn.diff(before.revision, after.revision)
    }
}

// Copyright (c) 2026 - present svn2git contributors
// SPDX-License-Identifier: MIT

//! svn2git-scm: version control drivers for svn2git
//!
//! This library crate wraps the `svn` and `git` command line clients. It
//! provides the two ways of obtaining the diff between adjacent Subversion
//! revisions and the git side that turns each diff into a commit.
//!
//! # Example
//!
//! ```no_run
//! use svn2git_log::Revision;
//! use svn2git_scm::{DiffProvider, FileDiffProvider, GitRepo, TargetRepository};
//!
//! let diffs = FileDiffProvider::new("patches", "parselog_%d-%d.diff").expect("patch dir");
//! let mut git = GitRepo::open("target-repo").expect("open git repo");
//!
//! let before = Revision::new(5, "jdoe <jdoe@slct.pl>", "2015-02-05T16:12:08Z", "old");
//! let after = Revision::new(6, "jdoe <jdoe@slct.pl>", "2015-02-06T09:00:00Z", "new");
//!
//! git.reset_hard().expect("reset");
//! let diff = diffs.diff(&before, &after).expect("diff");
//! git.apply_patch(&after, &diff).expect("commit");
//! ```

#![warn(missing_docs)]

pub mod diff;
pub mod error;
pub mod git;
pub mod runner;
pub mod svn;

pub use diff::{DEFAULT_PATCH_PATTERN, DiffProvider, FileDiffProvider, SvnDiffProvider, fill_pattern};
pub use error::ScmError;
pub use git::{GitRepo, TargetRepository};
pub use runner::CommandRunner;
pub use svn::SvnRepo;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::diff::{DiffProvider, FileDiffProvider, SvnDiffProvider};
    pub use crate::error::ScmError;
    pub use crate::git::{GitRepo, TargetRepository};
    pub use crate::svn::SvnRepo;
}

// Copyright (c) 2026 - present svn2git contributors
// SPDX-License-Identifier: MIT

//! svn2git-log: Subversion log processing for svn2git
//!
//! This library crate parses the XML produced by `svn log --xml` into an
//! ordered sequence of revisions, remapping Subversion user names to git
//! identities along the way.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use svn2git_log::{AuthorMap, LogParser};
//!
//! let authors = AuthorMap::from_file("authors.txt").expect("load authors");
//! let revisions = LogParser::new()
//!     .with_authors(authors)
//!     .parse_file("svn-log.xml")
//!     .expect("parse log")
//!     .into_chronological();
//!
//! for (before, after) in revisions.pairs() {
//!     println!("r{} -> {}", before.revision, after);
//! }
//! ```

pub mod authors;
pub mod error;
pub mod parser;
pub mod revision;

pub use authors::{AuthorMap, DEFAULT_DOMAIN, default_identity};
pub use error::LogError;
pub use parser::LogParser;
pub use revision::{Revision, RevisionSequence};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::authors::AuthorMap;
    pub use crate::error::LogError;
    pub use crate::parser::LogParser;
    pub use crate::revision::{Revision, RevisionSequence};
}

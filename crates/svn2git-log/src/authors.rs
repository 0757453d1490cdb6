// Copyright (c) 2026 - present svn2git contributors
// SPDX-License-Identifier: MIT

//! Author remapping
//!
//! Subversion records a bare user name per revision while git wants a
//! `Name <email>` identity. An authors file maps one to the other:
//!
//! ```text
//! # svn user   git identity
//! jdoe         Jane Doe <jane@example.com>
//! asmith = Alan Smith <alan@example.com>
//! ```
//!
//! The first whitespace run separates the two columns. A leading `=` in the
//! second column is accepted so `git svn` style authors files work as-is.
//! Users missing from the map get an identity synthesized from the name and a
//! default mail domain.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::LogError;

/// Mail domain used for authors that are not in the map
pub const DEFAULT_DOMAIN: &str = "slct.pl";

/// Build the fallback identity `name <name@domain>`
#[must_use]
pub fn default_identity(name: &str, domain: &str) -> String {
    format!("{name} <{name}@{domain}>")
}

/// Mapping from Subversion user name to git identity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorMap {
    entries: HashMap<String, String>,
}

impl AuthorMap {
    /// Create an empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an authors file
    ///
    /// # Errors
    ///
    /// Returns `LogError::FileNotFound` if the file does not exist,
    /// `LogError::Io` if it cannot be read, and `LogError::InvalidAuthorLine`
    /// for a line without a target identity.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LogError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LogError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let map = Self::parse_str(&content)?;
        debug!(path = %path.display(), authors = map.len(), "Loaded authors file");
        Ok(map)
    }

    /// Parse the contents of an authors file
    ///
    /// # Errors
    ///
    /// Returns `LogError::InvalidAuthorLine` for a line that names a user but
    /// no identity.
    pub fn parse_str(content: &str) -> Result<Self, LogError> {
        let mut map = Self::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let invalid = || LogError::InvalidAuthorLine {
                line_number: idx + 1,
                line: raw.to_string(),
            };

            let (svn_author, rest) = line.split_once(char::is_whitespace).ok_or_else(invalid)?;
            let rest = rest.trim_start();
            let git_author = rest.strip_prefix('=').unwrap_or(rest).trim();
            if git_author.is_empty() {
                return Err(invalid());
            }

            map.insert(svn_author, git_author);
        }

        Ok(map)
    }

    /// Add or replace a mapping
    ///
    /// A replaced mapping is logged, the newer one wins.
    pub fn insert(&mut self, svn_author: impl Into<String>, git_author: impl Into<String>) {
        let svn_author = svn_author.into();
        let git_author = git_author.into();
        if let Some(previous) = self.entries.get(&svn_author) {
            if *previous != git_author {
                warn!(
                    author = %svn_author,
                    previous = %previous,
                    replacement = %git_author,
                    "Duplicate author mapping, later entry wins"
                );
            }
        }
        self.entries.insert(svn_author, git_author);
    }

    /// Look up the git identity for a Subversion user
    #[must_use]
    pub fn get(&self, svn_author: &str) -> Option<&str> {
        self.entries.get(svn_author).map(String::as_str)
    }

    /// Resolve a Subversion user to a git identity, synthesizing one on a miss
    #[must_use]
    pub fn resolve(&self, svn_author: &str, default_domain: &str) -> String {
        match self.get(svn_author) {
            Some(identity) => identity.to_string(),
            None => default_identity(svn_author, default_domain),
        }
    }

    /// Number of mappings
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AuthorMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

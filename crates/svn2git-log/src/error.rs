// Copyright (c) 2026 - present svn2git contributors
// SPDX-License-Identifier: MIT

//! Error types for svn2git-log

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a Subversion log or an authors file
#[derive(Debug, Error)]
pub enum LogError {
    /// The requested file does not exist
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// The path that was looked up
        path: PathBuf,
    },

    /// Error reading an input file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The XML could not be tokenized
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document is well-formed so far but is not a complete `svn log --xml` document
    #[error("Invalid log document: {reason}")]
    InvalidDocument {
        /// What was wrong with the document
        reason: &'static str,
    },

    /// A `logentry` element has no `revision` attribute
    #[error("Log entry without a revision attribute")]
    MissingRevision,

    /// The `revision` attribute is not an unsigned integer
    #[error("Invalid revision number: {value:?}")]
    InvalidRevision {
        /// The raw attribute value
        value: String,
    },

    /// A log entry lacks one of its required child elements
    #[error("Revision r{revision} has no <{field}> element")]
    MissingField {
        /// Revision number of the incomplete entry
        revision: u64,
        /// Name of the missing element
        field: &'static str,
    },

    /// A line of the authors file has a source name but no target identity
    #[error("Invalid authors line {line_number}: {line:?}")]
    InvalidAuthorLine {
        /// 1-based line number
        line_number: usize,
        /// The offending line
        line: String,
    },
}

impl LogError {
    /// Whether this error means an input file was missing rather than malformed
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }
}

//! Subversion revision types

use std::fmt;

/// A single revision read from the Subversion log
///
/// The author is already remapped to a git identity (`Name <email>`), and the
/// date is kept exactly as Subversion printed it so it can be handed to
/// `git commit --date` untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    /// Subversion revision number
    pub revision: u64,
    /// Git author identity
    pub author: String,
    /// Commit date, verbatim from the log
    pub date: String,
    /// Log message, may be empty
    pub message: String,
}

impl Revision {
    /// Create a revision from its parts
    #[must_use]
    pub fn new(
        revision: u64,
        author: impl Into<String>,
        date: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            revision,
            author: author.into(),
            date: date.into(),
            message: message.into(),
        }
    }

    /// Get the first line of the log message
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "r{} {} [{}] {}",
            self.revision, self.author, self.date, self.message
        )
    }
}

/// An ordered list of revisions
///
/// The order is whatever the log source produced. `svn log` without a range
/// prints newest first, so callers that replay diffs should go through
/// [`RevisionSequence::into_chronological`] first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionSequence {
    revisions: Vec<Revision>,
}

impl RevisionSequence {
    /// Create a sequence from revisions in the given order
    #[must_use]
    pub fn new(revisions: Vec<Revision>) -> Self {
        Self { revisions }
    }

    /// Number of revisions
    #[must_use]
    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    /// Whether the sequence holds no revisions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }

    /// Iterate over revisions in sequence order
    pub fn iter(&self) -> std::slice::Iter<'_, Revision> {
        self.revisions.iter()
    }

    /// Borrow the revisions as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[Revision] {
        &self.revisions
    }

    /// Iterate over consecutive `(before, after)` pairs
    ///
    /// Yields `len() - 1` pairs, or none for sequences shorter than two.
    pub fn pairs(&self) -> impl Iterator<Item = (&Revision, &Revision)> {
        self.revisions.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Whether revision numbers never decrease along the sequence
    #[must_use]
    pub fn is_chronological(&self) -> bool {
        self.revisions
            .windows(2)
            .all(|w| w[0].revision <= w[1].revision)
    }

    /// Reorder into ascending revision order
    ///
    /// The sort is stable, so entries sharing a revision number keep their
    /// relative order.
    #[must_use]
    pub fn into_chronological(mut self) -> Self {
        self.revisions.sort_by_key(|r| r.revision);
        self
    }

    /// Consume the sequence, returning the revisions
    #[must_use]
    pub fn into_inner(self) -> Vec<Revision> {
        self.revisions
    }
}

impl From<Vec<Revision>> for RevisionSequence {
    fn from(revisions: Vec<Revision>) -> Self {
        Self::new(revisions)
    }
}

impl FromIterator<Revision> for RevisionSequence {
    fn from_iter<I: IntoIterator<Item = Revision>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for RevisionSequence {
    type Item = Revision;
    type IntoIter = std::vec::IntoIter<Revision>;

    fn into_iter(self) -> Self::IntoIter {
        self.revisions.into_iter()
    }
}

impl<'a> IntoIterator for &'a RevisionSequence {
    type Item = &'a Revision;
    type IntoIter = std::slice::Iter<'a, Revision>;

    fn into_iter(self) -> Self::IntoIter {
        self.revisions.iter()
    }
}

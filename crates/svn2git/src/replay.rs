// Copyright (c) 2026 - present svn2git contributors
// SPDX-License-Identifier: MIT

//! Revision replay loop
//!
//! The replayer walks consecutive revision pairs, asks the diff provider for
//! the diff between them and commits it to the target attributed to the
//! later revision. The first revision of the sequence is only ever the "before"
//! side of a diff, so a sequence of length L produces `max(L-1, 0)` commits.
//!
//! The sequence is replayed in the order given. Callers normalize it with
//! [`RevisionSequence::into_chronological`] beforehand.

use svn2git_log::RevisionSequence;
use svn2git_scm::{DiffProvider, TargetRepository};
use tracing::{debug, info};

use crate::error::MigrateError;

/// Lifecycle of a [`Replayer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayState {
    /// Not started
    Idle,
    /// Started; stays here if a step fails
    Running,
    /// Every pair was committed
    Done,
}

/// Outcome of a successful replay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Number of commits created
    pub commits: usize,
    /// Revision number of the last commit, if any
    pub last_revision: Option<u64>,
}

/// Replays a revision sequence onto a target repository
pub struct Replayer<'a> {
    diffs: &'a dyn DiffProvider,
    target: &'a mut dyn TargetRepository,
    state: ReplayState,
}

impl<'a> Replayer<'a> {
    /// Create a replayer from its two collaborators
    pub fn new(diffs: &'a dyn DiffProvider, target: &'a mut dyn TargetRepository) -> Self {
        Self {
            diffs,
            target,
            state: ReplayState::Idle,
        }
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> ReplayState {
        self.state
    }

    /// Reset the target and replay every consecutive pair of `revisions`
    ///
    /// The target is reset even when there is nothing to replay. A failure
    /// aborts the run immediately; commits made before it stay in place.
    ///
    /// # Errors
    ///
    /// Returns `MigrateError::AlreadyRun` when called a second time, otherwise
    /// the first error from the diff provider or the target.
    pub fn run(&mut self, revisions: &RevisionSequence) -> Result<ReplaySummary, MigrateError> {
        if self.state != ReplayState::Idle {
            return Err(MigrateError::AlreadyRun);
        }
        self.state = ReplayState::Running;

        debug!(revisions = revisions.len(), "Resetting target work tree");
        self.target.reset_hard()?;

        let mut summary = ReplaySummary::default();
        for (step, (before, after)) in revisions.pairs().enumerate() {
            info!("{}) {}", step + 1, after);
            let diff = self.diffs.diff(before, after)?;
            debug!(
                from = before.revision,
                to = after.revision,
                bytes = diff.len(),
                "Applying diff"
            );
            self.target.apply_patch(after, &diff)?;

            summary.commits += 1;
            summary.last_revision = Some(after.revision);
        }

        self.state = ReplayState::Done;
        info!(commits = summary.commits, "Replay finished");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;
    use svn2git_log::Revision;
    use svn2git_scm::ScmError;

    struct EchoDiffs;

    impl DiffProvider for EchoDiffs {
        fn diff(&self, before: &Revision, after: &Revision) -> Result<Vec<u8>, ScmError> {
            Ok(format!("{}-{}", before.revision, after.revision).into_bytes())
        }
    }

    #[derive(Default)]
    struct Recorder {
        resets: usize,
        commits: Vec<(u64, String)>,
    }

    impl TargetRepository for Recorder {
        fn reset_hard(&mut self) -> Result<(), ScmError> {
            self.resets += 1;
            Ok(())
        }

        fn apply_patch(&mut self, revision: &Revision, diff: &[u8]) -> Result<(), ScmError> {
            self.commits
                .push((revision.revision, String::from_utf8_lossy(diff).into_owned()));
            Ok(())
        }
    }

    fn sequence(numbers: &[u64]) -> RevisionSequence {
        numbers
            .iter()
            .map(|&n| Revision::new(n, "a <a@b>", "d", format!("m{n}")))
            .collect()
    }

    #[test]
    fn test_state_transitions() {
        let mut target = Recorder::default();
        let mut replayer = Replayer::new(&EchoDiffs, &mut target);
        assert_eq!(replayer.state(), ReplayState::Idle);
        replayer.run(&sequence(&[1, 2])).expect("replay");
        assert_eq!(replayer.state(), ReplayState::Done);
    }

    #[test]
    fn test_commits_carry_pair_diffs() {
        let mut target = Recorder::default();
        let summary = Replayer::new(&EchoDiffs, &mut target)
            .run(&sequence(&[1, 2, 3]))
            .expect("replay");

        assert_eq!(
            summary,
            ReplaySummary {
                commits: 2,
                last_revision: Some(3),
            }
        );
        assert_eq!(target.resets, 1);
        assert_eq!(
            target.commits,
            vec![(2, "1-2".to_string()), (3, "2-3".to_string())]
        );
    }

    #[test]
    fn test_single_revision_only_resets() {
        let mut target = Recorder::default();
        let summary = Replayer::new(&EchoDiffs, &mut target)
            .run(&sequence(&[7]))
            .expect("replay");
        assert_eq!(summary, ReplaySummary::default());
        assert_eq!(target.resets, 1);
        assert!(target.commits.is_empty());
    }

    #[test]
    fn test_second_run_is_rejected() {
        let mut target = Recorder::default();
        let mut replayer = Replayer::new(&EchoDiffs, &mut target);
        replayer.run(&sequence(&[1, 2])).expect("first run");
        assert!(matches!(
            replayer.run(&sequence(&[1, 2])),
            Err(MigrateError::AlreadyRun)
        ));
    }
}

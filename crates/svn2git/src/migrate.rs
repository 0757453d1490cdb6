// Copyright (c) 2026 - present svn2git contributors
// SPDX-License-Identifier: MIT

//! Migration wiring
//!
//! Builds the replay pipeline from a [`Config`]: the git target, the author
//! table, the revision log (saved file or live `svn log`) and the diff
//! provider (exported files or live `svn diff`).
//!
//! # Example
//!
//! ```no_run
//! use clap::Parser;
//! use svn2git::config::Config;
//! use svn2git::migrate::migrate;
//!
//! let config = Config::parse_from(["svn2git", "--svn", "wc", "--git", "repo"]);
//! let summary = migrate(&config).expect("migration");
//! println!("Created {} commits", summary.commits);
//! ```

use std::fs;

use svn2git_log::{AuthorMap, LogParser, RevisionSequence};
use svn2git_scm::{DiffProvider, FileDiffProvider, GitRepo, SvnDiffProvider, SvnRepo};
use tracing::{debug, info, warn};

use crate::config::{Config, ConfigError};
use crate::error::MigrateError;
use crate::replay::{ReplaySummary, Replayer};

/// Run a complete migration
///
/// # Errors
///
/// Returns the first `MigrateError` raised by validation, loading or replay.
/// Commits created before a replay failure are kept.
pub fn migrate(config: &Config) -> Result<ReplaySummary, MigrateError> {
    debug!(?config, "Starting migration");
    config.validate()?;

    let mut git = GitRepo::open(config.git_path())?;

    let parser = LogParser::new()
        .with_authors(load_authors(config)?)
        .with_default_domain(config.default_domain());
    let revisions = normalize(load_revisions(config, &parser)?);
    info!(revisions = revisions.len(), "Loaded svn log");

    let diffs = diff_provider(config)?;

    Replayer::new(&*diffs, &mut git).run(&revisions)
}

/// Load the authors file, or an empty table when none is configured
///
/// # Errors
///
/// Returns `MigrateError::Log` if the file is missing or malformed.
pub fn load_authors(config: &Config) -> Result<AuthorMap, MigrateError> {
    match config.authors {
        Some(ref path) => Ok(AuthorMap::from_file(path)?),
        None => Ok(AuthorMap::new()),
    }
}

/// Load the revision log from the --log file or from `svn log`
///
/// With --save-log, the XML printed by `svn log` is written out before it is
/// parsed, so even a log that fails to parse can be inspected.
///
/// # Errors
///
/// Returns `MigrateError` if the log cannot be obtained, saved or parsed.
pub fn load_revisions(
    config: &Config,
    parser: &LogParser,
) -> Result<RevisionSequence, MigrateError> {
    if let Some(ref log) = config.log {
        if config.range_ignored() {
            warn!("--from/--to are ignored because --log was given");
        }
        if config.save_log.is_some() {
            warn!("--save-log is ignored because --log was given");
        }
        info!(path = %log.display(), "Reading svn log file");
        return Ok(parser.parse_file(log)?);
    }

    let svn = open_svn(config)?;
    let xml = svn.log_xml(config.from.as_deref(), config.to.as_deref())?;

    if let Some(ref path) = config.save_log {
        fs::write(path, &xml).map_err(|e| ConfigError::SaveLogFailed(path.clone(), e))?;
        info!(path = %path.display(), "Saved svn log");
    }

    Ok(parser.parse_str(&xml)?)
}

/// Put the sequence into ascending revision order
///
/// `svn log` prints newest first unless given an ascending range, and
/// replaying that order would apply every diff backwards.
#[must_use]
pub fn normalize(revisions: RevisionSequence) -> RevisionSequence {
    if revisions.is_chronological() {
        revisions
    } else {
        warn!("svn log is not in ascending revision order, reordering before replay");
        revisions.into_chronological()
    }
}

/// Choose exported diff files when --patches is given, `svn diff` otherwise
///
/// # Errors
///
/// Returns `MigrateError::Scm` if the chosen source is unusable.
pub fn diff_provider(config: &Config) -> Result<Box<dyn DiffProvider>, MigrateError> {
    match config.patches {
        Some(ref dir) => {
            debug!(dir = %dir.display(), pattern = config.patch_pattern(), "Using exported diffs");
            Ok(Box::new(FileDiffProvider::new(dir, config.patch_pattern())?))
        }
        None => {
            debug!("Using svn diff");
            Ok(Box::new(SvnDiffProvider::new(open_svn(config)?)))
        }
    }
}

fn open_svn(config: &Config) -> Result<SvnRepo, MigrateError> {
    Ok(SvnRepo::open(config.svn_path())?)
}

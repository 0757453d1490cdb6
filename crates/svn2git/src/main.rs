//! svn2git: replay Subversion revisions as git commits
//!
//! This binary parses the command line, sets up logging and runs the
//! migration. It is the only place errors are caught: a failure is logged
//! and mapped to a non-zero exit code.

use std::process::ExitCode;

use clap::Parser;
use svn2git::config::Config;
use svn2git::migrate::migrate;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(config.log_level().into()))
        .with_writer(std::io::stderr)
        .init();

    match migrate(&config) {
        Ok(summary) => {
            match summary.last_revision {
                Some(rev) => info!(commits = summary.commits, "Migrated up to r{rev}"),
                None => info!("Nothing to migrate"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(kind = %e.kind(), "{e}");
            e.exit_code()
        }
    }
}

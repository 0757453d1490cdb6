//! svn2git library
//!
//! This module exports the migration pipeline for use by the binary and by
//! integration tests: configuration, the error taxonomy, the replay loop and
//! the wiring that connects them to the Subversion and git drivers.

pub mod config;
pub mod error;
pub mod migrate;
pub mod replay;

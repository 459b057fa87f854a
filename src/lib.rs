//! sweepdir - organize directory contents into category subfolders
//!
//! This library classifies files by extension against an ordered category
//! table, relocates them into matching subfolders with collision-safe
//! naming, and records every move attempt to a durable operation log.
//! Flat and recursive traversal are supported, as is a dry-run mode that
//! simulates a run without touching the filesystem.

pub mod category;
pub mod cli;
pub mod config;
pub mod logger;
pub mod organizer;
pub mod output;
pub mod traverse;

pub use category::{CategoryTable, OTHERS_CATEGORY};
pub use config::{ConfigError, load_categories};
pub use organizer::{
    FileOrganizer, OperationLogEntry, OrganizeError, OrganizeResult, RunConfig, Stats,
};
pub use traverse::FileRecord;

pub use cli::{Cli, run_cli};

//! Command-line interface module for sweepdir.
//!
//! A thin collaborator over the organizer core: parses arguments, loads
//! the category configuration, runs one organization pass, and prints the
//! returned statistics. A run that had per-file failures still completes
//! and reports them; the process exit code is non-zero in that case so
//! scripts can react.

use crate::config;
use crate::organizer::{FileOrganizer, RunConfig};
use crate::output::OutputFormatter;
use clap::Parser;
use std::path::PathBuf;

/// Organize files in a directory into category subfolders.
#[derive(Debug, Parser)]
#[command(name = "sweepdir", version, about)]
pub struct Cli {
    /// Target directory to organize.
    pub directory: PathBuf,

    /// Organize files recursively in all subdirectories. Re-running
    /// re-scans category folders and may rename already-placed files with
    /// a numeric suffix.
    #[arg(short, long)]
    pub recursive: bool,

    /// Preview what would be done without moving any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Path to a custom JSON configuration file with category mappings.
    #[arg(long, value_name = "FILE")]
    pub custom_config: Option<PathBuf>,

    /// Display the active file categories and exit.
    #[arg(long)]
    pub show_categories: bool,

    /// Custom path for the log file.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// Runs the CLI and returns the process exit code.
///
/// Exit code 0 on success, 1 on a fatal error or when any file failed to
/// organize.
pub fn run_cli(cli: Cli) -> i32 {
    let categories = match config::load_categories(cli.custom_config.as_deref()) {
        Ok(table) => table,
        Err(e) => {
            OutputFormatter::error(&format!("{}", e));
            return 1;
        }
    };
    if let Some(path) = &cli.custom_config {
        OutputFormatter::info(&format!(
            "Loaded custom configuration from: {}",
            path.display()
        ));
    }

    if cli.show_categories {
        show_categories(&categories);
        return 0;
    }

    OutputFormatter::header("Using categories:");
    for entry in categories.iter() {
        OutputFormatter::plain(&format!("  • {}", entry.name));
    }

    if cli.dry_run {
        OutputFormatter::dry_run_notice("Files will not be moved. Preview results:");
    }

    let run_config = RunConfig {
        target_directory: cli.directory,
        categories,
        log_file: cli.log_file,
        dry_run: cli.dry_run,
        recursive: cli.recursive,
    };

    let mut organizer = match FileOrganizer::new(run_config) {
        Ok(organizer) => organizer,
        Err(e) => {
            OutputFormatter::error(&format!("{}", e));
            return 1;
        }
    };

    let spinner = OutputFormatter::create_spinner("Organizing files...");
    let result = organizer.run();
    spinner.finish_and_clear();

    let stats = match result {
        Ok(stats) => stats,
        Err(e) => {
            OutputFormatter::error(&format!("Error during organization: {}", e));
            return 1;
        }
    };

    OutputFormatter::summary(&stats);

    if !cli.dry_run {
        match organizer.category_summary() {
            Ok(summary) => OutputFormatter::category_table(&summary),
            Err(e) => OutputFormatter::warning(&format!("Could not read category summary: {}", e)),
        }
    }

    OutputFormatter::plain(&format!("\nLog file: {}", organizer.log_path().display()));

    if stats.failed_files > 0 {
        OutputFormatter::warning("Some files could not be organized. See the log for details.");
        1
    } else {
        OutputFormatter::success("Done.");
        0
    }
}

/// Displays the active category table.
fn show_categories(categories: &crate::category::CategoryTable) {
    OutputFormatter::header("File Categories:");
    for entry in categories.iter() {
        let extensions = entry.extensions.join(", ");
        OutputFormatter::plain(&format!("{:<15} | {}", entry.name, extensions));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from([
            "sweepdir",
            "/tmp/target",
            "--recursive",
            "--dry-run",
            "--log-file",
            "/tmp/custom.log",
        ]);

        assert_eq!(cli.directory, PathBuf::from("/tmp/target"));
        assert!(cli.recursive);
        assert!(cli.dry_run);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/custom.log")));
        assert!(cli.custom_config.is_none());
        assert!(!cli.show_categories);
    }

    #[test]
    fn test_cli_short_recursive_flag() {
        let cli = Cli::parse_from(["sweepdir", "/tmp/target", "-r"]);
        assert!(cli.recursive);
    }

    #[test]
    fn test_cli_requires_directory() {
        let result = Cli::try_parse_from(["sweepdir"]);
        assert!(result.is_err());
    }
}

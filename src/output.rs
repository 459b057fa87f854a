//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output: colored status
//! lines, the run-summary block, the post-run category table, and the
//! progress spinner. Keeping formatting here means the rest of the crate
//! never touches styling directly.

use crate::organizer::Stats;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::time::Duration;

/// Manages all CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates a spinner shown while a run is in progress.
    pub fn create_spinner(message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid spinner template"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Prints the run-summary block for a finished run.
    pub fn summary(stats: &Stats) {
        Self::header("ORGANIZATION SUMMARY");

        println!("Total files processed:    {}", stats.total_files);
        println!(
            "Files organized:          {}",
            stats.organized_files.to_string().green()
        );
        println!("Files skipped:            {}", stats.skipped_files);

        let failed = if stats.failed_files > 0 {
            stats.failed_files.to_string().red().to_string()
        } else {
            stats.failed_files.to_string()
        };
        println!("Failed operations:        {}", failed);
        println!("Categories created:       {}", stats.categories_created);

        if let Some(dirs) = stats.directories_processed {
            println!("Directories processed:    {}", dirs);
        }
    }

    /// Prints the per-category file counts after a run.
    pub fn category_table(summary: &BTreeMap<String, usize>) {
        if summary.is_empty() {
            return;
        }

        Self::header("Category Summary");

        let max_name_len = summary
            .keys()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max(8);

        for (category, count) in summary {
            let file_word = if *count == 1 { "file" } else { "files" };
            println!(
                "{:<width$} : {} {}",
                category,
                count.to_string().green(),
                file_word,
                width = max_name_len
            );
        }
    }
}

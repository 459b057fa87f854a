/// File organization engine.
///
/// This module holds the run coordinator and its collaborators: destination
/// resolution (category folder creation and collision-safe naming), move
/// execution, per-run statistics, and the operation log that is persisted
/// at the end of every non-dry run.
///
/// Per-file problems (a folder that cannot be created, a move that is
/// denied, a source that vanished) are outcome values aggregated into
/// [`Stats`] and the operation log; they never abort a run. Only errors
/// that are not tied to a single file, such as the target directory
/// becoming unreadable, surface as [`OrganizeError`].
use crate::category::CategoryTable;
use crate::logger::RunLogger;
use crate::traverse::{self, FileRecord};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default name of the durable line-oriented run log.
pub const RUNTIME_LOG_FILE: &str = "file_organizer.log";

/// Name of the persisted structured operation log.
pub const OPERATION_LOG_FILE: &str = "organization_log.json";

/// Outcome status of one move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    Success,
    Failed,
}

/// Immutable record of one move attempt.
///
/// Appended by the run coordinator, never mutated afterwards, and written
/// verbatim to the persisted operation log at the end of a non-dry run.
#[derive(Debug, Clone, Serialize)]
pub struct OperationLogEntry {
    /// RFC 3339 timestamp of the attempt.
    pub timestamp: String,
    /// The action kind; only "move" exists.
    pub action: String,
    /// Source path of the file.
    pub source: String,
    /// Resolved destination path.
    pub destination: String,
    /// Whether the move succeeded.
    pub status: OperationStatus,
    /// Error message, present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OperationLogEntry {
    fn new(
        source: &Path,
        destination: &Path,
        status: OperationStatus,
        error: Option<String>,
    ) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            action: "move".to_string(),
            source: source.to_string_lossy().to_string(),
            destination: destination.to_string_lossy().to_string(),
            status,
            error,
        }
    }

    /// Builds a success entry for a completed move.
    pub fn success(source: &Path, destination: &Path) -> Self {
        Self::new(source, destination, OperationStatus::Success, None)
    }

    /// Builds a failure entry carrying the error message.
    pub fn failure(source: &Path, destination: &Path, error: &str) -> Self {
        Self::new(
            source,
            destination,
            OperationStatus::Failed,
            Some(error.to_string()),
        )
    }
}

/// The in-memory, append-only sequence of move attempts for one run.
#[derive(Debug, Default)]
pub struct OperationLog {
    entries: Vec<OperationLogEntry>,
}

impl OperationLog {
    /// Appends an entry. Entries are never mutated after this.
    pub fn append(&mut self, entry: OperationLogEntry) {
        self.entries.push(entry);
    }

    /// The recorded entries, in append order.
    pub fn entries(&self) -> &[OperationLogEntry] {
        &self.entries
    }

    /// Writes the log as a pretty JSON array, overwriting any prior log.
    pub fn save(&self, path: &Path) -> OrganizeResult<()> {
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| OrganizeError::OperationLogWriteFailed {
                source: io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("JSON serialization failed: {}", e),
                ),
            })?;

        fs::write(path, json).map_err(|e| OrganizeError::OperationLogWriteFailed { source: e })
    }
}

/// Mutable counters for one run, returned as the run's result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    /// Files seen by traversal, including skipped log artifacts.
    pub total_files: usize,
    /// Files successfully relocated (or simulated in dry-run).
    pub organized_files: usize,
    /// Log-artifact entries excluded from processing.
    pub skipped_files: usize,
    /// Files whose folder creation or move failed.
    pub failed_files: usize,
    /// Category folders newly created during this run.
    pub categories_created: usize,
    /// Directories visited below the target root; `None` for flat runs.
    pub directories_processed: Option<usize>,
}

/// Errors that are fatal to a run.
#[derive(Debug)]
pub enum OrganizeError {
    /// The target path does not exist or is not a directory.
    InvalidTargetDirectory { path: PathBuf },
    /// The durable run log could not be opened.
    LoggerInitFailed { path: PathBuf, source: io::Error },
    /// Traversal of the target directory failed.
    TraversalFailed { path: PathBuf, source: io::Error },
    /// The persisted operation log could not be written.
    OperationLogWriteFailed { source: io::Error },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTargetDirectory { path } => {
                write!(
                    f,
                    "Target path does not exist or is not a directory: {}",
                    path.display()
                )
            }
            Self::LoggerInitFailed { path, source } => {
                write!(f, "Failed to open log file {}: {}", path.display(), source)
            }
            Self::TraversalFailed { path, source } => {
                write!(f, "Failed to traverse {}: {}", path.display(), source)
            }
            Self::OperationLogWriteFailed { source } => {
                write!(f, "Failed to write operation log: {}", source)
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Outcome of one move attempt, aggregated by the coordinator.
#[derive(Debug)]
pub enum MoveOutcome {
    /// The file now lives at `destination`.
    Moved { destination: PathBuf },
    /// The move failed; the file is untouched (or gone, if the source
    /// vanished between enumeration and execution).
    Failed {
        destination: PathBuf,
        message: String,
    },
}

/// Configuration for one run. Immutable for the run's duration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// The directory to organize. Must exist and be a directory.
    pub target_directory: PathBuf,
    /// The category table used for resolution.
    pub categories: CategoryTable,
    /// Path of the durable run log; defaults to
    /// `<target>/file_organizer.log`.
    pub log_file: Option<PathBuf>,
    /// Simulate without mutating the filesystem.
    pub dry_run: bool,
    /// Descend into subdirectories.
    pub recursive: bool,
}

impl RunConfig {
    /// Configuration with the default table, default log path, and a real
    /// flat run.
    pub fn new(target_directory: impl Into<PathBuf>) -> Self {
        Self {
            target_directory: target_directory.into(),
            categories: CategoryTable::default(),
            log_file: None,
            dry_run: false,
            recursive: false,
        }
    }
}

/// Organizes the files of one target directory into category subfolders.
///
/// One instance owns the run's logger and operation log and assumes
/// exclusive access to the target directory for the run's duration.
/// Construction validates the target once; `organize` and
/// `organize_recursive` each perform one complete run.
///
/// # Examples
///
/// ```no_run
/// use sweepdir::organizer::{FileOrganizer, RunConfig};
///
/// let config = RunConfig::new("/path/to/downloads");
/// let mut organizer = FileOrganizer::new(config)?;
/// let stats = organizer.organize(false)?;
/// println!("{} files organized", stats.organized_files);
/// # Ok::<(), sweepdir::organizer::OrganizeError>(())
/// ```
pub struct FileOrganizer {
    target_directory: PathBuf,
    categories: CategoryTable,
    logger: RunLogger,
    operation_log: OperationLog,
    dry_run: bool,
    recursive: bool,
}

impl FileOrganizer {
    /// Creates an organizer, validating the target directory and opening
    /// the durable run log.
    ///
    /// # Errors
    ///
    /// `InvalidTargetDirectory` if the target does not exist or is not a
    /// directory; `LoggerInitFailed` if the log file cannot be opened.
    /// Both are fatal before any traversal begins.
    pub fn new(config: RunConfig) -> OrganizeResult<Self> {
        if !config.target_directory.is_dir() {
            return Err(OrganizeError::InvalidTargetDirectory {
                path: config.target_directory,
            });
        }

        let log_path = config
            .log_file
            .unwrap_or_else(|| config.target_directory.join(RUNTIME_LOG_FILE));
        let logger = RunLogger::open(&log_path).map_err(|e| OrganizeError::LoggerInitFailed {
            path: log_path.clone(),
            source: e,
        })?;

        Ok(Self {
            target_directory: config.target_directory,
            categories: config.categories,
            logger,
            operation_log: OperationLog::default(),
            dry_run: config.dry_run,
            recursive: config.recursive,
        })
    }

    /// Runs one organization pass according to the `RunConfig` flags.
    pub fn run(&mut self) -> OrganizeResult<Stats> {
        if self.recursive {
            self.organize_recursive(self.dry_run)
        } else {
            self.organize(self.dry_run)
        }
    }

    /// Organizes the direct-child files of the target directory.
    ///
    /// Enumerates candidates, resolves each file's category, ensures the
    /// category folder exists, and moves the file to a collision-free
    /// destination. In dry-run mode nothing on disk changes and the
    /// operation log is not persisted.
    pub fn organize(&mut self, dry_run: bool) -> OrganizeResult<Stats> {
        let mut stats = Stats::default();

        self.logger.info(&format!(
            "Starting file organization in: {}",
            self.target_directory.display()
        ));
        if dry_run {
            self.logger.info("DRY RUN MODE - No files will be moved");
        }

        self.check_target()?;

        let outcome = traverse::collect_flat(&self.target_directory, &self.artifact_names())
            .map_err(|e| OrganizeError::TraversalFailed {
                path: self.target_directory.clone(),
                source: e,
            })?;

        stats.total_files = outcome.files.len() + outcome.skipped;
        stats.skipped_files = outcome.skipped;
        self.logger
            .info(&format!("Found {} files to process", stats.total_files));

        self.process_files(&outcome.files, dry_run, &mut stats);

        self.logger.info(&format!(
            "Organization complete: {} files organized, {} failed, {} skipped",
            stats.organized_files, stats.failed_files, stats.skipped_files
        ));

        if !dry_run {
            self.persist_operation_log();
        }

        Ok(stats)
    }

    /// Organizes files in the target directory and all directories below
    /// it.
    ///
    /// Every directory is visited exactly once and counted toward
    /// `directories_processed` (the root is not counted). Files already
    /// inside category folders are re-scanned like any others, so re-runs
    /// re-route misfiled entries; a file that already sits at its own
    /// destination collides with itself and is renamed with a numeric
    /// suffix.
    pub fn organize_recursive(&mut self, dry_run: bool) -> OrganizeResult<Stats> {
        let mut stats = Stats::default();

        self.logger.info(&format!(
            "Starting recursive file organization in: {}",
            self.target_directory.display()
        ));
        if dry_run {
            self.logger.info("DRY RUN MODE - No files will be moved");
        }

        self.check_target()?;

        let outcome = traverse::collect_recursive(&self.target_directory, &self.artifact_names())
            .map_err(|e| OrganizeError::TraversalFailed {
                path: self.target_directory.clone(),
                source: e,
            })?;

        stats.total_files = outcome.files.len() + outcome.skipped;
        stats.skipped_files = outcome.skipped;
        stats.directories_processed = Some(outcome.directories);
        self.logger.debug(&format!(
            "Processed {} directories below the target",
            outcome.directories
        ));
        self.logger
            .info(&format!("Found {} files to process", stats.total_files));

        self.process_files(&outcome.files, dry_run, &mut stats);

        self.logger.info(&format!(
            "Recursive organization complete: {} files organized",
            stats.organized_files
        ));

        if !dry_run {
            self.persist_operation_log();
        }

        Ok(stats)
    }

    /// Counts plain files directly inside each known category subfolder.
    ///
    /// A point-in-time snapshot of the target's immediate subdirectories
    /// whose names match a category (including the `Others` sentinel);
    /// meaningful after organization, not a historical record.
    pub fn category_summary(&self) -> io::Result<BTreeMap<String, usize>> {
        let mut summary = BTreeMap::new();

        for entry in fs::read_dir(&self.target_directory)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if !self.categories.is_known_category(&name) {
                continue;
            }
            let count = fs::read_dir(entry.path())?
                .filter_map(Result::ok)
                .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
                .count();
            summary.insert(name, count);
        }

        Ok(summary)
    }

    /// The move attempts recorded so far in this run.
    pub fn operation_log(&self) -> &OperationLog {
        &self.operation_log
    }

    /// Path of the durable run log.
    pub fn log_path(&self) -> &Path {
        self.logger.path()
    }

    /// Computes a destination under `folder` that does not exist yet.
    ///
    /// Starts with `folder/file_name`; on collision appends `_1`, `_2`, …
    /// to the stem until a free name is found. Each candidate name is
    /// distinct, so the loop always terminates. Callers must invoke this
    /// at execution time, not ahead of it, so that files moved earlier in
    /// the same run are accounted for.
    pub fn unique_destination(folder: &Path, file_name: &str) -> PathBuf {
        let candidate = folder.join(file_name);
        if !candidate.exists() {
            return candidate;
        }

        let name = Path::new(file_name);
        let stem = name
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| file_name.to_string());
        let suffix = name
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        let mut counter = 1usize;
        loop {
            let candidate = folder.join(format!("{}_{}{}", stem, counter, suffix));
            if !candidate.exists() {
                return candidate;
            }
            counter += 1;
        }
    }

    /// Defensive re-check; construction already validated the target.
    fn check_target(&self) -> OrganizeResult<()> {
        if self.target_directory.is_dir() {
            Ok(())
        } else {
            Err(OrganizeError::InvalidTargetDirectory {
                path: self.target_directory.clone(),
            })
        }
    }

    /// Filenames traversal must exclude at every level.
    fn artifact_names(&self) -> Vec<String> {
        let mut names = vec![OPERATION_LOG_FILE.to_string()];
        if let Some(log_name) = self.logger.path().file_name() {
            names.push(log_name.to_string_lossy().to_string());
        }
        names
    }

    /// The per-file pipeline shared by both traversal modes.
    fn process_files(&mut self, files: &[FileRecord], dry_run: bool, stats: &mut Stats) {
        let mut ensured: HashSet<String> = HashSet::new();

        for record in files {
            let category = self.categories.resolve(&record.extension).to_string();

            if dry_run {
                // The destination shown is illustrative; no real unique
                // path is computed in dry-run.
                self.logger.info(&format!(
                    "[DRY RUN] Would move: {} -> {}/",
                    record.file_name, category
                ));
                stats.organized_files += 1;
                continue;
            }

            if !ensured.contains(&category) {
                match self.ensure_category_folder(&category) {
                    Ok((_, newly_created)) => {
                        ensured.insert(category.clone());
                        if newly_created {
                            stats.categories_created += 1;
                            self.logger
                                .info(&format!("Created category folder: {}", category));
                        }
                    }
                    Err(e) => {
                        self.logger.error(&format!(
                            "Failed to create category folder {}: {}",
                            category, e
                        ));
                        stats.failed_files += 1;
                        continue;
                    }
                }
            }

            let folder = self.target_directory.join(&category);
            match self.execute_move(record, &folder) {
                MoveOutcome::Moved { destination } => {
                    stats.organized_files += 1;
                    self.operation_log
                        .append(OperationLogEntry::success(&record.path, &destination));
                }
                MoveOutcome::Failed {
                    destination,
                    message,
                } => {
                    stats.failed_files += 1;
                    self.operation_log.append(OperationLogEntry::failure(
                        &record.path,
                        &destination,
                        &message,
                    ));
                }
            }
        }
    }

    /// Creates the category subfolder if absent. Idempotent; the boolean
    /// reports whether this call created it.
    fn ensure_category_folder(&mut self, category: &str) -> io::Result<(PathBuf, bool)> {
        let path = self.target_directory.join(category);
        if path.is_dir() {
            return Ok((path, false));
        }
        fs::create_dir_all(&path)?;
        Ok((path, true))
    }

    /// Moves one file into `folder` at a collision-free destination.
    ///
    /// The destination is recomputed here, at execution time. Failure is
    /// reported as an outcome, never an error: one failed file must not
    /// end the run.
    fn execute_move(&mut self, record: &FileRecord, folder: &Path) -> MoveOutcome {
        let destination = Self::unique_destination(folder, &record.file_name);
        let folder_name = folder
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        match Self::relocate(&record.path, &destination) {
            Ok(()) => {
                self.logger
                    .info(&format!("Moved: {} -> {}/", record.file_name, folder_name));
                MoveOutcome::Moved { destination }
            }
            Err(e) => {
                self.logger
                    .error(&format!("Failed to move {}: {}", record.file_name, e));
                MoveOutcome::Failed {
                    destination,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Renames within a volume, falling back to copy+delete across
    /// volumes.
    fn relocate(source: &Path, destination: &Path) -> io::Result<()> {
        match fs::rename(source, destination) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                fs::copy(source, destination)?;
                fs::remove_file(source)
            }
            Err(e) => Err(e),
        }
    }

    /// Writes the operation log under the target directory. A write
    /// failure is recorded in the run log but does not fail the run.
    fn persist_operation_log(&mut self) {
        let path = self.target_directory.join(OPERATION_LOG_FILE);
        match self.operation_log.save(&path) {
            Ok(()) => self
                .logger
                .info(&format!("Operation log saved to: {}", path.display())),
            Err(e) => self
                .logger
                .error(&format!("Failed to save operation log: {}", e)),
        }
    }
}

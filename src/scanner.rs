/*!
 * Directory scanning: collects the files a snapshot can be built from
 */

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use indicatif::ProgressBar;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::filter::PathFilter;
use crate::types::{Entry, EntryKind, FileList};

/// An entry the scanner could not look at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Offending path, when the underlying error names one
    pub path: Option<PathBuf>,
    /// Human-readable cause
    pub reason: String,
}

impl fmt::Display for SkippedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {}", path.display(), self.reason),
            None => f.write_str(&self.reason),
        }
    }
}

/// Result of one traversal
#[derive(Debug, Clone, Default)]
pub struct WalkReport {
    /// Included files, in discovery order
    pub files: FileList,
    /// Number of directories descended into below the root
    pub directories: usize,
    /// Entries and subtrees that were skipped because they could not be read
    pub skipped: Vec<SkippedEntry>,
}

/// Scanner for directory contents
pub struct Scanner {
    /// Name-based filter
    filter: PathFilter,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
    /// Name of the generated artifact, skipped directly under the root
    output_name: Option<String>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(filter: PathFilter, progress: Arc<ProgressBar>) -> Self {
        Self {
            filter,
            progress,
            output_name: None,
        }
    }

    /// Skip `<root>/<name>`, so a previous snapshot never snapshots itself
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// Create a scanner with the default filter and no visible progress
    pub fn hidden() -> Self {
        Self::new(PathFilter::new(), Arc::new(ProgressBar::hidden()))
    }

    /// Walk `root` and collect every included file
    ///
    /// Entries that cannot be stat'ed and directories that cannot be listed
    /// are recorded in [`WalkReport::skipped`] and the walk goes on. If the
    /// root itself cannot be listed the report simply has no files.
    pub fn walk(&self, root: &Path) -> WalkReport {
        let mut report = WalkReport::default();
        let filter = self.filter;
        let output_file = self.output_name.as_ref().map(|name| root.join(name));
        self.progress.reset();
        self.progress.set_prefix("Scanning");
        // Ticks only while walking; prompts own the terminal the rest of the time
        self.progress.enable_steady_tick(Duration::from_millis(100));

        // Directory listing order, no sorting: discovery order is kept as is
        let walker = WalkDir::new(root)
            .follow_links(true)
            .min_depth(1)
            .into_iter()
            .filter_entry(move |e| {
                !e.file_type().is_dir() || filter.should_descend(&e.file_name().to_string_lossy())
            });

        for result in walker {
            let dir_entry = match result {
                Ok(dir_entry) => dir_entry,
                Err(e) => {
                    let skipped = SkippedEntry {
                        path: e.path().map(Path::to_path_buf),
                        reason: e
                            .io_error()
                            .map(|io| io.to_string())
                            .unwrap_or_else(|| e.to_string()),
                    };
                    warn!("Skipping unreadable entry {}", skipped);
                    report.skipped.push(skipped);
                    continue;
                }
            };

            match Self::classify(&dir_entry) {
                Some(Entry {
                    kind: EntryKind::Directory,
                    ..
                }) => report.directories += 1,
                Some(Entry {
                    kind: EntryKind::File,
                    path,
                }) => {
                    if !self
                        .filter
                        .should_include(&dir_entry.file_name().to_string_lossy())
                        || output_file.as_ref() == Some(&path)
                    {
                        continue;
                    }

                    self.progress.inc(1);
                    self.progress
                        .set_message(format!("Found: {}", dir_entry.file_name().to_string_lossy()));
                    report.files.push(path);
                }
                None => debug!("Ignoring special file {}", dir_entry.path().display()),
            }
        }

        self.progress.finish_and_clear();
        debug!(
            "Scanned {}: {} files, {} directories, {} skipped",
            root.display(),
            report.files.len(),
            report.directories,
            report.skipped.len()
        );

        report
    }

    /// Walk `root` and return only the file list
    pub fn walk_files(&self, root: &Path) -> FileList {
        self.walk(root).files
    }

    /// Map a walk entry to a file or directory; anything else is ignored
    fn classify(dir_entry: &DirEntry) -> Option<Entry> {
        let file_type = dir_entry.file_type();
        let kind = if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            return None;
        };

        Some(Entry {
            path: dir_entry.path().to_path_buf(),
            kind,
        })
    }
}

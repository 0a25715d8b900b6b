/*!
 * Persistence of the last selection and its validation against the disk
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;
use crate::types::{FileList, SelectionRecord};

/// Outcome of checking a stored selection against the filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Nothing was stored
    Empty,
    /// Root is gone or is no longer a directory
    StaleRoot {
        /// Root as stored
        stale: PathBuf,
        /// Nearest existing ancestor, or the working directory; only a suggestion
        fallback: PathBuf,
    },
    /// Root is fine but none of the stored files exist anymore
    NoFiles { root: PathBuf },
    /// Root exists and at least one stored file still does
    Usable {
        root: PathBuf,
        /// Surviving files, in stored order
        files: FileList,
        /// Stored files that no longer exist
        dropped: FileList,
    },
}

impl Reconciliation {
    /// Whether the stored selection can be offered for reuse
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Usable { .. })
    }

    /// Root to reuse, or the stored root when a re-selection can start there
    pub fn root(&self) -> Option<&Path> {
        match self {
            Self::Usable { root, .. } | Self::NoFiles { root } => Some(root),
            Self::StaleRoot { .. } | Self::Empty => None,
        }
    }

    /// Surviving files; empty unless usable
    pub fn files(&self) -> &[PathBuf] {
        match self {
            Self::Usable { files, .. } => files,
            _ => &[],
        }
    }

    /// Suggested starting directory when the stored root is stale
    pub fn fallback_root(&self) -> Option<&Path> {
        match self {
            Self::StaleRoot { fallback, .. } => Some(fallback),
            _ => None,
        }
    }
}

/// JSON-backed store for the last selection
#[derive(Debug, Clone)]
pub struct SelectionStore {
    path: PathBuf,
}

impl SelectionStore {
    /// Create a store backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored record
    ///
    /// A missing, unreadable or corrupt file yields an empty record.
    pub fn load(&self) -> SelectionRecord {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No stored selection at {}", self.path.display());
                return SelectionRecord::default();
            }
            Err(e) => {
                warn!("Failed to read {}: {}", self.path.display(), e);
                return SelectionRecord::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!("Ignoring corrupt selection file {}: {}", self.path.display(), e);
                SelectionRecord::default()
            }
        }
    }

    /// Overwrite the stored record
    pub fn save(&self, record: &SelectionRecord) -> Result<()> {
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, json)?;
        debug!(
            "Saved selection of {} files to {}",
            record.files.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Check a stored record against the filesystem
    ///
    /// `cwd` is the last-resort fallback when no ancestor of a stale root
    /// exists. The record itself is not modified.
    pub fn reconcile(record: &SelectionRecord, cwd: &Path) -> Reconciliation {
        let Some(stored_root) = record.root.as_deref() else {
            return Reconciliation::Empty;
        };

        let root = if stored_root.is_absolute() {
            stored_root.to_path_buf()
        } else {
            cwd.join(stored_root)
        };

        if !root.is_dir() {
            let fallback = fallback_root(&root, cwd);
            debug!(
                "Stored root {} is stale, suggesting {}",
                root.display(),
                fallback.display()
            );
            return Reconciliation::StaleRoot {
                stale: root,
                fallback,
            };
        }

        // Relative entries only come from hand-edited records; they hang off the root
        let (files, dropped): (FileList, FileList) = record
            .files
            .iter()
            .map(|file| if file.is_absolute() { file.clone() } else { root.join(file) })
            .partition(|file| file.exists());

        if files.is_empty() {
            return Reconciliation::NoFiles { root };
        }

        Reconciliation::Usable {
            root,
            files,
            dropped,
        }
    }
}

/// Nearest ancestor of `stale` that is an existing directory
///
/// The filesystem root itself does not count; when only it is left the
/// working directory is returned instead.
pub fn fallback_root(stale: &Path, cwd: &Path) -> PathBuf {
    stale
        .ancestors()
        .skip(1)
        .filter(|dir| dir.parent().is_some() && !dir.as_os_str().is_empty())
        .find(|dir| dir.is_dir())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.to_path_buf())
}

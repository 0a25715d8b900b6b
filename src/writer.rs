/*!
 * Snapshot assembly and output for project-prompt
 */

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::warn;

use crate::error::{PromptError, Result};
use crate::messages::Messages;
use crate::report::FileReportInfo;
use crate::utils::relative_display;

/// Fixed texts embedded in a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotLabels {
    /// Heading above the tree
    pub structure: String,
    /// Heading above the file blocks
    pub selected_files: String,
    /// Annotation on the delimiter of a missing file
    pub not_found: String,
    /// Body substituted for a file that could not be read
    pub read_error: String,
}

impl SnapshotLabels {
    /// Labels in the language of `messages`
    pub fn localized(messages: &Messages) -> Self {
        Self {
            structure: messages.text("projectStructureLabel").into_owned(),
            selected_files: messages.text("selectedFilesContent").into_owned(),
            not_found: messages.text("fileNotFound").into_owned(),
            read_error: messages.text("fileReadError").into_owned(),
        }
    }
}

impl Default for SnapshotLabels {
    fn default() -> Self {
        Self::localized(&Messages::default())
    }
}

/// A file that could not be included as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileFailure {
    /// Gone by the time the snapshot was assembled
    NotFound { path: PathBuf },
    /// Exists but reading it failed
    Unreadable { path: PathBuf, reason: String },
}

impl FileFailure {
    /// Path of the failed file
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path } | Self::Unreadable { path, .. } => path,
        }
    }
}

/// Assembled snapshot text plus what happened to each file
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Full artifact text
    pub text: String,
    /// Per-file statistics for included files, keyed by relative path, in order
    pub included: Vec<(String, FileReportInfo)>,
    /// Files that were missing or unreadable
    pub failures: Vec<FileFailure>,
}

/// Builds snapshot text and writes it next to the project
pub struct SnapshotWriter {
    /// Texts embedded in the snapshot
    labels: SnapshotLabels,
    /// File name of the artifact inside the root
    output_name: String,
}

impl SnapshotWriter {
    /// Create a new snapshot writer
    pub fn new(labels: SnapshotLabels, output_name: impl Into<String>) -> Self {
        Self {
            labels,
            output_name: output_name.into(),
        }
    }

    /// Assemble the artifact for `files` under `root`
    ///
    /// A missing file gets an annotated delimiter and no body; an unreadable
    /// one gets the placeholder body. Neither stops the remaining files.
    /// Nothing time- or run-dependent goes into the text.
    pub fn assemble(&self, root: &Path, rendered_tree: &str, files: &[PathBuf]) -> Snapshot {
        let mut snapshot = Snapshot::default();
        let text = &mut snapshot.text;

        text.push_str(&self.labels.structure);
        text.push('\n');
        text.push_str(rendered_tree);
        text.push('\n');
        text.push_str(&self.labels.selected_files);
        text.push('\n');

        for file in files {
            let rel = relative_display(root, file);

            match fs::read_to_string(file) {
                Ok(content) => {
                    text.push_str(&format!("\n==== {} ====\n{}\n", rel, content));
                    let info = FileReportInfo {
                        lines: content.lines().count(),
                        chars: content.chars().count(),
                    };
                    snapshot.included.push((rel, info));
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    warn!("Selected file vanished: {}", file.display());
                    text.push_str(&format!("\n==== {} ({}) ====\n", rel, self.labels.not_found));
                    snapshot.failures.push(FileFailure::NotFound { path: file.clone() });
                }
                Err(e) => {
                    warn!("Failed to read {}: {}", file.display(), e);
                    text.push_str(&format!("\n==== {} ====\n{}\n", rel, self.labels.read_error));
                    snapshot.failures.push(FileFailure::Unreadable {
                        path: file.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        snapshot
    }

    /// Where the artifact for `root` goes
    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output_name)
    }

    /// Write the snapshot to `<root>/<output name>`, replacing any previous one
    ///
    /// The text goes to a temporary file in `root` that is then renamed over
    /// the target, so a failed write leaves the previous artifact untouched.
    pub fn write(&self, root: &Path, snapshot: &Snapshot) -> Result<PathBuf> {
        let path = self.output_path(root);
        let write_error = |source: io::Error| PromptError::Write {
            path: path.clone(),
            source,
        };

        let mut staged = NamedTempFile::new_in(root).map_err(write_error)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            staged
                .as_file()
                .set_permissions(fs::Permissions::from_mode(0o644))
                .map_err(write_error)?;
        }
        staged.write_all(snapshot.text.as_bytes()).map_err(write_error)?;
        staged.persist(&path).map_err(|e| write_error(e.error))?;

        Ok(path)
    }
}

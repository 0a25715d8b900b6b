/*!
 * Core types and data structures for project-prompt
 */

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Kind of a filesystem entry met during traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file (symlinks are resolved)
    File,
    /// Directory
    Directory,
}

/// One filesystem object encountered during traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Absolute path of the entry
    pub path: PathBuf,
    /// Whether it is a file or a directory
    pub kind: EntryKind,
}

/// Absolute file paths in discovery order
pub type FileList = Vec<PathBuf>;

/// Interface language
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// Russian
    Ru,
}

impl Language {
    /// Name of the language in that language, for the language picker
    pub fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Ru => "Русский",
        }
    }
}

/// Selection persisted between runs
///
/// Stored as `{ "lang": .., "lastPath": .., "lastFiles": [..] }`. Every field is
/// optional on disk so that records written by older versions still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRecord {
    /// Chosen interface language, if the user picked one
    #[serde(rename = "lang", default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    /// Project root of the last selection
    #[serde(rename = "lastPath", default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Files picked under `root`, in selection order
    #[serde(rename = "lastFiles", default)]
    pub files: FileList,
}

impl SelectionRecord {
    /// Whether the record carries a previous selection worth offering again
    pub fn has_selection(&self) -> bool {
        self.root.is_some() && !self.files.is_empty()
    }
}

/*!
 * project-prompt - Build a text snapshot of selected project files for LLM prompts
 *
 * Walks a project directory, renders its tree, and concatenates the contents
 * of the files the user picked. The last selection is persisted and checked
 * against the filesystem on the next run.
 */

pub mod app;
pub mod config;
pub mod error;
pub mod filter;
pub mod messages;
pub mod prompt;
pub mod report;
pub mod scanner;
pub mod store;
pub mod tree;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use app::{App, RunOutcome};
pub use config::Config;
pub use error::{PromptError, Result};
pub use filter::PathFilter;
pub use messages::Messages;
pub use prompt::{Choice, PromptOutcome, Prompter, TerminalPrompter};
pub use report::{FileReportInfo, ReportFormat, Reporter, SnapshotReport};
pub use scanner::{Scanner, SkippedEntry, WalkReport};
pub use store::{Reconciliation, SelectionStore};
pub use tree::{render_tree, TreeNode};
pub use types::{Entry, EntryKind, FileList, Language, SelectionRecord};
pub use writer::{FileFailure, Snapshot, SnapshotLabels, SnapshotWriter};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

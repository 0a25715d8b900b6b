/*!
 * One interactive run: language, reuse-or-select, snapshot
 */

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use strum::IntoEnumIterator;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Result;
use crate::filter::PathFilter;
use crate::messages::Messages;
use crate::prompt::{Choice, PromptOutcome, Prompter};
use crate::report::SnapshotReport;
use crate::scanner::{Scanner, WalkReport};
use crate::store::{Reconciliation, SelectionStore};
use crate::tree::render_tree;
use crate::types::{FileList, Language, SelectionRecord};
use crate::utils::{locale_cmp, relative_display};
use crate::writer::{FileFailure, SnapshotLabels, SnapshotWriter};

/// Unwrap a prompt answer or end the run as cancelled
macro_rules! selected {
    ($outcome:expr) => {
        match $outcome {
            PromptOutcome::Selected(value) => value,
            PromptOutcome::Cancelled => return Ok(RunOutcome::Cancelled),
        }
    };
}

/// How a run ended
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// Snapshot written to `path`
    Written {
        path: PathBuf,
        report: SnapshotReport,
    },
    /// User backed out of a prompt; no snapshot was written
    Cancelled,
}

/// Directory navigation step
#[derive(Debug, Clone, PartialEq, Eq)]
enum Nav {
    Select,
    Up,
    Enter(String),
}

/// Entry of the file picker
#[derive(Debug, Clone, PartialEq, Eq)]
enum FilePick {
    All,
    File(PathBuf),
}

/// The interactive application
pub struct App {
    config: Config,
    store: SelectionStore,
    scanner: Scanner,
    filter: PathFilter,
}

impl App {
    /// Create the app for `config`, walking directories with `scanner`
    pub fn new(config: Config, scanner: Scanner) -> Self {
        let store = SelectionStore::new(&config.state_file);
        let scanner = scanner.with_output_name(config.output_name.clone());
        Self {
            config,
            store,
            scanner,
            filter: PathFilter::new(),
        }
    }

    /// Run once: ask, persist the selection, write the snapshot
    ///
    /// User-facing text goes to `out`; logs go through `tracing`.
    pub fn run<P: Prompter, W: Write>(&self, prompter: &mut P, out: &mut W) -> Result<RunOutcome> {
        let mut record = self.store.load();

        let language = match record.language {
            Some(language) => language,
            None => {
                let bootstrap = Messages::new(self.config.default_language);
                let choices: Vec<Choice<Language>> = Language::iter()
                    .map(|language| Choice::new(language.native_name(), language))
                    .collect();
                let language = selected!(prompter.search(&bootstrap.text("selectLanguage"), &choices)?);
                record.language = Some(language);
                self.persist(&record, &Messages::new(language), out)?;
                language
            }
        };
        let messages = Messages::new(language);
        prompter.set_messages(messages);

        let cwd = &self.config.working_dir;
        let mut reuse = None;
        let start = match SelectionStore::reconcile(&record, cwd) {
            Reconciliation::Empty => cwd.clone(),
            Reconciliation::StaleRoot { stale, fallback } => {
                let stale = stale.display().to_string();
                let suggestion = fallback.display().to_string();
                writeln!(
                    out,
                    "{}",
                    messages.format("stalePath", &[("path", stale.as_str()), ("fallback", suggestion.as_str())])
                )?;
                fallback
            }
            Reconciliation::NoFiles { root } => {
                if record.has_selection() {
                    let shown = root.display().to_string();
                    writeln!(out, "{}", messages.format("noPreviousFiles", &[("path", shown.as_str())]))?;
                }
                root
            }
            Reconciliation::Usable {
                root,
                files,
                dropped,
            } => {
                if !dropped.is_empty() {
                    let count = dropped.len().to_string();
                    writeln!(out, "{}", messages.format("staleFiles", &[("count", count.as_str())]))?;
                    record.files = files.clone();
                    self.persist(&record, &messages, out)?;
                }

                let question = format!("{} ({})", messages.text("usePreviousSelection"), root.display());
                if selected!(prompter.confirm(&question, &messages.text("yes"), &messages.text("no"))?) {
                    reuse = Some((root.clone(), files));
                }
                root
            }
        };

        let (root, files, walk) = match reuse {
            Some((root, files)) => (root, files, None),
            None => {
                let root = selected!(self.navigate(prompter, &messages, &start)?);
                let walk = self.scan(&root, &messages, out)?;

                writeln!(
                    out,
                    "\n{}\n{}",
                    messages.text("projectStructure"),
                    render_tree(&root, &walk.files)
                )?;

                let files = selected!(self.pick_files(prompter, &messages, &root, &walk.files)?);
                record.root = Some(root.clone());
                record.files = files.clone();
                self.persist(&record, &messages, out)?;

                (root, files, Some(walk))
            }
        };

        let walk = match walk {
            Some(walk) => walk,
            None => self.scan(&root, &messages, out)?,
        };
        self.write_snapshot(&root, &files, &walk, &messages, out)
    }

    /// Assemble, echo and write the snapshot
    fn write_snapshot<W: Write>(
        &self,
        root: &Path,
        files: &[PathBuf],
        walk: &WalkReport,
        messages: &Messages,
        out: &mut W,
    ) -> Result<RunOutcome> {
        let tree = render_tree(root, &walk.files);
        let writer = SnapshotWriter::new(SnapshotLabels::localized(messages), &self.config.output_name);
        let snapshot = writer.assemble(root, &tree, files);

        for failure in &snapshot.failures {
            if let FileFailure::Unreadable { path, reason } = failure {
                let shown = path.display().to_string();
                writeln!(
                    out,
                    "{}",
                    messages.format("fileReadFailed", &[("path", shown.as_str()), ("error", reason.as_str())])
                )?;
            }
        }

        writeln!(out, "\n{}\n{}", messages.text("generatedPrompt"), snapshot.text)?;
        let path = writer.write(root, &snapshot)?;
        writeln!(out, "\n{} {}", messages.text("promptSaved"), path.display())?;

        let report = SnapshotReport::from_snapshot(&snapshot, path.display().to_string(), walk.files.len());
        Ok(RunOutcome::Written { path, report })
    }

    /// Walk `root`, telling the user about anything skipped or an empty result
    fn scan<W: Write>(&self, root: &Path, messages: &Messages, out: &mut W) -> Result<WalkReport> {
        let walk = self.scanner.walk(root);

        if !walk.skipped.is_empty() {
            let count = walk.skipped.len().to_string();
            writeln!(out, "{}", messages.format("skippedEntries", &[("count", count.as_str())]))?;
        }
        if walk.files.is_empty() {
            let shown = root.display().to_string();
            writeln!(out, "{}", messages.format("noFilesFound", &[("path", shown.as_str())]))?;
        }

        Ok(walk)
    }

    /// Let the user walk the directory tree from `start` and pick a folder
    fn navigate<P: Prompter>(
        &self,
        prompter: &mut P,
        messages: &Messages,
        start: &Path,
    ) -> Result<PromptOutcome<PathBuf>> {
        let mut current = start.to_path_buf();

        loop {
            let mut choices = vec![
                Choice::new(messages.text("selectThisFolder"), Nav::Select),
                Choice::new(messages.text("back"), Nav::Up),
            ];
            choices.extend(
                subdirectories(&current)
                    .into_iter()
                    .map(|name| Choice::new(name.clone(), Nav::Enter(name))),
            );

            let message = format!("{}: {}", messages.text("enterPath"), current.display());
            match prompter.search(&message, &choices)? {
                PromptOutcome::Cancelled => return Ok(PromptOutcome::Cancelled),
                PromptOutcome::Selected(Nav::Select) => return Ok(PromptOutcome::Selected(current)),
                PromptOutcome::Selected(Nav::Up) => {
                    if let Some(parent) = current.parent() {
                        current = parent.to_path_buf();
                    }
                }
                PromptOutcome::Selected(Nav::Enter(name)) => current.push(name),
            }
            debug!("Navigated to {}", current.display());
        }
    }

    /// Ask which of `files` go into the snapshot
    ///
    /// The "select all" entry takes every file except the bulk-excluded ones.
    fn pick_files<P: Prompter>(
        &self,
        prompter: &mut P,
        messages: &Messages,
        root: &Path,
        files: &[PathBuf],
    ) -> Result<PromptOutcome<FileList>> {
        let mut choices = vec![Choice::new(messages.text("selectAllFiles"), FilePick::All)];
        choices.extend(
            files
                .iter()
                .map(|file| Choice::new(relative_display(root, file), FilePick::File(file.clone()))),
        );

        let picks = prompter.checkbox(&messages.text("selectFiles"), &choices)?;
        Ok(picks.map(|picks| {
            if picks.contains(&FilePick::All) {
                files
                    .iter()
                    .filter(|file| !self.filter.is_bulk_excluded(file))
                    .cloned()
                    .collect()
            } else {
                picks
                    .into_iter()
                    .filter_map(|pick| match pick {
                        FilePick::File(file) => Some(file),
                        FilePick::All => None,
                    })
                    .collect()
            }
        }))
    }

    /// Save the record; a failure is reported and the run goes on
    fn persist<W: Write>(&self, record: &SelectionRecord, messages: &Messages, out: &mut W) -> Result<()> {
        if let Err(e) = self.store.save(record) {
            warn!("Failed to save selection to {}: {}", self.store.path().display(), e);
            writeln!(out, "{} {}", messages.text("configSaveError"), e)?;
        }
        Ok(())
    }
}

/// Names of the directories directly inside `dir`, sorted for display
///
/// An unreadable directory has no subdirectories as far as navigation goes.
fn subdirectories(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to list {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();

    names.sort_by(|a, b| locale_cmp(a, b));
    names
}

//! Localized user-facing strings
//!
//! The string table ships inside the binary (`lang.json`). Lookups go through a
//! [`Messages`] value bound to one resolved [`Language`], so nothing depends on
//! a process-wide "current language". A key missing from the chosen language
//! falls back to English, and a key missing everywhere to a built-in English
//! literal, so lookups never fail.

use std::borrow::Cow;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::warn;

use crate::types::Language;

type Table = HashMap<String, HashMap<String, String>>;

static TABLE: Lazy<Table> = Lazy::new(|| {
    serde_json::from_str(include_str!("lang.json")).unwrap_or_else(|e| {
        warn!("Bundled string table is invalid, using English literals: {}", e);
        Table::new()
    })
});

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\w+)\}").expect("valid regex"));

/// English literals used when the table has no entry at all
static FALLBACK: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("selectLanguage", "Select language"),
        ("selectThisFolder", "[Select this folder]"),
        ("back", "[..] Go up"),
        ("enterPath", "Choose the project folder"),
        ("usePreviousSelection", "Use previous selection"),
        ("yes", "Yes"),
        ("no", "No"),
        ("projectStructure", "Project structure:"),
        ("selectFiles", "Select files to include"),
        ("selectAllFiles", "[Select all files]"),
        ("projectStructureLabel", "Project structure:"),
        ("selectedFilesContent", "Selected files content:"),
        ("fileReadError", "[Error reading file]"),
        ("fileNotFound", "not found"),
        ("fileReadFailed", "Could not read {path}: {error}"),
        ("generatedPrompt", "Generated prompt:"),
        ("promptSaved", "Prompt saved to"),
        ("errorOccurred", "An error occurred:"),
        ("configSaveError", "Config save error:"),
        ("stalePath", "Saved folder {path} no longer exists. Starting from {fallback}."),
        ("staleFiles", "{count} previously selected file(s) no longer exist and were dropped."),
        ("noPreviousFiles", "None of the previously selected files exist anymore in {path}. Please select again."),
        ("noFilesFound", "No matching files found in {path}."),
        ("skippedEntries", "{count} entries could not be read and were skipped."),
        ("cancelled", "Cancelled. Nothing was written."),
        ("invalidSelection", "Invalid choice, try again."),
        ("searchHint", "Type a number to choose, text to filter, empty line to clear the filter"),
        ("checkboxHint", "Enter numbers or ranges separated by spaces or commas (e.g. 1 3-5), empty line for none"),
        ("noMatches", "No matches."),
    ]
    .into_iter()
    .collect()
});

/// String lookup bound to one language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    language: Language,
}

impl Messages {
    /// Messages for `language`
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Language these messages are in
    pub fn language(&self) -> Language {
        self.language
    }

    /// Template for `key`
    pub fn text(&self, key: &str) -> Cow<'static, str> {
        Self::lookup(self.language, key)
            .or_else(|| Self::lookup(Language::En, key))
            .map(Cow::Owned)
            .or_else(|| FALLBACK.get(key).map(|s| Cow::Borrowed(*s)))
            .unwrap_or_else(|| Cow::Owned(key.to_string()))
    }

    /// Template for `key` with `{name}` placeholders substituted
    ///
    /// Placeholders without a value are left as they are.
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        let template = self.text(key);
        PLACEHOLDER
            .replace_all(&template, |caps: &Captures| {
                args.iter()
                    .find(|(name, _)| *name == &caps[1])
                    .map(|(_, value)| value.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    fn lookup(language: Language, key: &str) -> Option<String> {
        TABLE
            .get(language.as_ref())
            .and_then(|strings| strings.get(key))
            .cloned()
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::new(Language::En)
    }
}

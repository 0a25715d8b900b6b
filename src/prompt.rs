//! Interactive prompts
//!
//! The app only talks to the [`Prompter`] trait: a type-ahead single select,
//! a multi-select and a yes/no built on the former. Every call returns a
//! [`PromptOutcome`], so a user backing out is a normal value and not an error.
//! [`TerminalPrompter`] is the line-based implementation used by the binary.

use std::io::{BufRead, Write};

use crate::error::Result;
use crate::messages::Messages;

/// One selectable item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<T> {
    /// Text shown to the user and matched by the filter
    pub name: String,
    /// Value returned when picked
    pub value: T,
}

impl<T> Choice<T> {
    /// Create a choice
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Result of a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome<T> {
    /// The user made a choice
    Selected(T),
    /// The user backed out (end of input)
    Cancelled,
}

impl<T> PromptOutcome<T> {
    /// Map the selected value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PromptOutcome<U> {
        match self {
            Self::Selected(value) => PromptOutcome::Selected(f(value)),
            Self::Cancelled => PromptOutcome::Cancelled,
        }
    }
}

/// Source of user choices
pub trait Prompter {
    /// Pick one of `choices`, narrowing the list by typed text
    fn search<T: Clone>(&mut self, message: &str, choices: &[Choice<T>]) -> Result<PromptOutcome<T>>;

    /// Pick any number of `choices`; values come back in choice order
    fn checkbox<T: Clone>(
        &mut self,
        message: &str,
        choices: &[Choice<T>],
    ) -> Result<PromptOutcome<Vec<T>>>;

    /// Yes/no question
    fn confirm(&mut self, message: &str, yes: &str, no: &str) -> Result<PromptOutcome<bool>> {
        self.search(message, &[Choice::new(yes, true), Choice::new(no, false)])
    }

    /// Switch the language of the prompter's own hints
    fn set_messages(&mut self, _messages: Messages) {}
}

/// Line-based prompter over any reader/writer pair
///
/// End of input cancels the current prompt.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
    messages: Messages,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    /// Create a prompter reading answers from `input` and drawing on `output`
    pub fn new(input: R, output: W, messages: Messages) -> Self {
        Self {
            input,
            output,
            messages,
        }
    }

    /// Read one line; `None` at end of input
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| crate::error!(Prompt, "failed to read answer: {}", e))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn list<T>(&mut self, choices: &[&Choice<T>]) -> Result<()> {
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {:>3}) {}", i + 1, choice.name)?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn search<T: Clone>(&mut self, message: &str, choices: &[Choice<T>]) -> Result<PromptOutcome<T>> {
        let mut filter = String::new();
        writeln!(self.output, "? {}", message)?;
        writeln!(self.output, "  ({})", self.messages.text("searchHint"))?;

        loop {
            let needle = filter.to_lowercase();
            let visible: Vec<&Choice<T>> = choices
                .iter()
                .filter(|c| needle.is_empty() || c.name.to_lowercase().contains(&needle))
                .collect();

            if visible.is_empty() {
                writeln!(self.output, "  {}", self.messages.text("noMatches"))?;
            }
            self.list(&visible)?;
            if filter.is_empty() {
                write!(self.output, "> ")?;
            } else {
                write!(self.output, "[{}] > ", filter)?;
            }
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(PromptOutcome::Cancelled);
            };

            if line.is_empty() {
                filter.clear();
                continue;
            }

            // Digits that occur in a visible name narrow the list like any other text
            let lowered = line.to_lowercase();
            if visible.iter().any(|c| c.name.to_lowercase().contains(&lowered)) {
                filter = line;
                continue;
            }

            match line.parse::<usize>() {
                Ok(n) if (1..=visible.len()).contains(&n) => {
                    return Ok(PromptOutcome::Selected(visible[n - 1].value.clone()));
                }
                Ok(_) => writeln!(self.output, "  {}", self.messages.text("invalidSelection"))?,
                Err(_) => filter = line,
            }
        }
    }

    fn checkbox<T: Clone>(
        &mut self,
        message: &str,
        choices: &[Choice<T>],
    ) -> Result<PromptOutcome<Vec<T>>> {
        writeln!(self.output, "? {}", message)?;
        writeln!(self.output, "  ({})", self.messages.text("checkboxHint"))?;
        let all: Vec<&Choice<T>> = choices.iter().collect();
        self.list(&all)?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(PromptOutcome::Cancelled);
            };

            match parse_picks(&line, choices.len()) {
                Some(marks) => {
                    let picked = choices
                        .iter()
                        .zip(marks)
                        .filter(|(_, marked)| *marked)
                        .map(|(choice, _)| choice.value.clone())
                        .collect();
                    return Ok(PromptOutcome::Selected(picked));
                }
                None => writeln!(self.output, "  {}", self.messages.text("invalidSelection"))?,
            }
        }
    }

    fn set_messages(&mut self, messages: Messages) {
        self.messages = messages;
    }
}

/// Parse "1 3-5, 7" into marks over `len` choices; `None` if anything is off
fn parse_picks(line: &str, len: usize) -> Option<Vec<bool>> {
    let mut marks = vec![false; len];

    for token in line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let (start, end) = match token.split_once('-') {
            Some((a, b)) => (a.trim().parse::<usize>().ok()?, b.trim().parse::<usize>().ok()?),
            None => {
                let n = token.parse::<usize>().ok()?;
                (n, n)
            }
        };

        if start == 0 || end < start || end > len {
            return None;
        }
        for mark in &mut marks[start - 1..end] {
            *mark = true;
        }
    }

    Some(marks)
}

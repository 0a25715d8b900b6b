/*!
 * Shared helpers for integration tests
 */

#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use project_prompt::error::Result;
use project_prompt::prompt::{Choice, PromptOutcome, Prompter};
use project_prompt::scanner::Scanner;
use project_prompt::{App, Config};

/// One scripted answer
#[derive(Debug, Clone)]
pub enum Answer {
    /// Pick the single-select choice with this exact name
    Pick(&'static str),
    /// Tick the checkbox choices with these exact names
    Tick(Vec<&'static str>),
    /// Back out of the prompt
    Cancel,
}

/// Prompter answering from a fixed script and recording every question
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub questions: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            questions: Vec::new(),
        }
    }

    pub fn finished(&self) -> bool {
        self.answers.is_empty()
    }

    fn next(&mut self, message: &str) -> Answer {
        self.questions.push(message.to_string());
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer for {:?}", message))
    }
}

impl Prompter for ScriptedPrompter {
    fn search<T: Clone>(&mut self, message: &str, choices: &[Choice<T>]) -> Result<PromptOutcome<T>> {
        match self.next(message) {
            Answer::Pick(name) => {
                let choice = choices
                    .iter()
                    .find(|c| c.name == name)
                    .unwrap_or_else(|| {
                        let names: Vec<_> = choices.iter().map(|c| c.name.as_str()).collect();
                        panic!("{:?} not among {:?} for {:?}", name, names, message)
                    });
                Ok(PromptOutcome::Selected(choice.value.clone()))
            }
            Answer::Cancel => Ok(PromptOutcome::Cancelled),
            other => panic!("unexpected {:?} for {:?}", other, message),
        }
    }

    fn checkbox<T: Clone>(
        &mut self,
        message: &str,
        choices: &[Choice<T>],
    ) -> Result<PromptOutcome<Vec<T>>> {
        match self.next(message) {
            Answer::Tick(names) => Ok(PromptOutcome::Selected(
                choices
                    .iter()
                    .filter(|c| names.iter().any(|name| *name == c.name))
                    .map(|c| c.value.clone())
                    .collect(),
            )),
            Answer::Cancel => Ok(PromptOutcome::Cancelled),
            other => panic!("unexpected {:?} for {:?}", other, message),
        }
    }
}

/// Temp project with a.js, sub/b.py, package-lock.json, .env and node_modules/x.js
pub fn setup_project(dir: &Path) -> io::Result<PathBuf> {
    let root = dir.join("project");
    fs::create_dir_all(root.join("sub"))?;
    fs::create_dir_all(root.join("node_modules"))?;
    fs::write(root.join("a.js"), "console.log('a');\n")?;
    fs::write(root.join("sub").join("b.py"), "print('b')\n")?;
    fs::write(root.join("package-lock.json"), "{}\n")?;
    fs::write(root.join(".env"), "SECRET=1\n")?;
    fs::write(root.join("node_modules").join("x.js"), "module.exports = 1;\n")?;
    Ok(root)
}

/// App with its selection file in `dir` and `working_dir` as the start folder
pub fn app(dir: &Path, working_dir: &Path) -> App {
    let config = Config::with_state_file(dir.join("state.json"), working_dir);
    App::new(config, Scanner::hidden())
}

pub fn state_path(dir: &Path) -> PathBuf {
    dir.join("state.json")
}

/*!
 * Configuration handling for project-prompt
 */

use std::env;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::bail;
use crate::error::Result;
use crate::types::Language;

/// Name of the selection file kept next to the executable
pub const STATE_FILE_NAME: &str = "project_prompt_config.json";

/// Environment variable overriding the selection file location
pub const STATE_FILE_ENV: &str = "PROJECT_PROMPT_CONFIG";

/// Name of the generated artifact inside the chosen root
pub const OUTPUT_FILE_NAME: &str = "prompt.txt";

/// Command-line arguments for project-prompt
///
/// Everything else is asked interactively.
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "project-prompt",
    version = env!("CARGO_PKG_VERSION"),
    about = "Interactively snapshot selected project files into a single prompt",
    long_about = "Walk to a project folder, pick files, and get the project tree plus the contents of the picked files on stdout and in <project>/prompt.txt. The last selection is remembered between runs."
)]
pub struct Args {}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Where the last selection is persisted
    pub state_file: PathBuf,

    /// Directory the process was started in
    pub working_dir: PathBuf,

    /// File name of the artifact written into the chosen root
    pub output_name: String,

    /// Language of the one-time language question
    pub default_language: Language,
}

impl Config {
    /// Create configuration from command-line arguments and the environment
    pub fn from_args(_args: Args) -> Result<Self> {
        let working_dir = env::current_dir()?;
        let state_file = env::var_os(STATE_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| default_state_file(&working_dir));

        Ok(Self {
            state_file,
            working_dir,
            output_name: OUTPUT_FILE_NAME.to_string(),
            default_language: Language::default(),
        })
    }

    /// Configuration rooted at `working_dir` with an explicit selection file
    pub fn with_state_file(state_file: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_file: state_file.into(),
            working_dir: working_dir.into(),
            output_name: OUTPUT_FILE_NAME.to_string(),
            default_language: Language::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.working_dir.is_dir() {
            bail!(
                Config,
                "Working directory not found: {}",
                self.working_dir.display()
            );
        }

        if self.output_name.is_empty() || Path::new(&self.output_name).components().count() != 1 {
            bail!(Config, "Invalid output file name: {:?}", self.output_name);
        }

        if let Some(parent) = self.state_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                bail!(
                    Config,
                    "Directory for the selection file not found: {}",
                    parent.display()
                );
            }
        }

        Ok(())
    }
}

/// Selection file next to the executable, else in the user config directory
fn default_state_file(working_dir: &Path) -> PathBuf {
    if let Some(dir) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        return dir.join(STATE_FILE_NAME);
    }

    dirs::config_dir()
        .map(|dir| dir.join("project-prompt"))
        .filter(|dir| dir.is_dir() || std::fs::create_dir_all(dir).is_ok())
        .unwrap_or_else(|| working_dir.to_path_buf())
        .join(STATE_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_accepts_existing_dirs() {
        let dir = tempdir().unwrap();
        let config = Config::with_state_file(dir.path().join("state.json"), dir.path());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_working_dir() {
        let dir = tempdir().unwrap();
        let config = Config::with_state_file(dir.path().join("state.json"), dir.path().join("gone"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nested_output_name() {
        let dir = tempdir().unwrap();
        let mut config = Config::with_state_file(dir.path().join("state.json"), dir.path());
        config.output_name = "out/prompt.txt".to_string();
        assert!(config.validate().is_err());
    }
}

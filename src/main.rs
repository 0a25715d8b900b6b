/*!
 * Command-line interface for project-prompt
 */

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::error;
use tracing_subscriber::EnvFilter;

use project_prompt::app::{App, RunOutcome};
use project_prompt::config::{Args, Config};
use project_prompt::error::Result;
use project_prompt::filter::PathFilter;
use project_prompt::messages::Messages;
use project_prompt::prompt::TerminalPrompter;
use project_prompt::report::{ReportFormat, Reporter};
use project_prompt::scanner::Scanner;
use project_prompt::store::SelectionStore;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .without_time()
        .init();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "run failed");
            eprintln!("{} {}", Messages::default().text("errorOccurred"), e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    // Create and validate configuration
    let config = Config::from_args(args)?;
    config.validate()?;

    let language = SelectionStore::new(&config.state_file)
        .load()
        .language
        .unwrap_or(config.default_language);
    let messages = Messages::new(language);

    // Spinner on stderr while walking the project
    let progress = ProgressBar::new_spinner();
    match ProgressStyle::default_spinner().template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos} files") {
        Ok(style) => progress.set_style(style),
        Err(e) => eprintln!("Warning: Failed to set progress style: {}", e),
    }

    let scanner = Scanner::new(PathFilter::new(), Arc::new(progress));
    let app = App::new(config, scanner);

    let stdin = io::stdin();
    let mut prompter = TerminalPrompter::new(stdin.lock(), io::stdout(), messages);
    let mut out = io::stdout();

    match app.run(&mut prompter, &mut out)? {
        RunOutcome::Written { report, .. } => {
            let reporter = Reporter::new(ReportFormat::ConsoleTable);
            println!("\n{}", reporter.generate_report(&report));
            Ok(ExitCode::SUCCESS)
        }
        RunOutcome::Cancelled => {
            eprintln!("{}", messages.text("cancelled"));
            Ok(ExitCode::SUCCESS)
        }
    }
}

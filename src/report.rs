/*!
 * Run summary for project-prompt
 *
 * Renders what went into a snapshot as console tables using the tabled
 * library.
 */

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::utils::format_file_size;
use crate::writer::{FileFailure, Snapshot};

/// Information about a file in the report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReportInfo {
    /// Number of lines in the file
    pub lines: usize,
    /// Number of characters in the file
    pub chars: usize,
}

/// Statistics for one generated snapshot
#[derive(Debug, Clone)]
pub struct SnapshotReport {
    /// Output file path
    pub output_file: String,
    /// Size of the artifact in bytes
    pub output_bytes: u64,
    /// Number of files found under the root
    pub files_discovered: usize,
    /// Included files with their statistics, in snapshot order
    pub file_details: Vec<(String, FileReportInfo)>,
    /// Number of selected files that were missing
    pub files_missing: usize,
    /// Number of selected files that could not be read
    pub files_unreadable: usize,
}

impl SnapshotReport {
    /// Summarize a snapshot written to `output_file`
    pub fn from_snapshot(snapshot: &Snapshot, output_file: String, files_discovered: usize) -> Self {
        let files_missing = snapshot
            .failures
            .iter()
            .filter(|f| matches!(f, FileFailure::NotFound { .. }))
            .count();

        Self {
            output_file,
            output_bytes: snapshot.text.len() as u64,
            files_discovered,
            file_details: snapshot.included.clone(),
            files_missing,
            files_unreadable: snapshot.failures.len() - files_missing,
        }
    }

    /// Total lines across included files
    pub fn total_lines(&self) -> usize {
        self.file_details.iter().map(|(_, info)| info.lines).sum()
    }

    /// Total characters across included files
    pub fn total_chars(&self) -> usize {
        self.file_details.iter().map(|(_, info)| info.chars).sum()
    }
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for snapshot results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &SnapshotReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    // Keep the tail of long paths, where the file name is
    fn format_path(&self, path: &str, max_len: usize) -> String {
        if path.chars().count() <= max_len {
            return path.to_string();
        }

        let mut segments = Vec::new();
        let mut current_len = 3; // "..."
        for part in path.split('/').rev() {
            let part_len = part.chars().count() + 1;
            if current_len + part_len > max_len {
                break;
            }
            segments.push(part);
            current_len += part_len;
        }

        if segments.is_empty() {
            let tail: String = path
                .chars()
                .rev()
                .take(max_len.saturating_sub(3))
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            return format!("...{}", tail);
        }

        let mut result = String::from("...");
        for part in segments.iter().rev() {
            result.push('/');
            result.push_str(part);
        }
        result
    }

    fn create_summary_table(&self, report: &SnapshotReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let mut rows = vec![
            SummaryRow {
                key: "Output File".to_string(),
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "Output Size".to_string(),
                value: format_file_size(report.output_bytes),
            },
            SummaryRow {
                key: "Files Included".to_string(),
                value: format!(
                    "{} of {} found",
                    self.format_number(report.file_details.len()),
                    self.format_number(report.files_discovered)
                ),
            },
            SummaryRow {
                key: "Total Lines".to_string(),
                value: self.format_number(report.total_lines()),
            },
            SummaryRow {
                key: "LLM Tokens".to_string(),
                value: format!("{} tokens (estimated)", self.format_number(report.total_chars() / 4)),
            },
        ];

        if report.files_missing > 0 || report.files_unreadable > 0 {
            rows.push(SummaryRow {
                key: "Skipped Files".to_string(),
                value: format!(
                    "{} missing, {} unreadable",
                    report.files_missing, report.files_unreadable
                ),
            });
        }

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_files_table(&self, report: &SnapshotReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Est. Tokens")]
            tokens: String,
        }

        // Largest first
        let mut files: Vec<_> = report.file_details.iter().collect();
        files.sort_by(|(_, a), (_, b)| b.chars.cmp(&a.chars));

        let files_to_show = if files.len() > 15 { &files[0..10] } else { &files[..] };

        let rows: Vec<FileRow> = files_to_show
            .iter()
            .map(|(path, info)| FileRow {
                path: self.format_path(path, 60),
                lines: self.format_number(info.lines),
                tokens: self.format_number(info.chars / 4),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn generate_console_report(&self, report: &SnapshotReport) -> String {
        let files_title = if report.file_details.len() > 15 {
            "TOP 10 LARGEST FILES BY CHARACTER COUNT"
        } else {
            "INCLUDED FILES"
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title,
            self.create_files_table(report),
            "SNAPSHOT COMPLETE",
            self.create_summary_table(report)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> SnapshotReport {
        SnapshotReport {
            output_file: "/p/prompt.txt".to_string(),
            output_bytes: 2048,
            files_discovered: 3,
            file_details: vec![
                ("a.js".to_string(), FileReportInfo { lines: 2, chars: 40 }),
                ("sub/b.py".to_string(), FileReportInfo { lines: 10, chars: 400 }),
            ],
            files_missing: 1,
            files_unreadable: 0,
        }
    }

    #[test]
    fn test_console_report_lists_files_and_totals() {
        let text = Reporter::new(ReportFormat::ConsoleTable).generate_report(&sample_report());

        assert!(text.contains("INCLUDED FILES"));
        assert!(text.contains("sub/b.py"));
        assert!(text.contains("2 of 3 found"));
        assert!(text.contains("2.00 KB"));
        assert!(text.contains("1 missing, 0 unreadable"));
        // (40 + 400) / 4
        assert!(text.contains("110 tokens (estimated)"));
    }

    #[test]
    fn test_format_path_keeps_tail() {
        let reporter = Reporter::new(ReportFormat::ConsoleTable);
        assert_eq!(reporter.format_path("a/b.rs", 60), "a/b.rs");
        let long = "very/long/directory/names/that/go/on/and/on/and/on/forever/and/ever/file.rs";
        let shown = reporter.format_path(long, 30);
        assert!(shown.starts_with("..."));
        assert!(shown.ends_with("/file.rs"));
        assert!(shown.chars().count() <= 30);
    }
}

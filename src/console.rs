use std::io::{
    self,
    Write,
};

use async_trait::async_trait;
use crossterm::style::Stylize;
use devsweep::{
    context::{
        OutputFormatter,
        UserInteraction,
    },
    AnalysisReport,
    CleanupSummary,
    FileSize,
};
use tokio_util::sync::CancellationToken;

/// Colored terminal output. Debug messages are only shown in verbose mode.
pub struct ConsoleOutput {
    verbose: bool,
}

impl ConsoleOutput {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl OutputFormatter for ConsoleOutput {
    fn info(&self, message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    fn success(&self, message: &str) {
        println!("{} {}", "✔".green(), message);
    }

    fn warning(&self, message: &str) {
        println!("{} {}", "!".yellow(), message.yellow());
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "✘".red(), message.red());
    }

    fn debug(&self, message: &str) {
        if self.verbose {
            println!("{}", message.dark_grey());
        }
    }

    fn section(&self, title: &str) {
        println!();
        println!("{}", title.bold().underlined());
    }

    fn display_banner(&self, version: &str) {
        println!("{} {}", "DevSweep".bold().cyan(), format!("v{}", version).dark_grey());
    }

    fn display_analysis_report(&self, report: &AnalysisReport) {
        if report.is_empty() {
            self.info("Nothing to clean up");
            return;
        }

        for analysis in report.analyses() {
            if analysis.is_empty() {
                continue;
            }

            println!();
            println!(
                "{} {} items, {} ({} safe to delete)",
                format!("{:<10}", analysis.module().as_str()).bold(),
                analysis.item_count(),
                analysis.total_size(),
                analysis.safe_item_count()
            );

            for item in analysis.items() {
                let marker = if item.is_safe_to_delete() {
                    "✔".green()
                } else {
                    "✘".red()
                };
                println!(
                    "  {} {:>10}  {} {}",
                    marker,
                    item.size().to_string(),
                    item.path(),
                    format!("({})", item.reason()).dark_grey()
                );
            }
        }

        println!();
        println!(
            "{} {} reclaimable of {} found",
            "Total:".bold(),
            report.total_safe_size().to_string().green(),
            report.total_size()
        );
    }

    fn display_completion(&self, summaries: &[CleanupSummary]) {
        if summaries.is_empty() {
            self.info("Nothing has been cleaned");
            return;
        }

        self.section("Summary");
        for summary in summaries {
            let status = if summary.was_skipped() {
                "skipped".yellow().to_string()
            } else {
                format!(
                    "{} files deleted, {} freed",
                    summary.result().total_files_deleted(),
                    summary.result().total_space_freed()
                )
            };

            let errors = summary.result().error_messages().len();
            if errors > 0 {
                println!(
                    "  {:<10} {} {}",
                    summary.module().as_str(),
                    status,
                    format!("({} errors)", errors).red()
                );
            } else {
                println!("  {:<10} {}", summary.module().as_str(), status);
            }
        }

        let freed = summaries
            .iter()
            .map(|summary| summary.result().total_space_freed())
            .sum::<FileSize>();
        println!();
        println!("{} {}", "Space freed:".bold(), freed.to_string().green());
    }
}

/// Reads confirmations from stdin, or accepts everything when running with `--yes`.
pub struct ConsolePrompt {
    assume_yes: bool,
}

impl ConsolePrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[async_trait]
impl UserInteraction for ConsolePrompt {
    async fn confirm(&self, message: &str, destructive: bool, cancel: &CancellationToken) -> bool {
        if self.assume_yes {
            log::debug!("Confirmed due to --yes: {}", message);
            return true;
        }

        if destructive {
            print!("{} {} [y/N] ", "⚠".red(), message.bold());
        } else {
            print!("{} [y/N] ", message);
        }
        let _ = io::stdout().flush();

        let answer = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            io::stdin().read_line(&mut line).map(|_| line)
        });

        tokio::select! {
            answer = answer => match answer {
                Ok(Ok(line)) => is_yes(&line),
                Ok(Err(error)) => {
                    log::warn!("Failed to read confirmation: {:#}", error);
                    false
                }
                Err(error) => {
                    log::warn!("Confirmation task failed: {:#}", error);
                    false
                }
            },
            _ = cancel.cancelled() => false,
        }
    }
}

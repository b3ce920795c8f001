use colored::*;
use console::Term;
use indicatif::{ ProgressBar, ProgressStyle };
use std::time::Duration;
use textwrap::wrap;

use epubdiff::models::{ Classification, VerdictReport };

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "WARNING:".yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Spinner on stderr while waiting for the judgment service
pub fn spinner_with_message(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .unwrap()
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn colored_classification(classification: &Classification) -> ColoredString {
    let text = classification.as_str();
    match classification {
        Classification::Pass => text.green().bold(),
        Classification::NeedsWork => text.yellow().bold(),
        Classification::MajorDiff | Classification::Error => text.red().bold(),
        Classification::Other(_) => text.normal(),
    }
}

/// Human-readable verdict summary on stderr; stdout stays pure JSON
pub fn print_verdict_summary(report: &VerdictReport) {
    let width = (Term::stderr().size().1 as usize).max(40);

    eprintln!("{} {}", "Verdict:".bold(), colored_classification(&report.overall));

    if let Some(scores) = &report.scores {
        for (name, score) in scores.dimensions() {
            if let Some(score) = score {
                eprintln!("  {}: {}", name, score);
            }
        }
    }

    for (i, issue) in report.priority_issues.iter().enumerate() {
        let prefix = format!("  {}. ", i + 1);
        for (j, line) in wrap(issue, width.saturating_sub(prefix.len() + 2))
            .iter()
            .enumerate() {
            if j == 0 {
                eprintln!("{}{}", prefix, line);
            } else {
                eprintln!("{}{}", " ".repeat(prefix.len()), line);
            }
        }
    }

    if let Some(error) = report.parse_error.as_ref().or(report.service_error.as_ref()) {
        print_warning(error);
    }
}

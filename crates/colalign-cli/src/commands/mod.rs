//! CLI command implementations.

pub mod align;
pub mod chain;
pub mod matrix;
pub mod profile;

use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};

use colored::{ColoredString, Colorize};
use colalign::{AlignmentReport, CancelToken, ProgressSink};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Fail early with a readable message instead of an I/O error.
pub(crate) fn require_file(path: &Path) -> CommandResult {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }
    Ok(())
}

/// Cancel token tripped by Ctrl-C.
pub(crate) fn cancel_on_ctrlc() -> Result<CancelToken, ctrlc::Error> {
    let token = CancelToken::new();
    let handle = token.clone();
    ctrlc::set_handler(move || handle.cancel())?;
    Ok(token)
}

/// Progress bar drawn on stderr.
pub(crate) struct TerminalProgress {
    label: String,
    last: AtomicU8,
}

impl TerminalProgress {
    const WIDTH: usize = 30;

    pub(crate) fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            last: AtomicU8::new(u8::MAX),
        }
    }
}

impl ProgressSink for TerminalProgress {
    fn on_progress(&self, percent: u8) {
        if self.last.swap(percent, Ordering::Relaxed) == percent {
            return;
        }
        let filled = (percent as usize * Self::WIDTH) / 100;
        let bar = format!(
            "{}{}",
            "█".repeat(filled),
            "░".repeat(Self::WIDTH - filled)
        );
        let mut stderr = std::io::stderr();
        let _ = write!(stderr, "\r{} {} {:>3}%", self.label.cyan(), bar, percent);
        if percent >= 100 {
            let _ = writeln!(stderr);
        }
        let _ = stderr.flush();
    }
}

/// Output for a comparison whose right table has no columns. In JSON mode
/// `key` is reported as `null`.
pub(crate) fn nothing_to_compare(right: &Path, key: &str, json: bool) -> String {
    if json {
        serde_json::json!({ key: null }).to_string()
    } else {
        format!("{} {} has no columns", "Nothing to compare:".yellow(), right.display())
    }
}

/// Color a similarity score by strength.
pub(crate) fn colored_score(score: f64) -> ColoredString {
    let text = format!("{:.3}", score);
    if score >= 0.75 {
        text.green().bold()
    } else if score >= 0.4 {
        text.yellow()
    } else if score > 0.0 {
        text.normal()
    } else {
        text.dimmed()
    }
}

/// Print the matched pairs and leftovers of a report.
pub(crate) fn print_alignment(report: &AlignmentReport) {
    println!(
        "{} {} {} {}",
        report.left.name.white().bold(),
        "→".dimmed(),
        report.right.name.white().bold(),
        format!("({})", report.alignment.policy.as_str()).dimmed()
    );

    if report.pairs.is_empty() {
        println!("  {}", "No columns matched".yellow());
    }
    for pair in &report.pairs {
        println!(
            "  {:24} {} {:24} {}",
            pair.left_name,
            "→".dimmed(),
            pair.right_name,
            colored_score(pair.score)
        );
    }

    let unmatched = |indices: &[usize], names: &[String]| -> Vec<String> {
        indices.iter().map(|&i| names[i].clone()).collect()
    };
    let left = unmatched(&report.alignment.unmatched_rows, &report.left.columns);
    let right = unmatched(&report.alignment.unmatched_columns, &report.right.columns);
    if !left.is_empty() {
        println!("  {} {}", "Unmatched left:".dimmed(), left.join(", "));
    }
    if !right.is_empty() {
        println!("  {} {}", "Unmatched right:".dimmed(), right.join(", "));
    }

    println!(
        "  {} {:.3}",
        "Matched score:".dimmed(),
        report.alignment.total_score()
    );
}

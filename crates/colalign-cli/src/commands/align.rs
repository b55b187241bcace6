//! Align command - match the columns of two tables.

use std::path::PathBuf;

use colored::Colorize;
use colalign::Aligner;
use tracing::info;

use super::{
    CommandResult, TerminalProgress, cancel_on_ctrlc, nothing_to_compare, print_alignment,
    require_file,
};
use crate::cli::{LoadArgs, SelectArgs};

pub fn run(
    left: PathBuf,
    right: PathBuf,
    load: LoadArgs,
    select: SelectArgs,
    output: Option<PathBuf>,
    json: bool,
) -> CommandResult {
    require_file(&left)?;
    require_file(&right)?;

    let mut config = load.to_config();
    config.alignment = select.to_config();
    let aligner = Aligner::with_config(config);
    let cancel = cancel_on_ctrlc()?;

    if !json {
        println!(
            "{} {} {} {}",
            "Aligning".cyan().bold(),
            left.display().to_string().white(),
            "with".cyan(),
            right.display().to_string().white()
        );
    }

    let progress = TerminalProgress::new("Scoring");
    let Some(report) = aligner.compare_files(&left, &right, &progress, &cancel)? else {
        println!("{}", nothing_to_compare(&right, "report", json));
        return Ok(());
    };

    let rendered = report.to_json()?;
    if let Some(path) = &output {
        std::fs::write(path, &rendered)?;
        info!(path = %path.display(), "report written");
    }

    if json {
        println!("{}", rendered);
        return Ok(());
    }

    println!();
    print_alignment(&report);
    if let Some(path) = output {
        println!();
        println!("{} {}", "Saved report:".green(), path.display());
    }

    Ok(())
}

//! Chain command - align each table with the next one.

use std::path::PathBuf;

use colored::Colorize;
use colalign::Aligner;
use serde_json::json;
use tracing::warn;

use super::{
    CommandResult, TerminalProgress, cancel_on_ctrlc, print_alignment, require_file,
};
use crate::cli::{LoadArgs, SelectArgs};

pub fn run(files: Vec<PathBuf>, load: LoadArgs, select: SelectArgs, json: bool) -> CommandResult {
    for file in &files {
        require_file(file)?;
    }

    let mut config = load.to_config();
    config.alignment = select.to_config();
    let aligner = Aligner::with_config(config);
    let cancel = cancel_on_ctrlc()?;

    let tables = files
        .iter()
        .map(|f| aligner.load(f).map(|loaded| loaded.table))
        .collect::<Result<Vec<_>, _>>()?;

    let mut reports = Vec::with_capacity(tables.len().saturating_sub(1));
    for index in 0..tables.len().saturating_sub(1) {
        let progress = TerminalProgress::new(format!("Step {}/{}", index + 1, tables.len() - 1));
        match aligner.compare_with_next_cancellable(&tables, index, &progress, &cancel)? {
            Some(report) => reports.push(report),
            None => warn!(
                file = %files[index + 1].display(),
                "next table has no columns, skipping step"
            ),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&json!({ "steps": reports }))?);
        return Ok(());
    }

    println!(
        "{} {} tables, {} steps",
        "Chained".cyan().bold(),
        tables.len(),
        reports.len()
    );
    for report in &reports {
        println!();
        print_alignment(report);
    }

    Ok(())
}

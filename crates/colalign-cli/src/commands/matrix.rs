//! Matrix command - print the similarity matrix of two tables.

use std::path::PathBuf;

use colored::Colorize;
use colalign::{Aligner, SimilarityMatrix};
use serde_json::json;

use super::{
    CommandResult, TerminalProgress, cancel_on_ctrlc, colored_score, nothing_to_compare,
    require_file,
};
use crate::cli::LoadArgs;

pub fn run(left: PathBuf, right: PathBuf, load: LoadArgs, json: bool) -> CommandResult {
    require_file(&left)?;
    require_file(&right)?;

    let aligner = Aligner::with_config(load.to_config());
    let cancel = cancel_on_ctrlc()?;
    let a = aligner.load(&left)?;
    let b = aligner.load(&right)?;

    let progress = TerminalProgress::new("Scoring");
    let Some(report) = aligner.compare_cancellable(&a.table, &b.table, &progress, &cancel)?
    else {
        println!("{}", nothing_to_compare(&right, "matrix", json));
        return Ok(());
    };

    if json {
        let output = json!({
            "left": report.left,
            "right": report.right,
            "matrix": report.matrix,
            "total_score": report.total_score,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_matrix(&report.matrix);
    println!();
    println!("{} {:.3}", "Total score:".dimmed(), report.total_score);
    Ok(())
}

fn print_matrix(matrix: &SimilarityMatrix) {
    let label_width = matrix
        .row_names()
        .iter()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);
    let cell_width = matrix
        .column_names()
        .iter()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(5, 16);

    print!("{:label_width$}", "");
    for name in matrix.column_names() {
        print!(" {:>cell_width$}", truncate(name, cell_width).bold());
    }
    println!();

    for (name, row) in matrix.row_names().iter().zip(matrix.rows_iter()) {
        print!("{:label_width$}", name.bold());
        for &score in row {
            print!(" {:>cell_width$}", colored_score(score));
        }
        println!();
    }
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let mut s: String = name.chars().take(width.saturating_sub(1)).collect();
        s.push('…');
        s
    }
}

//! Profile command - print column profiles as JSON.

use std::path::PathBuf;

use colalign::Aligner;
use serde_json::json;
use tracing::info;

use super::{CommandResult, require_file};
use crate::cli::LoadArgs;

pub fn run(file: PathBuf, load: LoadArgs, output: Option<PathBuf>) -> CommandResult {
    require_file(&file)?;

    let aligner = Aligner::with_config(load.to_config());
    let loaded = aligner.load(&file)?;
    let profiles = aligner.profile_table(&loaded.table);

    let document = json!({
        "source": loaded.source,
        "table": loaded.table.name(),
        "rows": loaded.table.row_count(),
        "columns": &profiles,
    });
    let rendered = serde_json::to_string_pretty(&document)?;

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            info!(path = %path.display(), columns = profiles.len(), "profile written");
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

//! The `lernwort sets` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use lernwort_repository::load_config_from;

pub async fn execute(source: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let repository = super::open_repository(&config, source)?;

    let sets = repository.list_training_sets().await?;
    if sets.is_empty() {
        println!("No training sets available.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Description"]);
    for set in &sets {
        table.add_row(vec![
            Cell::new(set.id),
            Cell::new(&set.title),
            Cell::new(&set.description),
        ]);
    }

    println!("{table}");
    println!("{} training set(s)", sets.len());

    Ok(())
}

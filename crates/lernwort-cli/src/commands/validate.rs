//! The `lernwort validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(set_path: PathBuf) -> Result<()> {
    let sets = if set_path.is_dir() {
        lernwort_core::parser::load_set_directory(&set_path)?
    } else {
        vec![lernwort_core::parser::parse_training_set(&set_path)?]
    };

    let mut total_warnings = 0;

    for set in &sets {
        println!(
            "Training set: {} ({} documents)",
            set.info.title,
            set.entries.len()
        );

        let warnings = lernwort_core::parser::validate_training_set(set);
        for w in &warnings {
            let prefix = w
                .document_id
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All training sets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

//! The `lernwort init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create lernwort.toml
    if std::path::Path::new("lernwort.toml").exists() {
        println!("lernwort.toml already exists, skipping.");
    } else {
        std::fs::write("lernwort.toml", SAMPLE_CONFIG)?;
        println!("Created lernwort.toml");
    }

    // Create example training set
    std::fs::create_dir_all("training-sets")?;
    let example_path = std::path::Path::new("training-sets/example.toml");
    if example_path.exists() {
        println!("training-sets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_TRAINING_SET)?;
        println!("Created training-sets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit training-sets/example.toml or add your own sets");
    println!("  2. Run: lernwort validate --set-file training-sets/example.toml");
    println!("  3. Run: lernwort train --set 1");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# lernwort configuration

default_source = "local"
almost_threshold = 0.25
output_dir = "./lernwort-results"

[sources.local]
type = "file"
path = "training-sets"

# Uncomment to train against a Lunes-style server:
# [sources.remote]
# type = "http"
# base_url = "https://lunes.example.org"
# api_key = "${LERNWORT_API_KEY}"
"#;

const EXAMPLE_TRAINING_SET: &str = r#"[training_set]
id = 1
title = "Werkzeuge"
description = "Basic tool vocabulary"

[[documents]]
id = 10
word = "der Hammer"
image = "images/hammer.jpg"
alternates = ["Hammer"]

[[documents]]
id = 11
word = "die Säge"
image = "images/saege.jpg"
audio = "audio/saege.ogg"

[[documents]]
id = 12
word = "der Schraubenzieher"
alternates = ["Schraubenzieher", "der Schraubendreher"]
"#;

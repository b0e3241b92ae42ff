//! The `lernwort train` command: one interactive session on stdin/stdout.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

use lernwort_core::classifier::{ClassifierConfig, Verification};
use lernwort_core::engine::{SessionObserver, Trainer, TrainerConfig};
use lernwort_core::error::SessionError;
use lernwort_core::model::Document;
use lernwort_core::session::{Bucket, Phase, SecondTryHint};
use lernwort_core::stats::{summarize, SessionSummary};
use lernwort_core::traits::WordRepository;
use lernwort_repository::load_config_from;

/// Console renderer for session events.
struct ConsoleObserver;

impl SessionObserver for ConsoleObserver {
    fn on_document_presented(&self, document: &Document) {
        println!();
        println!("Which word is this?");
        if let Some(image) = &document.image {
            println!("  [image: {image}]");
        }
        if let Some(audio) = &document.audio {
            println!("  [audio: {audio}]");
        }
    }

    fn on_answer_graded(&self, verification: &Verification, bucket: Bucket) {
        match bucket {
            Bucket::Correct => println!("  Correct!"),
            Bucket::AlmostCorrect => println!(
                "  Almost! The word was '{}'.",
                verification.matched_reference
            ),
            Bucket::Wrong => println!(
                "  Wrong. The word was '{}'.",
                verification.matched_reference
            ),
        }
    }

    fn on_second_try(&self, hint: &SecondTryHint) {
        if hint.case_sensitive_mistake {
            println!("  Almost! Check your capitalization and try once more.");
        } else {
            println!("  Almost! Try once more.");
        }
    }

    fn on_session_finished(&self, _summary: &SessionSummary) {
        println!("\nLesson complete.");
    }
}

pub async fn execute(
    set: Option<u64>,
    source: Option<String>,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
    save_summary: bool,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let repository = super::open_repository(&config, source)?;

    let set_id = match set {
        Some(id) => id,
        None => choose_set(repository.as_ref()).await?,
    };

    let trainer_config = TrainerConfig {
        classifier: ClassifierConfig {
            almost_threshold: config.almost_threshold,
        },
    };
    let mut trainer = Trainer::new(repository, trainer_config);
    let observer = ConsoleObserver;

    trainer.start_session(set_id, &observer).await?;
    if trainer.session().phase() == Phase::Finished {
        println!("No documents in this training set.");
        return Ok(());
    }

    loop {
        run_pass(&mut trainer, &observer).await?;

        let summary = summarize(trainer.session());
        print_summary(&summary);

        if save_summary {
            let dir = output.clone().unwrap_or_else(|| config.output_dir.clone());
            std::fs::create_dir_all(&dir)?;
            let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
            let path = dir.join(format!("session-{timestamp}.json"));
            summary.save_json(&path)?;
            println!("Summary saved to: {}", path.display());
        }

        if summary.wrong_count + summary.almost_count == 0 {
            break;
        }
        if !prompt_yes_no("Practice your mistakes?")? {
            break;
        }
        match trainer.start_mistake_session(&observer) {
            Ok(()) => continue,
            Err(SessionError::NoMistakes) => {
                println!("Nothing to retry; everything was correct.");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

/// Answer every remaining document until the pass finishes. `!` reveals.
async fn run_pass(trainer: &mut Trainer, observer: &ConsoleObserver) -> Result<()> {
    while trainer.session().in_progress() {
        let answer = read_line("> ")?;
        if answer.trim() == "!" {
            let document = trainer.reveal_answer(observer)?;
            println!("  The word was '{}'.", document.word);
            continue;
        }
        if let Err(e) = trainer.submit_answer(&answer, observer).await {
            // A failed fetch left the session untouched; the same answer
            // can simply be entered again.
            eprintln!("  {e:#}; please try again");
        }
    }
    Ok(())
}

/// List the sets and let the user pick one by id.
async fn choose_set(repository: &dyn WordRepository) -> Result<u64> {
    let sets = repository.list_training_sets().await?;
    anyhow::ensure!(!sets.is_empty(), "no training sets available");

    println!("Available training sets:");
    for set in &sets {
        println!("  {:>4}  {}", set.id, set.title);
    }

    loop {
        let input = read_line("Set id: ")?;
        match input.trim().parse::<u64>() {
            Ok(id) if sets.iter().any(|s| s.id == id) => return Ok(id),
            Ok(id) => println!("No set with id {id}."),
            Err(_) => println!("Please enter a numeric set id."),
        }
    }
}

fn print_summary(summary: &SessionSummary) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Correct", "Almost", "Wrong", "Score"]);
    table.add_row(vec![
        Cell::new(summary.correct_count),
        Cell::new(summary.almost_count),
        Cell::new(summary.wrong_count),
        Cell::new(match summary.percent_correct {
            Some(percent) => format!("{percent}%"),
            None => "-".to_string(),
        }),
    ]);

    println!("\n{table}");
}

fn prompt_yes_no(question: &str) -> Result<bool> {
    let answer = read_line(&format!("{question} [y/N] "))?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    let bytes = std::io::stdin()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    anyhow::ensure!(bytes > 0, "input closed");
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

//! End-to-end session tests driving the trainer against the mock repository.
//!
//! These tests verify the full pipeline (fetch → draw → grade → bucket →
//! summary → mistake pass) without a terminal or a server.

use std::sync::Arc;

use lernwort_core::engine::{NoopObserver, Trainer, TrainerConfig};
use lernwort_core::model::{Document, TrainingSetInfo};
use lernwort_core::session::Phase;
use lernwort_core::stats::summarize;
use lernwort_repository::MockRepository;

fn make_document(id: u64, word: &str) -> Document {
    Document {
        id,
        word: word.to_string(),
        image: None,
        audio: None,
    }
}

fn make_repository(words: &[(u64, &str)]) -> MockRepository {
    MockRepository::new().with_set(
        TrainingSetInfo {
            id: 1,
            title: "Test".into(),
            description: String::new(),
        },
        words.iter().map(|(id, word)| make_document(*id, word)).collect(),
    )
}

#[tokio::test]
async fn e2e_perfect_session() {
    let repository = Arc::new(make_repository(&[(1, "Apfel"), (2, "Baum"), (3, "Hammer")]));
    let mut trainer = Trainer::new(repository, TrainerConfig::default());
    let observer = NoopObserver;

    trainer.start_session(1, &observer).await.unwrap();
    while let Some(document) = trainer.session().current_document() {
        let word = document.word.clone();
        trainer.submit_answer(&word, &observer).await.unwrap();
    }

    let summary = summarize(trainer.session());
    assert_eq!(summary.correct_count, 3);
    assert_eq!(summary.almost_count, 0);
    assert_eq!(summary.wrong_count, 0);
    assert_eq!(summary.percent_correct, Some(100));
}

#[tokio::test]
async fn e2e_alternates_are_honored() {
    let repository = Arc::new(
        make_repository(&[(1, "der Hammer")]).with_alternates(1, &["Hammer", "Fäustel"]),
    );
    let mut trainer = Trainer::new(repository, TrainerConfig::default());
    let observer = NoopObserver;

    trainer.start_session(1, &observer).await.unwrap();
    trainer.submit_answer("Fäustel", &observer).await.unwrap();

    assert_eq!(trainer.session().correct().len(), 1);
    assert_eq!(trainer.session().phase(), Phase::Finished);
}

#[tokio::test]
async fn e2e_second_try_caps_at_almost_correct() {
    let repository = Arc::new(make_repository(&[(1, "Apfel")]));
    let mut trainer = Trainer::new(repository, TrainerConfig::default());
    let observer = NoopObserver;

    trainer.start_session(1, &observer).await.unwrap();
    // Almost valid, then exactly right: still only almost-correct.
    trainer.submit_answer("apfel", &observer).await.unwrap();
    assert_eq!(trainer.session().phase(), Phase::AwaitingSecondTry);
    trainer.submit_answer("Apfel", &observer).await.unwrap();

    let summary = summarize(trainer.session());
    assert_eq!(summary.correct_count, 0);
    assert_eq!(summary.almost_count, 1);
    assert_eq!(summary.percent_correct, Some(100));
}

#[tokio::test]
async fn e2e_mistake_pass_replays_only_mistakes() {
    let repository = Arc::new(make_repository(&[(1, "Apfel"), (2, "Baum"), (3, "Hammer")]));
    let mut trainer = Trainer::new(repository, TrainerConfig::default());
    let observer = NoopObserver;

    trainer.start_session(1, &observer).await.unwrap();
    // Apfel right, everything else revealed.
    while trainer.session().in_progress() {
        let word = trainer.session().current_document().unwrap().word.clone();
        if word == "Apfel" {
            trainer.submit_answer("Apfel", &observer).await.unwrap();
        } else {
            trainer.reveal_answer(&observer).unwrap();
        }
    }
    assert_eq!(summarize(trainer.session()).wrong_count, 2);

    trainer.start_mistake_session(&observer).unwrap();
    let mut replayed = Vec::new();
    while trainer.session().in_progress() {
        let word = trainer.session().current_document().unwrap().word.clone();
        replayed.push(word.clone());
        trainer.submit_answer(&word, &observer).await.unwrap();
    }
    replayed.sort();

    assert_eq!(replayed, vec!["Baum".to_string(), "Hammer".to_string()]);
    let summary = summarize(trainer.session());
    assert_eq!(summary.correct_count, 2);
    assert_eq!(summary.percent_correct, Some(100));
}

#[tokio::test]
async fn e2e_unknown_set_fails_cleanly() {
    let repository = Arc::new(make_repository(&[(1, "Apfel")]));
    let mut trainer = Trainer::new(repository, TrainerConfig::default());
    let observer = NoopObserver;

    let err = trainer.start_session(42, &observer).await.unwrap_err();
    assert!(err.to_string().contains("training set not found"));
    assert_eq!(trainer.session().phase(), Phase::Idle);
}

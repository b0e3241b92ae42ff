//! Trainer orchestration: repository fetches, session transitions, and
//! observer notifications.
//!
//! One trainer drives one session at a time, synchronously with respect to
//! session state: every transition runs to completion before the next one
//! starts, and a failed repository fetch leaves the session untouched so
//! the same transition can simply be retried.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;

use crate::classifier::{ClassifierConfig, Verification};
use crate::error::{RepositoryError, SessionError};
use crate::model::{Document, TrainingSetInfo};
use crate::session::{AnswerOutcome, Bucket, Phase, SecondTryHint, Session};
use crate::stats::{summarize, SessionSummary};
use crate::traits::WordRepository;

/// Configuration for the trainer.
#[derive(Debug, Clone, Default)]
pub struct TrainerConfig {
    /// Grading thresholds.
    pub classifier: ClassifierConfig,
}

/// Rendering seam: notified after every session transition.
pub trait SessionObserver: Send + Sync {
    fn on_document_presented(&self, document: &Document);
    fn on_answer_graded(&self, verification: &Verification, bucket: Bucket);
    fn on_second_try(&self, hint: &SecondTryHint);
    fn on_session_finished(&self, summary: &SessionSummary);
}

/// No-op observer.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_document_presented(&self, _: &Document) {}
    fn on_answer_graded(&self, _: &Verification, _: Bucket) {}
    fn on_second_try(&self, _: &SecondTryHint) {}
    fn on_session_finished(&self, _: &SessionSummary) {}
}

/// Drives training sessions against a word repository.
pub struct Trainer {
    repository: Arc<dyn WordRepository>,
    session: Session,
    /// Alternates fetched so far, keyed by document id. Mistake passes
    /// replay documents, so entries stay valid for the trainer's lifetime.
    alternates: HashMap<u64, Vec<String>>,
}

impl Trainer {
    pub fn new(repository: Arc<dyn WordRepository>, config: TrainerConfig) -> Self {
        Self {
            repository,
            session: Session::new(config.classifier),
            alternates: HashMap::new(),
        }
    }

    /// Read access to the underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// List the available training sets.
    pub async fn list_training_sets(&self) -> Result<Vec<TrainingSetInfo>, RepositoryError> {
        self.repository.list_training_sets().await
    }

    /// Fetch a set's documents and start a fresh session over them.
    ///
    /// An empty set lands the session directly in [`Phase::Finished`]
    /// without emitting any event; discarding an in-progress session is the
    /// caller's decision (check [`Session::in_progress`] first).
    pub async fn start_session(
        &mut self,
        set_id: u64,
        observer: &dyn SessionObserver,
    ) -> Result<()> {
        let documents = self.repository.list_documents(set_id).await?;
        if documents.is_empty() {
            tracing::warn!("training set {set_id} has no documents");
        }
        self.alternates.clear();
        self.session.start(documents);
        self.emit_presented(observer);
        Ok(())
    }

    /// Grade an answer for the current document.
    ///
    /// The document's alternates are fetched lazily on its first grading and
    /// cached; a failed fetch returns before any session mutation, so the
    /// caller may retry the identical call.
    pub async fn submit_answer(
        &mut self,
        text: &str,
        observer: &dyn SessionObserver,
    ) -> Result<()> {
        let document_id = self
            .session
            .current_document()
            .map(|d| d.id)
            .ok_or(SessionError::NoActiveDocument)?;
        let alternates = self.ensure_alternates(document_id).await?;

        let outcome = self.session.submit_answer(text, &alternates)?;
        match &outcome {
            AnswerOutcome::Graded {
                verification,
                bucket,
            } => observer.on_answer_graded(verification, *bucket),
            AnswerOutcome::SecondTry { hint } => observer.on_second_try(hint),
        }
        self.emit_after_transition(observer);
        Ok(())
    }

    /// Give up on the current document; always counts as wrong.
    pub fn reveal_answer(&mut self, observer: &dyn SessionObserver) -> Result<Document> {
        let document = self.session.reveal_answer()?;
        self.emit_after_transition(observer);
        Ok(document)
    }

    /// Start a follow-up pass over the mistakes of the finished pass. Needs
    /// no fetches; the documents are already in memory.
    pub fn start_mistake_session(
        &mut self,
        observer: &dyn SessionObserver,
    ) -> Result<(), SessionError> {
        self.session.start_mistake_session()?;
        self.emit_presented(observer);
        Ok(())
    }

    async fn ensure_alternates(&mut self, document_id: u64) -> Result<Vec<String>, RepositoryError> {
        if let Some(alternates) = self.alternates.get(&document_id) {
            return Ok(alternates.clone());
        }
        let alternates = self.repository.list_alternates(document_id).await?;
        tracing::debug!(
            document_id,
            count = alternates.len(),
            "fetched alternate spellings"
        );
        self.alternates.insert(document_id, alternates.clone());
        Ok(alternates)
    }

    fn emit_presented(&self, observer: &dyn SessionObserver) {
        if let Some(document) = self.session.current_document() {
            observer.on_document_presented(document);
        }
    }

    fn emit_after_transition(&self, observer: &dyn SessionObserver) {
        match self.session.phase() {
            Phase::AwaitingAnswer => self.emit_presented(observer),
            Phase::Finished => observer.on_session_finished(&summarize(&self.session)),
            Phase::AwaitingSecondTry | Phase::Idle => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    /// Test-local repository with injectable alternate-fetch failures.
    struct FlakyRepository {
        documents: Vec<Document>,
        alternates: HashMap<u64, Vec<String>>,
        fail_alternates: AtomicU32,
        alternate_calls: AtomicU32,
    }

    impl FlakyRepository {
        fn new(documents: Vec<Document>) -> Self {
            Self {
                documents,
                alternates: HashMap::new(),
                fail_alternates: AtomicU32::new(0),
                alternate_calls: AtomicU32::new(0),
            }
        }

        fn with_alternates(mut self, document_id: u64, alternates: &[&str]) -> Self {
            self.alternates
                .insert(document_id, alternates.iter().map(|s| s.to_string()).collect());
            self
        }

        fn fail_next_alternates(&self, n: u32) {
            self.fail_alternates.store(n, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl WordRepository for FlakyRepository {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn list_training_sets(&self) -> Result<Vec<TrainingSetInfo>, RepositoryError> {
            Ok(vec![TrainingSetInfo {
                id: 1,
                title: "Test".into(),
                description: String::new(),
            }])
        }

        async fn list_documents(&self, _set_id: u64) -> Result<Vec<Document>, RepositoryError> {
            Ok(self.documents.clone())
        }

        async fn list_alternates(&self, document_id: u64) -> Result<Vec<String>, RepositoryError> {
            self.alternate_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_alternates.load(Ordering::SeqCst) > 0 {
                self.fail_alternates.fetch_sub(1, Ordering::SeqCst);
                return Err(RepositoryError::NetworkError("connection reset".into()));
            }
            Ok(self.alternates.get(&document_id).cloned().unwrap_or_default())
        }
    }

    /// Observer that records event names in order.
    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<String>>,
    }

    impl RecordingObserver {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl SessionObserver for RecordingObserver {
        fn on_document_presented(&self, document: &Document) {
            self.events
                .lock()
                .unwrap()
                .push(format!("presented:{}", document.id));
        }
        fn on_answer_graded(&self, _: &Verification, bucket: Bucket) {
            self.events.lock().unwrap().push(format!("graded:{bucket:?}"));
        }
        fn on_second_try(&self, _: &SecondTryHint) {
            self.events.lock().unwrap().push("second_try".into());
        }
        fn on_session_finished(&self, summary: &SessionSummary) {
            self.events
                .lock()
                .unwrap()
                .push(format!("finished:{}", summary.correct_count));
        }
    }

    fn make_documents(words: &[&str]) -> Vec<Document> {
        words
            .iter()
            .enumerate()
            .map(|(i, word)| Document {
                id: i as u64 + 1,
                word: word.to_string(),
                image: None,
                audio: None,
            })
            .collect()
    }

    #[tokio::test]
    async fn full_session_emits_events_in_order() {
        let repository = Arc::new(FlakyRepository::new(make_documents(&["Apfel"])));
        let mut trainer = Trainer::new(repository, TrainerConfig::default());
        let observer = RecordingObserver::default();

        trainer.start_session(1, &observer).await.unwrap();
        trainer.submit_answer("Apfel", &observer).await.unwrap();

        assert_eq!(
            observer.events(),
            vec!["presented:1", "graded:Correct", "finished:1"]
        );
        assert_eq!(trainer.session().phase(), Phase::Finished);
    }

    #[tokio::test]
    async fn empty_set_finishes_without_events() {
        let repository = Arc::new(FlakyRepository::new(vec![]));
        let mut trainer = Trainer::new(repository, TrainerConfig::default());
        let observer = RecordingObserver::default();

        trainer.start_session(1, &observer).await.unwrap();
        assert_eq!(trainer.session().phase(), Phase::Finished);
        assert!(observer.events().is_empty());
    }

    #[tokio::test]
    async fn alternate_exact_match_counts_as_correct() {
        let repository = Arc::new(
            FlakyRepository::new(make_documents(&["der Hammer"]))
                .with_alternates(1, &["Hammer"]),
        );
        let mut trainer = Trainer::new(repository, TrainerConfig::default());
        let observer = RecordingObserver::default();

        trainer.start_session(1, &observer).await.unwrap();
        trainer.submit_answer("Hammer", &observer).await.unwrap();

        assert_eq!(trainer.session().correct().len(), 1);
    }

    #[tokio::test]
    async fn failed_alternate_fetch_is_retryable() {
        let repository = Arc::new(FlakyRepository::new(make_documents(&["Apfel"])));
        repository.fail_next_alternates(1);
        let mut trainer = Trainer::new(
            {
                let repo: Arc<dyn WordRepository> = repository.clone();
                repo
            },
            TrainerConfig::default(),
        );
        let observer = RecordingObserver::default();

        trainer.start_session(1, &observer).await.unwrap();

        // First submit fails on the fetch; no state changed.
        let err = trainer.submit_answer("Apfel", &observer).await.unwrap_err();
        assert!(err
            .downcast_ref::<RepositoryError>()
            .is_some_and(RepositoryError::is_transient));
        assert_eq!(trainer.session().phase(), Phase::AwaitingAnswer);
        assert_eq!(trainer.session().presented(), 0);

        // The identical retry succeeds.
        trainer.submit_answer("Apfel", &observer).await.unwrap();
        assert_eq!(trainer.session().correct().len(), 1);
    }

    #[tokio::test]
    async fn alternates_are_fetched_once_per_document() {
        let repository = Arc::new(FlakyRepository::new(make_documents(&["Apfel"])));
        let mut trainer = Trainer::new(
            {
                let repo: Arc<dyn WordRepository> = repository.clone();
                repo
            },
            TrainerConfig::default(),
        );
        let observer = NoopObserver;

        trainer.start_session(1, &observer).await.unwrap();
        // Almost-valid first answer, then the second try: same document,
        // one fetch.
        trainer.submit_answer("apfel", &observer).await.unwrap();
        trainer.submit_answer("Apfel", &observer).await.unwrap();

        assert_eq!(repository.alternate_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn second_try_flow_emits_hint_then_grade() {
        let repository = Arc::new(FlakyRepository::new(make_documents(&["Apfel"])));
        let mut trainer = Trainer::new(repository, TrainerConfig::default());
        let observer = RecordingObserver::default();

        trainer.start_session(1, &observer).await.unwrap();
        trainer.submit_answer("apfel", &observer).await.unwrap();
        assert_eq!(trainer.session().phase(), Phase::AwaitingSecondTry);
        trainer.submit_answer("Apfel", &observer).await.unwrap();

        assert_eq!(
            observer.events(),
            vec![
                "presented:1",
                "second_try",
                "graded:AlmostCorrect",
                "finished:0"
            ]
        );
    }

    #[tokio::test]
    async fn mistake_session_runs_without_fetches() {
        let repository = Arc::new(FlakyRepository::new(make_documents(&["Apfel", "Baum"])));
        let mut trainer = Trainer::new(
            {
                let repo: Arc<dyn WordRepository> = repository.clone();
                repo
            },
            TrainerConfig::default(),
        );
        let observer = NoopObserver;

        trainer.start_session(1, &observer).await.unwrap();
        while trainer.session().in_progress() {
            trainer.reveal_answer(&observer).unwrap();
        }
        let calls_before = repository.alternate_calls.load(Ordering::SeqCst);

        trainer.start_mistake_session(&observer).unwrap();
        assert_eq!(trainer.session().phase(), Phase::AwaitingAnswer);
        assert_eq!(
            repository.alternate_calls.load(Ordering::SeqCst),
            calls_before
        );
    }

    #[tokio::test]
    async fn mistake_session_without_mistakes_fails() {
        let repository = Arc::new(FlakyRepository::new(make_documents(&["Apfel"])));
        let mut trainer = Trainer::new(repository, TrainerConfig::default());
        let observer = NoopObserver;

        trainer.start_session(1, &observer).await.unwrap();
        trainer.submit_answer("Apfel", &observer).await.unwrap();

        assert_eq!(
            trainer.start_mistake_session(&observer),
            Err(SessionError::NoMistakes)
        );
    }
}

//! The training-session state machine.
//!
//! One session owns one deck plus the three result buckets and processes
//! one answer at a time. All methods are synchronous and free of I/O; the
//! trainer in [`crate::engine`] layers repository fetches and observer
//! notifications on top.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::classifier::{classify, AnswerStatus, ClassifierConfig, Verification};
use crate::deck::Deck;
use crate::error::SessionError;
use crate::model::Document;

/// Where a graded document lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Correct,
    AlmostCorrect,
    Wrong,
}

/// The session's lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No session has been started (or the session was reset).
    Idle,
    /// A document is presented and awaiting a first answer.
    AwaitingAnswer,
    /// The first answer was almost valid; one retry is granted.
    AwaitingSecondTry,
    /// The deck is exhausted; the summary is available.
    Finished,
}

/// Context preserved for the one-time retry after an almost-valid answer.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondTryHint {
    /// The text the user entered on the first attempt.
    pub first_answer: String,
    /// The reference the first attempt came closest to.
    pub matched_reference: String,
    /// Whether the first attempt differed from the reference only in case.
    pub case_sensitive_mistake: bool,
}

/// What happened to an answer.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    /// The document was graded and placed in a bucket.
    Graded {
        verification: Verification,
        bucket: Bucket,
    },
    /// The first attempt was almost valid; a second try is awaited.
    SecondTry { hint: SecondTryHint },
}

/// One training session: deck, buckets, and the document awaiting an answer.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    deck: Deck,
    correct: Vec<Document>,
    almost_correct: Vec<Document>,
    wrong: Vec<Document>,
    current: Option<Document>,
    second_try: Option<SecondTryHint>,
    phase: Phase,
    classifier: ClassifierConfig,
}

impl Session {
    pub fn new(classifier: ClassifierConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            deck: Deck::default(),
            correct: Vec::new(),
            almost_correct: Vec::new(),
            wrong: Vec::new(),
            current: None,
            second_try: None,
            phase: Phase::Idle,
            classifier,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The document currently awaiting an answer, if any.
    pub fn current_document(&self) -> Option<&Document> {
        self.current.as_ref()
    }

    /// The hint preserved from an almost-valid first attempt.
    pub fn second_try_hint(&self) -> Option<&SecondTryHint> {
        self.second_try.as_ref()
    }

    pub fn correct(&self) -> &[Document] {
        &self.correct
    }

    pub fn almost_correct(&self) -> &[Document] {
        &self.almost_correct
    }

    pub fn wrong(&self) -> &[Document] {
        &self.wrong
    }

    /// Documents graded so far in this pass.
    pub fn presented(&self) -> usize {
        self.correct.len() + self.almost_correct.len() + self.wrong.len()
    }

    /// True while a pass has drawn progress that `start` would discard.
    /// Confirmation before discarding is the caller's responsibility; the
    /// session does not enforce it.
    pub fn in_progress(&self) -> bool {
        matches!(self.phase, Phase::AwaitingAnswer | Phase::AwaitingSecondTry)
    }

    /// Start a fresh pass over `documents`, discarding any prior state.
    ///
    /// The first document is drawn immediately; an empty input lands the
    /// session directly in [`Phase::Finished`].
    pub fn start(&mut self, documents: Vec<Document>) {
        self.id = Uuid::new_v4();
        self.started_at = Utc::now();
        self.correct.clear();
        self.almost_correct.clear();
        self.wrong.clear();
        self.current = None;
        self.second_try = None;
        self.deck = Deck::new(documents);
        self.advance();
    }

    /// Return to [`Phase::Idle`], dropping all session state.
    pub fn reset(&mut self) {
        self.deck = Deck::default();
        self.correct.clear();
        self.almost_correct.clear();
        self.wrong.clear();
        self.current = None;
        self.second_try = None;
        self.phase = Phase::Idle;
    }

    /// Grade an answer for the current document.
    ///
    /// A first attempt that is almost valid does not bucket the document;
    /// it grants one second try. The second verdict is final: invalid goes
    /// to the wrong bucket, anything else to almost-correct: a document
    /// that needed two attempts never counts as fully correct.
    pub fn submit_answer(
        &mut self,
        text: &str,
        alternates: &[String],
    ) -> Result<AnswerOutcome, SessionError> {
        let document = self
            .current
            .clone()
            .ok_or(SessionError::NoActiveDocument)?;
        let verification = classify(text, &document.word, alternates, &self.classifier);

        match self.phase {
            Phase::AwaitingAnswer => match verification.status {
                AnswerStatus::Valid => Ok(self.settle(document, Bucket::Correct, verification)),
                AnswerStatus::Invalid => Ok(self.settle(document, Bucket::Wrong, verification)),
                AnswerStatus::AlmostValid => {
                    let hint = SecondTryHint {
                        first_answer: text.to_string(),
                        matched_reference: verification.matched_reference.clone(),
                        case_sensitive_mistake: verification.case_sensitive_mistake,
                    };
                    self.second_try = Some(hint.clone());
                    self.phase = Phase::AwaitingSecondTry;
                    Ok(AnswerOutcome::SecondTry { hint })
                }
            },
            Phase::AwaitingSecondTry => {
                let bucket = match verification.status {
                    AnswerStatus::Invalid => Bucket::Wrong,
                    AnswerStatus::Valid | AnswerStatus::AlmostValid => Bucket::AlmostCorrect,
                };
                Ok(self.settle(document, bucket, verification))
            }
            Phase::Idle | Phase::Finished => Err(SessionError::NoActiveDocument),
        }
    }

    /// Give up on the current document. Always counts as wrong, regardless
    /// of any prior almost-valid verdict. Returns the revealed document.
    pub fn reveal_answer(&mut self) -> Result<Document, SessionError> {
        let document = self.current.take().ok_or(SessionError::NoActiveDocument)?;
        self.wrong.push(document.clone());
        self.advance();
        Ok(document)
    }

    /// Start a follow-up pass over the wrong and almost-correct buckets
    /// (wrong first). Only valid once the current pass is finished.
    pub fn start_mistake_session(&mut self) -> Result<(), SessionError> {
        if self.phase != Phase::Finished {
            return Err(SessionError::SessionInProgress);
        }
        if self.wrong.is_empty() && self.almost_correct.is_empty() {
            return Err(SessionError::NoMistakes);
        }
        let mut documents = std::mem::take(&mut self.wrong);
        documents.append(&mut self.almost_correct);
        self.start(documents);
        Ok(())
    }

    fn settle(
        &mut self,
        document: Document,
        bucket: Bucket,
        verification: Verification,
    ) -> AnswerOutcome {
        match bucket {
            Bucket::Correct => self.correct.push(document),
            Bucket::AlmostCorrect => self.almost_correct.push(document),
            Bucket::Wrong => self.wrong.push(document),
        }
        self.current = None;
        self.advance();
        AnswerOutcome::Graded {
            verification,
            bucket,
        }
    }

    /// Draw the next document, or finish the pass when the deck is empty.
    /// An empty deck is recovered locally; it never surfaces as an error.
    fn advance(&mut self) {
        self.second_try = None;
        match self.deck.draw() {
            Ok(document) => {
                self.current = Some(document);
                self.phase = Phase::AwaitingAnswer;
            }
            Err(_) => {
                self.current = None;
                self.phase = Phase::Finished;
            }
        }
    }
}

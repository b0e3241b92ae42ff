//! The pool of not-yet-asked documents for the current pass.

use rand::Rng;

use crate::error::SessionError;
use crate::model::Document;

/// A mutable multiset of documents remaining to be asked. Drawing removes a
/// uniformly random document; a drawn document cannot come up again in the
/// same pass.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    documents: Vec<Document>,
}

impl Deck {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Remove and return a random remaining document. Each remaining
    /// document is equally likely; no other ordering is guaranteed.
    pub fn draw(&mut self) -> Result<Document, SessionError> {
        if self.documents.is_empty() {
            return Err(SessionError::EmptyDeck);
        }
        let index = rand::thread_rng().gen_range(0..self.documents.len());
        Ok(self.documents.swap_remove(index))
    }

    /// Number of documents not yet drawn.
    pub fn remaining(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

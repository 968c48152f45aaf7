use std::sync::Arc;

use quiz_core::model::FinalResult;
use storage::SessionStore;

use crate::Clock;
use crate::error::QuizError;
use crate::shuffle::AnswerShuffler;
use super::session::{AdvanceOutcome, QuizSession, SelectOutcome};

/// What the caller should do after advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    /// Show question `index`.
    Continue { index: usize },
    /// The result is stored; leave the quiz screen.
    Finished,
    /// Nothing changed.
    Ignored,
}

/// Orchestrates quiz start and the persisted hand-off of the final result.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    store: SessionStore,
    shuffler: Arc<dyn AnswerShuffler>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, store: SessionStore, shuffler: Arc<dyn AnswerShuffler>) -> Self {
        Self {
            clock,
            store,
            shuffler,
        }
    }

    /// Start a quiz run from the pending batch.
    ///
    /// Starting again without a new fetch replays the same batch. A missing batch
    /// yields a session in `NoData`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the store cannot be read.
    pub async fn start_session(&self) -> Result<QuizSession, QuizError> {
        let batch = self.store.take_pending_batch().await?;
        let session = QuizSession::from_batch(batch, self.shuffler.as_ref());
        tracing::info!(
            phase = ?session.phase(),
            questions = session.questions().len(),
            "quiz session started"
        );
        Ok(session)
    }

    /// Commit an answer for the active question.
    pub fn select_answer(&self, session: &mut QuizSession, chosen: &str) -> SelectOutcome {
        let outcome = session.select_answer(chosen);
        if let SelectOutcome::Committed(record) = &outcome {
            tracing::debug!(correct = record.was_correct, "answer committed");
        }
        outcome
    }

    /// Advance past question `index` and persist the result when the quiz completes.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the final result cannot be written. The session
    /// is complete regardless; call `finalize_result` to retry the write.
    pub async fn advance(
        &self,
        session: &mut QuizSession,
        index: usize,
    ) -> Result<QuizStep, QuizError> {
        match session.advance(index, self.clock.now()) {
            AdvanceOutcome::Next { index } => Ok(QuizStep::Continue { index }),
            AdvanceOutcome::Ignored => Ok(QuizStep::Ignored),
            AdvanceOutcome::Completed(result) => {
                if !session.result_saved() {
                    self.store.put_final_result(&result).await?;
                    session.mark_result_saved();
                    tracing::info!(
                        correct = result.correct(),
                        wrong = result.wrong(),
                        "quiz result saved"
                    );
                }
                Ok(QuizStep::Finished)
            }
        }
    }

    /// Retry result persistence after a completed quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoData` if the session has not completed.
    /// Returns `QuizError::Storage` if persistence fails.
    pub async fn finalize_result(&self, session: &mut QuizSession) -> Result<FinalResult, QuizError> {
        let result = session.final_result().cloned().ok_or(QuizError::NoData)?;
        if !session.result_saved() {
            self.store.put_final_result(&result).await?;
            session.mark_result_saved();
        }
        Ok(result)
    }
}

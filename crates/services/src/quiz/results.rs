use quiz_core::model::FinalResult;
use storage::SessionStore;

use crate::error::QuizError;

/// Read access to the most recently completed quiz.
#[derive(Clone)]
pub struct QuizResultService {
    store: SessionStore,
}

impl QuizResultService {
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// The latest stored result, or `None` if no quiz was completed yet.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the store cannot be read.
    pub async fn latest_result(&self) -> Result<Option<FinalResult>, QuizError> {
        Ok(self.store.take_final_result().await?)
    }
}

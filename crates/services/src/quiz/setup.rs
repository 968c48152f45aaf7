use std::sync::Arc;

use quiz_core::model::{Category, QuizFilters};
use storage::SessionStore;

use crate::error::QuizError;
use crate::trivia::QuestionSource;

/// Fetches categories and question batches ahead of a quiz run.
#[derive(Clone)]
pub struct QuizSetupService {
    source: Arc<dyn QuestionSource>,
    store: SessionStore,
}

impl QuizSetupService {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>, store: SessionStore) -> Self {
        Self { source, store }
    }

    /// Categories for the selection form; an unavailable source yields an empty list.
    pub async fn load_categories(&self) -> Vec<Category> {
        match self.source.list_categories().await {
            Ok(categories) => categories,
            Err(err) => {
                tracing::warn!(error = %err, "category list unavailable");
                Vec::new()
            }
        }
    }

    /// Fetch a batch for `filters` and store it as the pending batch.
    ///
    /// Nothing is stored when the fetch fails.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::SourceUnavailable` if the batch cannot be fetched and
    /// `QuizError::Storage` if it cannot be stored.
    pub async fn prepare_quiz(&self, filters: &QuizFilters) -> Result<usize, QuizError> {
        let batch = self.source.fetch_question_batch(filters).await.map_err(|err| {
            tracing::warn!(error = %err, ?filters, "question batch unavailable");
            QuizError::SourceUnavailable(err)
        })?;
        self.store.put_pending_batch(&batch).await?;
        tracing::info!(?filters, questions = batch.len(), "quiz prepared");
        Ok(batch.len())
    }

    /// Prepare a quiz with no filters.
    ///
    /// # Errors
    ///
    /// See [`QuizSetupService::prepare_quiz`].
    pub async fn prepare_random_quiz(&self) -> Result<usize, QuizError> {
        self.prepare_quiz(&QuizFilters::any()).await
    }
}

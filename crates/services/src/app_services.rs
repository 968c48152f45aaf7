use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::quiz::{QuizLoopService, QuizResultService, QuizSetupService};
use crate::shuffle::AnswerShuffler;
use crate::trivia::{QuestionSource, TriviaClient, TriviaConfig};

/// Assembles app-facing quiz services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    quiz_setup: Arc<QuizSetupService>,
    quiz_loop: Arc<QuizLoopService>,
    quiz_results: Arc<QuizResultService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the HTTP trivia client.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        trivia: TriviaConfig,
        shuffler: Arc<dyn AnswerShuffler>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let source: Arc<dyn QuestionSource> = Arc::new(TriviaClient::new(trivia));
        Ok(Self::from_parts(clock, &storage, source, shuffler))
    }

    /// Build services from already constructed parts.
    #[must_use]
    pub fn from_parts(
        clock: Clock,
        storage: &Storage,
        source: Arc<dyn QuestionSource>,
        shuffler: Arc<dyn AnswerShuffler>,
    ) -> Self {
        let store = storage.session_store();
        Self {
            quiz_setup: Arc::new(QuizSetupService::new(source, store.clone())),
            quiz_loop: Arc::new(QuizLoopService::new(clock, store.clone(), shuffler)),
            quiz_results: Arc::new(QuizResultService::new(store)),
        }
    }

    #[must_use]
    pub fn quiz_setup(&self) -> Arc<QuizSetupService> {
        Arc::clone(&self.quiz_setup)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn quiz_results(&self) -> Arc<QuizResultService> {
        Arc::clone(&self.quiz_results)
    }
}

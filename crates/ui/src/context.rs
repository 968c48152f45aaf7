use std::sync::Arc;

use services::{QuizLoopService, QuizResultService, QuizSetupService};

pub trait UiApp: Send + Sync {
    fn quiz_setup(&self) -> Arc<QuizSetupService>;
    fn quiz_loop(&self) -> Arc<QuizLoopService>;
    fn quiz_results(&self) -> Arc<QuizResultService>;
}

#[derive(Clone)]
pub struct AppContext {
    quiz_setup: Arc<QuizSetupService>,
    quiz_loop: Arc<QuizLoopService>,
    quiz_results: Arc<QuizResultService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz_setup: app.quiz_setup(),
            quiz_loop: app.quiz_loop(),
            quiz_results: app.quiz_results(),
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

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

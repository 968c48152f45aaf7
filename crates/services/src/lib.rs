#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod quiz;
pub mod shuffle;
pub mod trivia;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, QuizError, SourceError};
pub use quiz::{
    AdvanceOutcome, QuizLoopService, QuizPhase, QuizProgress, QuizResultService, QuizSession,
    QuizSetupService, QuizStep, SelectOutcome,
};
pub use shuffle::{AnswerShuffler, KeepOrder, RandomShuffler, SeededShuffler};
pub use trivia::{QuestionSource, TriviaClient, TriviaConfig};

mod progress;
mod results;
mod session;
mod setup;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use progress::QuizProgress;
pub use results::QuizResultService;
pub use session::{AdvanceOutcome, QuizPhase, QuizSession, SelectOutcome};
pub use setup::QuizSetupService;
pub use workflow::{QuizLoopService, QuizStep};

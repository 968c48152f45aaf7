mod category;
mod filters;
mod ids;
mod question;
mod result;
mod score;

pub use category::Category;
pub use filters::{BATCH_SIZE, Difficulty, QuestionType, QuizFilters};
pub use ids::CategoryId;
pub use question::{PresentedQuestion, Question};
pub use result::{EXCELLENT_THRESHOLD, FinalResult, GOOD_THRESHOLD, Performance};
pub use score::{AnswerRecord, SessionScore};

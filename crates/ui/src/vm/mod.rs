mod home_vm;
mod html;
mod quiz_vm;
mod result_vm;
mod time_fmt;

pub use home_vm::{
    QuizSelection, SelectOption, category_options, difficulty_options, prepare_quiz,
    question_type_options,
};
pub use html::sanitize_html;
pub use quiz_vm::{
    AnswerOptionVm, FeedbackVm, OptionState, QuizIntent, QuizVm, start_quiz,
};
pub use result_vm::{
    AnswerReviewVm, ResultVm, load_latest_result, map_result, performance_message,
};
pub use time_fmt::format_datetime;

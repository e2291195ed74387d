mod answers;
mod question;

pub use answers::AnswerMap;
pub use question::{MIN_OPTIONS, Question, QuestionFault, QuestionSet, SetError};
pub(crate) use question::is_blank;

/// Which screen the app is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Choosing or authoring a question set.
    Importing,
    /// Selecting answers for a loaded set.
    Answering,
    /// Attempt submitted; answers are frozen.
    Graded,
}

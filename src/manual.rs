//! Building a question set by hand, one question at a time.

use thiserror::Error;
use tracing::debug;

use crate::models::{MIN_OPTIONS, Question, QuestionFault, QuestionSet};

/// Most options a hand-written question may have.
pub const MAX_OPTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("a question can have at most 5 options")]
    TooManyOptions,
    #[error("a question needs at least 2 options")]
    TooFewOptions,
    #[error("no option {}", .0 + 1)]
    NoSuchOption(usize),
    #[error("no question {}", .0 + 1)]
    NoSuchQuestion(usize),
    #[error("question cannot be added: {0}")]
    Invalid(QuestionFault),
    #[error("add at least one question first")]
    NoQuestions,
}

/// What happened to the correct answer when an option was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionRemoval {
    /// The removed option came after the correct one.
    Unchanged,
    /// The correct option moved down one place.
    Shifted,
    /// The correct option itself was removed; the first option is now
    /// marked correct and should be re-confirmed.
    Reset,
}

/// The question currently being written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    text: String,
    options: Vec<String>,
    correct_index: usize,
}

impl Default for QuestionDraft {
    fn default() -> Self {
        Self {
            text: String::new(),
            options: vec![String::new(); MIN_OPTIONS],
            correct_index: 0,
        }
    }
}

impl QuestionDraft {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    pub fn option_mut(&mut self, index: usize) -> Result<&mut String, DraftError> {
        self.options
            .get_mut(index)
            .ok_or(DraftError::NoSuchOption(index))
    }

    pub fn update_option(&mut self, index: usize, text: impl Into<String>) -> Result<(), DraftError> {
        *self.option_mut(index)? = text.into();
        Ok(())
    }

    pub fn add_option(&mut self) -> Result<usize, DraftError> {
        if self.options.len() >= MAX_OPTIONS {
            return Err(DraftError::TooManyOptions);
        }
        self.options.push(String::new());
        Ok(self.options.len() - 1)
    }

    pub fn remove_option(&mut self, index: usize) -> Result<OptionRemoval, DraftError> {
        if index >= self.options.len() {
            return Err(DraftError::NoSuchOption(index));
        }
        if self.options.len() <= MIN_OPTIONS {
            return Err(DraftError::TooFewOptions);
        }
        self.options.remove(index);

        let removal = if index < self.correct_index {
            self.correct_index -= 1;
            OptionRemoval::Shifted
        } else if index == self.correct_index {
            self.correct_index = 0;
            OptionRemoval::Reset
        } else {
            OptionRemoval::Unchanged
        };
        debug!(index, correct = self.correct_index, ?removal, "option removed");
        Ok(removal)
    }

    pub fn mark_correct(&mut self, index: usize) -> Result<(), DraftError> {
        if index >= self.options.len() {
            return Err(DraftError::NoSuchOption(index));
        }
        self.correct_index = index;
        Ok(())
    }

    /// True when every field is filled in.
    pub fn is_ready(&self) -> bool {
        self.to_question().is_ok()
    }

    fn to_question(&self) -> Result<Question, DraftError> {
        if self.options.len() > MAX_OPTIONS {
            return Err(DraftError::TooManyOptions);
        }
        Question::new(
            self.text.trim(),
            self.options.iter().map(|o| o.trim().to_string()).collect(),
            self.correct_index,
        )
        .map_err(DraftError::Invalid)
    }
}

/// Collects hand-written questions until the user finishes.
#[derive(Debug, Clone, Default)]
pub struct ManualSetBuilder {
    questions: Vec<Question>,
    draft: QuestionDraft,
}

impl ManualSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn draft(&self) -> &QuestionDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut QuestionDraft {
        &mut self.draft
    }

    /// Validate the draft and append it. On failure the draft is kept as is.
    pub fn add_question(&mut self) -> Result<&Question, DraftError> {
        let question = self.draft.to_question()?;
        self.questions.push(question);
        self.draft = QuestionDraft::default();
        debug!(count = self.questions.len(), "manual question added");
        Ok(&self.questions[self.questions.len() - 1])
    }

    pub fn remove_question(&mut self, index: usize) -> Result<Question, DraftError> {
        if index >= self.questions.len() {
            return Err(DraftError::NoSuchQuestion(index));
        }
        Ok(self.questions.remove(index))
    }

    /// The finished set. The builder keeps its questions so a failed save
    /// can be retried.
    pub fn finish(&self) -> Result<QuestionSet, DraftError> {
        if self.questions.is_empty() {
            return Err(DraftError::NoQuestions);
        }
        QuestionSet::new(self.questions.clone()).map_err(|_| DraftError::NoQuestions)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

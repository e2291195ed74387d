use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest number of options a question may offer.
pub const MIN_OPTIONS: usize = 2;

/// A rule a single question breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuestionFault {
    #[error("missing text")]
    MissingText,
    #[error("needs at least 2 options")]
    TooFewOptions,
    #[error("invalid correct-answer index")]
    InvalidCorrectIndex,
    /// Carries the 0-based option index; displayed 1-based.
    #[error("option {} is empty", .0 + 1)]
    EmptyOption(usize),
}

/// A validated multiple-choice question.
///
/// Serialized with the same field names the YAML import uses, so a stored
/// set reads like an imported one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    text: String,
    options: Vec<String>,
    #[serde(rename = "correct")]
    correct_index: usize,
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
    ) -> Result<Self, QuestionFault> {
        let question = Self {
            text: text.into(),
            options,
            correct_index,
        };
        question.check()?;
        Ok(question)
    }

    /// Checks the invariants in the order the importer reports them.
    pub(crate) fn check(&self) -> Result<(), QuestionFault> {
        if is_blank(&self.text) {
            return Err(QuestionFault::MissingText);
        }
        if self.options.len() < MIN_OPTIONS {
            return Err(QuestionFault::TooFewOptions);
        }
        if self.correct_index >= self.options.len() {
            return Err(QuestionFault::InvalidCorrectIndex);
        }
        if let Some(index) = self.options.iter().position(|option| is_blank(option)) {
            return Err(QuestionFault::EmptyOption(index));
        }
        Ok(())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct_index
    }
}

pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Why a list of questions could not become a [`QuestionSet`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetError {
    #[error("question set is empty")]
    Empty,
    #[error("question {}: {fault}", .index + 1)]
    Question { index: usize, fault: QuestionFault },
}

/// A non-empty, ordered list of validated questions.
///
/// There is no way to mutate a set once built; a new import replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Question>", into = "Vec<Question>")]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Result<Self, SetError> {
        if questions.is_empty() {
            return Err(SetError::Empty);
        }
        for (index, question) in questions.iter().enumerate() {
            question
                .check()
                .map_err(|fault| SetError::Question { index, fault })?;
        }
        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

impl Index<usize> for QuestionSet {
    type Output = Question;

    fn index(&self, index: usize) -> &Question {
        &self.questions[index]
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

impl TryFrom<Vec<Question>> for QuestionSet {
    type Error = SetError;

    fn try_from(questions: Vec<Question>) -> Result<Self, Self::Error> {
        Self::new(questions)
    }
}

impl From<QuestionSet> for Vec<Question> {
    fn from(set: QuestionSet) -> Self {
        set.questions
    }
}

impl fmt::Display for QuestionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.len() == 1 { "question" } else { "questions" };
        write!(f, "{} {}", self.len(), noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_question_invariants() {
        assert!(Question::new("2+2?", options(&["3", "4"]), 1).is_ok());
        assert_eq!(
            Question::new("   ", options(&["3", "4"]), 1),
            Err(QuestionFault::MissingText)
        );
        assert_eq!(
            Question::new("2+2?", options(&["4"]), 0),
            Err(QuestionFault::TooFewOptions)
        );
        assert_eq!(
            Question::new("2+2?", options(&["3", "4"]), 2),
            Err(QuestionFault::InvalidCorrectIndex)
        );
        assert_eq!(
            Question::new("2+2?", options(&["3", ""]), 0),
            Err(QuestionFault::EmptyOption(1))
        );
    }

    #[test]
    fn test_fault_messages() {
        assert_eq!(QuestionFault::EmptyOption(0).to_string(), "option 1 is empty");
        let err = SetError::Question {
            index: 1,
            fault: QuestionFault::TooFewOptions,
        };
        assert_eq!(err.to_string(), "question 2: needs at least 2 options");
    }

    #[test]
    fn test_empty_set_rejected() {
        assert_eq!(QuestionSet::new(Vec::new()), Err(SetError::Empty));
    }

    #[test]
    fn test_deserialize_revalidates() {
        let json = r#"[{"question":"Q","options":["a","b"],"correct":5}]"#;
        assert!(serde_json::from_str::<QuestionSet>(json).is_err());

        let json = r#"[{"question":"Q","options":["a","b"],"correct":1}]"#;
        let set: QuestionSet = serde_json::from_str(json).unwrap();
        assert_eq!(set[0].correct_option(), "b");
        assert_eq!(set.to_string(), "1 question");
    }
}

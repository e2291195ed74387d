//! YAML question-set importer.
//!
//! The document is first read into an untyped [`serde_yaml::Value`] so each
//! structural rule can be reported on its own, then converted into the typed
//! [`QuestionSet`]. Nothing untyped leaves this module.

use serde_yaml::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::{MIN_OPTIONS, Question, QuestionFault, QuestionSet, is_blank};

/// Why an import was rejected. Only the first violation is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The text is not valid YAML.
    #[error("invalid YAML: {0}")]
    Parse(String),

    /// The top level has no usable `questions` list.
    #[error("missing or invalid questions list")]
    Structure,

    /// One question breaks a rule. `index` is 0-based; the message is 1-based.
    #[error("question {}: {fault}", .index + 1)]
    Question { index: usize, fault: QuestionFault },
}

impl ImportError {
    /// 1-based number of the offending question, if any.
    pub fn question_number(&self) -> Option<usize> {
        match self {
            ImportError::Question { index, .. } => Some(index + 1),
            _ => None,
        }
    }
}

/// Parse and validate a YAML question set.
///
/// The text may come from a file, the editor, or the remote catalog; its
/// origin makes no difference here.
pub fn parse_question_set(raw: &str) -> Result<QuestionSet, ImportError> {
    let document: Value =
        serde_yaml::from_str(raw).map_err(|e| ImportError::Parse(e.to_string()))?;

    let entries = document
        .get("questions")
        .and_then(Value::as_sequence)
        .filter(|entries| !entries.is_empty())
        .ok_or(ImportError::Structure)?;

    let mut questions = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let question =
            parse_question(entry).map_err(|fault| ImportError::Question { index, fault })?;
        questions.push(question);
    }

    debug!(count = questions.len(), "question set parsed");

    // Each question already passed `Question::new` and the list is non-empty.
    QuestionSet::new(questions).map_err(|_| ImportError::Structure)
}

fn parse_question(entry: &Value) -> Result<Question, QuestionFault> {
    let text = entry
        .get("question")
        .and_then(scalar_text)
        .filter(|text| !is_blank(text))
        .ok_or(QuestionFault::MissingText)?;

    let options = entry
        .get("options")
        .and_then(Value::as_sequence)
        .filter(|options| options.len() >= MIN_OPTIONS)
        .ok_or(QuestionFault::TooFewOptions)?;

    let correct_index = entry
        .get("correct")
        .and_then(Value::as_u64)
        .and_then(|index| usize::try_from(index).ok())
        .filter(|index| *index < options.len())
        .ok_or(QuestionFault::InvalidCorrectIndex)?;

    let options = options
        .iter()
        .enumerate()
        .map(|(index, option)| scalar_text(option).ok_or(QuestionFault::EmptyOption(index)))
        .collect::<Result<Vec<_>, _>>()?;

    Question::new(text, options, correct_index)
}

/// Text form of a scalar. Authors write `- 4` for an option, which YAML
/// reads as a number.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
questions:
  - question: What is the capital of Poland?
    options:
      - Krakow
      - Warsaw
      - Poznan
    correct: 1 # Warsaw
  - question: Square root of 16?
    options: [2, 4, 8, 16]
    correct: 1
"#;

    fn question_fault(raw: &str) -> (usize, QuestionFault) {
        match parse_question_set(raw) {
            Err(ImportError::Question { index, fault }) => (index, fault),
            other => panic!("expected a question error, got {other:?}"),
        }
    }

    #[test]
    fn test_parses_sample_in_order() {
        let set = parse_question_set(SAMPLE).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set[0].text(), "What is the capital of Poland?");
        assert_eq!(set[0].options(), ["Krakow", "Warsaw", "Poznan"]);
        assert_eq!(set[0].correct_index(), 1);
        assert_eq!(set[1].options(), ["2", "4", "8", "16"]);
    }

    #[test]
    fn test_syntax_error() {
        let err = parse_question_set("questions: [unclosed").unwrap_err();
        assert!(matches!(err, ImportError::Parse(_)));
        assert!(err.to_string().starts_with("invalid YAML"));
    }

    #[test]
    fn test_structure_errors() {
        for raw in [
            "",
            "title: no questions here",
            "questions: []",
            "questions: just a string",
            "- question: top-level list",
        ] {
            assert_eq!(parse_question_set(raw), Err(ImportError::Structure), "{raw}");
        }
        assert_eq!(
            ImportError::Structure.to_string(),
            "missing or invalid questions list"
        );
    }

    #[test]
    fn test_missing_text() {
        let raw = "questions:\n  - options: [a, b]\n    correct: 0\n";
        assert_eq!(question_fault(raw), (0, QuestionFault::MissingText));

        let raw = "questions:\n  - question: ''\n    options: [a, b]\n    correct: 0\n";
        assert_eq!(question_fault(raw), (0, QuestionFault::MissingText));
    }

    #[test]
    fn test_too_few_options_names_second_question() {
        let raw = r#"
questions:
  - question: ok
    options: [a, b]
    correct: 0
  - question: lonely
    options: [a]
    correct: 0
"#;
        let err = parse_question_set(raw).unwrap_err();
        assert_eq!(err.question_number(), Some(2));
        assert_eq!(err.to_string(), "question 2: needs at least 2 options");
    }

    #[test]
    fn test_options_must_be_a_list() {
        let raw = "questions:\n  - question: q\n    options: a, b\n    correct: 0\n";
        assert_eq!(question_fault(raw), (0, QuestionFault::TooFewOptions));
    }

    #[test]
    fn test_invalid_correct_index() {
        for correct in ["2", "-1", "1.5", "'1'", "null"] {
            let raw = format!("questions:\n  - question: q\n    options: [a, b]\n    correct: {correct}\n");
            assert_eq!(
                question_fault(&raw),
                (0, QuestionFault::InvalidCorrectIndex),
                "correct: {correct}"
            );
        }
        let raw = "questions:\n  - question: q\n    options: [a, b]\n";
        assert_eq!(question_fault(raw), (0, QuestionFault::InvalidCorrectIndex));
    }

    #[test]
    fn test_empty_option() {
        let raw = "questions:\n  - question: q\n    options: [a, '', c]\n    correct: 0\n";
        assert_eq!(question_fault(raw), (0, QuestionFault::EmptyOption(1)));

        let raw = "questions:\n  - question: q\n    options: [a, ~]\n    correct: 0\n";
        assert_eq!(question_fault(raw), (0, QuestionFault::EmptyOption(1)));
    }

    #[test]
    fn test_first_violation_wins() {
        let raw = r#"
questions:
  - question: ''
    options: [a]
    correct: 9
  - question: also bad
    options: []
"#;
        assert_eq!(question_fault(raw), (0, QuestionFault::MissingText));
    }
}

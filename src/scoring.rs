//! Attempt scoring and grade classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{AnswerMap, QuestionSet};

/// Six-tier grade, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    Fail,
    Satisfactory,
    SatisfactoryPlus,
    Good,
    GoodPlus,
    VeryGood,
}

impl Grade {
    /// Each tier owns `[lower, next lower)`; a boundary value belongs to the
    /// tier it opens.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < 60.0 {
            Grade::Fail
        } else if percentage < 70.0 {
            Grade::Satisfactory
        } else if percentage < 75.0 {
            Grade::SatisfactoryPlus
        } else if percentage < 85.0 {
            Grade::Good
        } else if percentage < 90.0 {
            Grade::GoodPlus
        } else {
            Grade::VeryGood
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Fail => "Fail",
            Grade::Satisfactory => "Satisfactory",
            Grade::SatisfactoryPlus => "Satisfactory plus",
            Grade::Good => "Good",
            Grade::GoodPlus => "Good plus",
            Grade::VeryGood => "Very good",
        }
    }

    /// Numeric mark on the 2.0–5.0 academic scale.
    pub fn mark(self) -> f32 {
        match self {
            Grade::Fail => 2.0,
            Grade::Satisfactory => 3.0,
            Grade::SatisfactoryPlus => 3.5,
            Grade::Good => 4.0,
            Grade::GoodPlus => 4.5,
            Grade::VeryGood => 5.0,
        }
    }

    pub fn is_passing(self) -> bool {
        self != Grade::Fail
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1})", self.label(), self.mark())
    }
}

/// Whether results carry a grade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradingScale {
    #[default]
    SixTier,
    ScoreOnly,
}

impl GradingScale {
    pub fn grade(self, percentage: f64) -> Option<Grade> {
        match self {
            GradingScale::SixTier => Some(Grade::from_percentage(percentage)),
            GradingScale::ScoreOnly => None,
        }
    }
}

/// Outcome of one attempt. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttemptResult {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub grade: Option<Grade>,
}

impl AttemptResult {
    /// Percentage rounded to one decimal place, e.g. `"66.7"`.
    pub fn percentage_display(&self) -> String {
        format!("{:.1}", self.percentage)
    }
}

impl fmt::Display for AttemptResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ({}%)",
            self.score,
            self.total,
            self.percentage_display()
        )?;
        if let Some(grade) = self.grade {
            write!(f, " {grade}")?;
        }
        Ok(())
    }
}

/// Score an attempt on the six-tier scale.
pub fn score(set: &QuestionSet, answers: &AnswerMap) -> AttemptResult {
    score_with(set, answers, GradingScale::SixTier)
}

/// Score an attempt. Unanswered questions count as wrong.
pub fn score_with(set: &QuestionSet, answers: &AnswerMap, scale: GradingScale) -> AttemptResult {
    let score = set
        .iter()
        .enumerate()
        .filter(|(index, question)| answers.get(*index) == Some(question.correct_index()))
        .count();
    let total = set.len();
    let percentage = calculate_percentage(score, total);

    AttemptResult {
        score,
        total,
        percentage,
        grade: scale.grade(percentage),
    }
}

fn calculate_percentage(score: usize, total: usize) -> f64 {
    if total > 0 {
        (score as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

/// True when every question in `set` has a selection. Submitting an
/// attempt is only allowed once this holds.
pub fn is_complete(set: &QuestionSet, answers: &AnswerMap) -> bool {
    (0..set.len()).all(|index| answers.is_answered(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Question;

    fn set_of(correct: &[usize]) -> QuestionSet {
        let questions = correct
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                Question::new(
                    format!("Q{i}"),
                    vec!["a".into(), "b".into(), "c".into()],
                    c,
                )
                .unwrap()
            })
            .collect();
        QuestionSet::new(questions).unwrap()
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(Grade::from_percentage(0.0), Grade::Fail);
        assert_eq!(Grade::from_percentage(59.9), Grade::Fail);
        assert_eq!(Grade::from_percentage(60.0), Grade::Satisfactory);
        assert_eq!(Grade::from_percentage(69.99), Grade::Satisfactory);
        assert_eq!(Grade::from_percentage(70.0), Grade::SatisfactoryPlus);
        assert_eq!(Grade::from_percentage(75.0), Grade::Good);
        assert_eq!(Grade::from_percentage(84.9), Grade::Good);
        assert_eq!(Grade::from_percentage(85.0), Grade::GoodPlus);
        assert_eq!(Grade::from_percentage(90.0), Grade::VeryGood);
        assert_eq!(Grade::from_percentage(100.0), Grade::VeryGood);
    }

    #[test]
    fn test_grade_display() {
        assert_eq!(Grade::SatisfactoryPlus.to_string(), "Satisfactory plus (3.5)");
        assert!(!Grade::Fail.is_passing());
        assert!(Grade::Satisfactory.is_passing());
    }

    #[test]
    fn test_unanswered_counts_as_wrong() {
        let set = set_of(&[0, 1, 2]);
        let answers = AnswerMap::from([(0, 0), (2, 1)]);
        let result = score(&set, &answers);
        assert_eq!(result.score, 1);
        assert_eq!(result.total, 3);
        assert_eq!(result.percentage_display(), "33.3");
        assert_eq!(result.grade, Some(Grade::Fail));
    }

    #[test]
    fn test_score_only_has_no_grade() {
        let set = set_of(&[0, 0]);
        let answers = AnswerMap::from([(0, 0), (1, 0)]);
        let result = score_with(&set, &answers, GradingScale::ScoreOnly);
        assert_eq!(result.grade, None);
        assert_eq!(result.to_string(), "2/2 (100.0%)");
    }

    #[test]
    fn test_answers_beyond_set_are_ignored() {
        let set = set_of(&[1]);
        let answers = AnswerMap::from([(0, 1), (5, 0)]);
        assert_eq!(score(&set, &answers).score, 1);
    }

    #[test]
    fn test_huge_question_index_is_ignored() {
        let set = set_of(&[1, 0]);
        let answers = AnswerMap::from([(0, 1), (usize::MAX, 0), (1 << 40, 0)]);
        let result = score(&set, &answers);
        assert_eq!((result.score, result.total), (1, 2));
        assert!(!is_complete(&set, &answers));
    }

    #[test]
    fn test_is_complete() {
        let set = set_of(&[0, 1]);
        let mut answers = AnswerMap::new();
        assert!(!is_complete(&set, &answers));
        answers.select(0, 2);
        assert!(!is_complete(&set, &answers));
        answers.select(1, 0);
        assert!(is_complete(&set, &answers));
    }

    #[test]
    fn test_grading_scale_config_names() {
        let scale: GradingScale = serde_json::from_str("\"score-only\"").unwrap();
        assert_eq!(scale, GradingScale::ScoreOnly);
        let scale: GradingScale = serde_json::from_str("\"six-tier\"").unwrap();
        assert_eq!(scale, GradingScale::SixTier);
    }
}

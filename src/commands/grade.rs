//! The `study-quiz grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use study_quiz::{AnswerMap, GradingScale, QuestionSet, load_question_set, score_with};

pub fn execute(file: PathBuf, answers: &str, grading: GradingScale) -> Result<()> {
    let set = load_question_set(&file)?;
    let answers = parse_answers(answers)?;
    if answers.len() > set.len() {
        bail!(
            "{} answers given for {} questions",
            answers.len(),
            set.len()
        );
    }
    check_option_range(&set, &answers)?;

    let answers = AnswerMap::from(answers);
    let result = score_with(&set, &answers, grading);

    println!("Score: {} / {}", result.score, result.total);
    println!("Percentage: {}%", result.percentage_display());
    if let Some(grade) = result.grade {
        println!("Grade: {grade}");
    }
    let unanswered = set.len() - answers.answered_count();
    if unanswered > 0 {
        println!("Unanswered: {unanswered}");
    }
    Ok(())
}

/// Parse `1,0,-,2` into per-question choices. `-` or an empty slot means
/// unanswered.
fn parse_answers(raw: &str) -> Result<Vec<Option<usize>>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',')
        .map(str::trim)
        .enumerate()
        .map(|(index, token)| match token {
            "" | "-" => Ok(None),
            _ => token
                .parse::<usize>()
                .map(Some)
                .with_context(|| format!("answer {}: '{token}' is not an option index", index + 1)),
        })
        .collect()
}

/// Every chosen index must name an option of its question.
fn check_option_range(set: &QuestionSet, answers: &[Option<usize>]) -> Result<()> {
    for (index, (question, answer)) in set.iter().zip(answers).enumerate() {
        if let Some(option) = *answer {
            let count = question.options().len();
            if option >= count {
                bail!(
                    "answer {}: option {option} is out of range (question has {count} options)",
                    index + 1
                );
            }
        }
    }
    Ok(())
}

//! The `study-quiz check` command.

use std::path::PathBuf;

use anyhow::Result;
use study_quiz::load_question_set;

pub fn execute(file: PathBuf) -> Result<()> {
    let set = load_question_set(&file)?;

    println!("OK: {set}");
    for (index, question) in set.iter().enumerate() {
        println!(
            "  {}. {} ({} options)",
            index + 1,
            question.text(),
            question.options().len()
        );
    }
    Ok(())
}

//! The `lingomark validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(submission_path: PathBuf) -> Result<()> {
    let submissions = lingomark_core::parser::load_submissions(&submission_path)?;

    let mut total_warnings = 0;

    for submission in &submissions {
        let name = if submission.title.is_empty() {
            &submission.id
        } else {
            &submission.title
        };
        println!("Submission: {} ({} answers)", name, submission.answers.len());

        let warnings = lingomark_core::parser::validate_submission(submission);
        for w in &warnings {
            let prefix = w
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All submissions valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

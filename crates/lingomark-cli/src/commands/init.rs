//! The `lingomark init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("lingomark.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("quizzes").context("failed to create quizzes/")?;
    write_if_missing(Path::new("quizzes/example.toml"), EXAMPLE_SUBMISSION)?;

    println!("\nNext steps:");
    println!("  1. Run: lingomark validate --submission quizzes/example.toml");
    println!("  2. Run: lingomark correct --submission quizzes/example.toml --format text");
    println!("  3. Run: lingomark timer --seconds 600");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# lingomark configuration

output_dir = "./lingomark-results"
# json, html, text, or all
default_format = "json"

[timer]
five_minute_warning_secs = 300
one_minute_warning_secs = 60
"#;

const EXAMPLE_SUBMISSION: &str = r#"[submission]
id = "example"
title = "Example Quiz"
time_limit_secs = 600

[[answers]]
question_id = "q1"
kind = "multiple_choice"
prompt = "Which article goes with 'Haus'?"
submitted = "der"
expected = "das"

[[answers]]
question_id = "q2"
kind = "fill_blank"
prompt = "Complete: the ___ dog barks"
submitted = "the big dog"
expected = "the big brown dog"

[[answers]]
question_id = "q3"
kind = "short_answer"
prompt = "What do plants need to grow?"
submitted = "sunlight and water"
expected = "water sunlight soil"

[[answers]]
question_id = "q4"
kind = "essay"
prompt = "Describe your breakfast."
submitted = "I has a apple"

[[answers.grammar]]
start = 2
end = 5
original = "has"
corrected = "have"
reason = "Subject-verb agreement"

[[answers.vocabulary]]
start = 8
end = 13
original = "apple"
corrected = "an apple"
reason = "Article before a vowel"
"#;

//! Submission file parser.
//!
//! Loads quiz submissions from TOML or JSON files and directories, and
//! validates them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{AnnotationCategory, AnswerRecord, QuestionKind, SpanAnnotation, Submission};
use crate::spans::validate_annotations;

/// On-disk encodings of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionFormat {
    Toml,
    Json,
}

impl SubmissionFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(SubmissionFormat::Toml),
            "json" => Some(SubmissionFormat::Json),
            _ => None,
        }
    }
}

/// Intermediate structure shared by both file formats.
#[derive(Debug, Deserialize)]
struct RawSubmissionFile {
    submission: RawSubmissionHeader,
    #[serde(default)]
    answers: Vec<RawAnswer>,
}

#[derive(Debug, Deserialize)]
struct RawSubmissionHeader {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    time_limit_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawAnswer {
    question_id: String,
    kind: String,
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    submitted: String,
    #[serde(default)]
    expected: String,
    #[serde(default)]
    grammar: Vec<RawSpan>,
    #[serde(default)]
    vocabulary: Vec<RawSpan>,
}

#[derive(Debug, Deserialize)]
struct RawSpan {
    start: usize,
    end: usize,
    #[serde(default)]
    original: String,
    #[serde(default)]
    corrected: String,
    #[serde(default)]
    reason: String,
}

impl RawSpan {
    fn into_annotation(self, category: AnnotationCategory) -> SpanAnnotation {
        SpanAnnotation {
            start: self.start,
            end: self.end,
            category,
            original: self.original,
            corrected: self.corrected,
            reason: self.reason,
        }
    }
}

/// Parse a single submission file. The format follows the extension.
pub fn parse_submission(path: &Path) -> Result<Submission> {
    let format = SubmissionFormat::from_path(path)
        .with_context(|| format!("unsupported submission file type: {}", path.display()))?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read submission file: {}", path.display()))?;

    parse_submission_str(&content, format, path)
}

/// Parse submission text in the given format (useful for testing).
pub fn parse_submission_str(
    content: &str,
    format: SubmissionFormat,
    source_path: &Path,
) -> Result<Submission> {
    let parsed: RawSubmissionFile = match format {
        SubmissionFormat::Toml => toml::from_str(content)
            .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?,
        SubmissionFormat::Json => serde_json::from_str(content)
            .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?,
    };

    let answers = parsed
        .answers
        .into_iter()
        .map(|a| AnswerRecord {
            question_id: a.question_id,
            kind: QuestionKind::from_name(&a.kind),
            prompt: a.prompt,
            submitted: a.submitted,
            expected: a.expected,
            grammar: a
                .grammar
                .into_iter()
                .map(|s| s.into_annotation(AnnotationCategory::Grammar))
                .collect(),
            vocabulary: a
                .vocabulary
                .into_iter()
                .map(|s| s.into_annotation(AnnotationCategory::Vocabulary))
                .collect(),
        })
        .collect();

    Ok(Submission {
        id: parsed.submission.id,
        title: parsed.submission.title,
        time_limit_secs: parsed.submission.time_limit_secs,
        answers,
    })
}

/// Recursively load every `.toml` and `.json` submission from a directory.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_submission_directory(dir: &Path) -> Result<Vec<Submission>> {
    let mut submissions = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            submissions.extend(load_submission_directory(&path)?);
        } else if SubmissionFormat::from_path(&path).is_some() {
            match parse_submission(&path) {
                Ok(submission) => submissions.push(submission),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(submissions)
}

/// Load a single file, or every submission under a directory.
pub fn load_submissions(path: &Path) -> Result<Vec<Submission>> {
    if path.is_dir() {
        load_submission_directory(path)
    } else {
        Ok(vec![parse_submission(path)?])
    }
}

/// A warning from submission validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a submission for common issues.
pub fn validate_submission(submission: &Submission) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if submission.time_limit_secs == Some(0) {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "time_limit_secs is 0; the timer expires on its first tick".into(),
        });
    }

    let mut seen_ids = std::collections::HashSet::new();
    for answer in &submission.answers {
        let warn = |message: String| ValidationWarning {
            question_id: Some(answer.question_id.clone()),
            message,
        };

        if !seen_ids.insert(&answer.question_id) {
            warnings.push(warn(format!("duplicate question ID: {}", answer.question_id)));
        }

        match &answer.kind {
            QuestionKind::Other(kind) => {
                warnings.push(warn(format!(
                    "unknown question kind '{kind}'; answer will be shown uncorrected"
                )));
            }
            QuestionKind::Essay => {}
            _ if answer.expected.trim().is_empty() => {
                warnings.push(warn("expected answer is empty".into()));
            }
            _ => {}
        }

        let annotations = answer.annotations();
        if !annotations.is_empty() && answer.kind != QuestionKind::Essay {
            warnings.push(warn(format!(
                "{} annotation(s) ignored for {} question",
                annotations.len(),
                answer.kind
            )));
            continue;
        }

        for issue in validate_annotations(&answer.submitted, &annotations) {
            let action = if issue.is_dropped() {
                "dropped"
            } else {
                "adjusted"
            };
            warnings.push(warn(format!("{issue} ({action})")));
        }
    }

    warnings
}

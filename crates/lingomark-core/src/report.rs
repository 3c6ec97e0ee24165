//! Correction report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::correction::compute_segments;
use crate::model::{AnswerRecord, CorrectionInput, QuestionKind, SegmentKind, Submission, TextSegment};
use crate::spans::{corrected_text, improvement_score};
use crate::summary::{SegmentSummary, Verdict};

/// The corrected view of one answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerCorrection {
    pub question_id: String,
    pub kind: QuestionKind,
    #[serde(default)]
    pub prompt: String,
    /// Segments to render, in order.
    pub segments: Vec<TextSegment>,
    pub summary: SegmentSummary,
    pub verdict: Verdict,
    /// Essay answers only: 100 minus 10 per rendered correction.
    #[serde(default)]
    pub improvement_score: Option<u32>,
    /// Essay answers only: the text with every suggestion applied.
    #[serde(default)]
    pub corrected_text: Option<String>,
}

/// Correct a single answer.
pub fn correct_answer(record: &AnswerRecord) -> AnswerCorrection {
    let annotations = record.annotations();
    let segments = compute_segments(&CorrectionInput {
        submitted: &record.submitted,
        expected: &record.expected,
        kind: &record.kind,
        annotations: &annotations,
    });
    let summary = SegmentSummary::from_segments(&segments);
    let verdict = Verdict::assess(&record.kind, &summary, &record.submitted, &record.expected);

    let (improvement_score, corrected_text) = if record.kind == QuestionKind::Essay {
        let corrections = segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Incorrect)
            .count();
        (
            Some(improvement_score(corrections)),
            Some(corrected_text(&record.submitted, &annotations)),
        )
    } else {
        (None, None)
    };

    AnswerCorrection {
        question_id: record.question_id.clone(),
        kind: record.kind.clone(),
        prompt: record.prompt.clone(),
        segments,
        summary,
        verdict,
        improvement_score,
        corrected_text,
    }
}

/// Summary of a submission (without the raw answers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionSummary {
    pub id: String,
    pub title: String,
    pub answer_count: usize,
    #[serde(default)]
    pub time_limit_secs: Option<u64>,
}

/// Verdict counts and merged segment counts across a report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportTotals {
    pub correct: usize,
    pub partial: usize,
    pub incorrect: usize,
    pub ungraded: usize,
    pub segments: SegmentSummary,
}

impl ReportTotals {
    fn from_answers(answers: &[AnswerCorrection]) -> Self {
        let mut totals = Self::default();
        for answer in answers {
            match answer.verdict {
                Verdict::Correct => totals.correct += 1,
                Verdict::Partial => totals.partial += 1,
                Verdict::Incorrect => totals.incorrect += 1,
                Verdict::Ungraded => totals.ungraded += 1,
            }
            totals.segments.merge(&answer.summary);
        }
        totals
    }

    /// Number of answers with a machine verdict.
    pub fn graded(&self) -> usize {
        self.correct + self.partial + self.incorrect
    }

    /// Share of graded answers that are correct, partial answers counting
    /// half. `None` when nothing was graded.
    pub fn score(&self) -> Option<f64> {
        let graded = self.graded();
        if graded == 0 {
            return None;
        }
        Some((self.correct as f64 + self.partial as f64 * 0.5) / graded as f64)
    }
}

/// A complete correction report for one submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub submission: SubmissionSummary,
    pub answers: Vec<AnswerCorrection>,
    pub totals: ReportTotals,
}

impl CorrectionReport {
    /// Correct every answer of a submission.
    pub fn build(submission: &Submission) -> Self {
        let answers: Vec<AnswerCorrection> = submission.answers.iter().map(correct_answer).collect();
        let totals = ReportTotals::from_answers(&answers);
        tracing::debug!(
            "corrected {} answers for submission {}",
            answers.len(),
            submission.id
        );

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            submission: SubmissionSummary {
                id: submission.id.clone(),
                title: submission.title.clone(),
                answer_count: submission.answers.len(),
                time_limit_secs: submission.time_limit_secs,
            },
            answers,
            totals,
        }
    }

    /// File name stem for this report's output files.
    ///
    /// The submission id is reduced to `[A-Za-z0-9_-]` so it always names a
    /// single file inside the output directory, and the report's own id keeps
    /// two reports of the same submission apart.
    pub fn file_stem(&self, timestamp: &str) -> String {
        let mut id: String = self
            .submission
            .id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        if id.trim_matches('_').is_empty() {
            id = "report".to_string();
        }
        let short_id = self.id.simple().to_string();
        format!("{id}-{timestamp}-{}", &short_id[..8])
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: CorrectionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

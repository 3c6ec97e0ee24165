//! Per-answer segment counts and verdicts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::correction::keyword_coverage;
use crate::model::{QuestionKind, SegmentKind, TextSegment};

/// Number of word segments of each kind. Whitespace separators are not
/// counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentSummary {
    pub correct: usize,
    pub incorrect: usize,
    pub missing: usize,
    pub extra: usize,
    pub neutral: usize,
}

impl SegmentSummary {
    pub fn from_segments(segments: &[TextSegment]) -> Self {
        let mut summary = Self::default();
        for segment in segments.iter().filter(|s| !s.is_separator()) {
            match segment.kind {
                SegmentKind::Correct => summary.correct += 1,
                SegmentKind::Incorrect => summary.incorrect += 1,
                SegmentKind::Missing => summary.missing += 1,
                SegmentKind::Extra => summary.extra += 1,
                SegmentKind::Neutral => summary.neutral += 1,
            }
        }
        summary
    }

    /// Segments flagged as a defect of any kind.
    pub fn defects(&self) -> usize {
        self.incorrect + self.missing + self.extra
    }

    pub fn merge(&mut self, other: &SegmentSummary) {
        self.correct += other.correct;
        self.incorrect += other.incorrect;
        self.missing += other.missing;
        self.extra += other.extra;
        self.neutral += other.neutral;
    }
}

/// Overall judgement of one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Correct,
    Partial,
    Incorrect,
    /// Free text or an unknown kind; left to a human grader.
    Ungraded,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => write!(f, "correct"),
            Verdict::Partial => write!(f, "partial"),
            Verdict::Incorrect => write!(f, "incorrect"),
            Verdict::Ungraded => write!(f, "ungraded"),
        }
    }
}

impl Verdict {
    /// Derive a verdict from the computed segments.
    ///
    /// Short answers are judged on keyword coverage of the expected answer,
    /// so `submitted` and `expected` are needed alongside the summary.
    pub fn assess(
        kind: &QuestionKind,
        summary: &SegmentSummary,
        submitted: &str,
        expected: &str,
    ) -> Self {
        if submitted.trim().is_empty() {
            return match kind {
                QuestionKind::Essay | QuestionKind::Other(_) => Verdict::Ungraded,
                _ => Verdict::Incorrect,
            };
        }

        match kind {
            QuestionKind::MultipleChoice | QuestionKind::TrueFalse => {
                if summary.correct > 0 {
                    Verdict::Correct
                } else {
                    Verdict::Incorrect
                }
            }
            QuestionKind::FillBlank => match (summary.correct, summary.defects()) {
                (_, 0) => Verdict::Correct,
                (0, _) => Verdict::Incorrect,
                _ => Verdict::Partial,
            },
            QuestionKind::ShortAnswer => {
                let coverage = keyword_coverage(submitted, expected);
                if coverage >= 1.0 {
                    Verdict::Correct
                } else if coverage > 0.0 {
                    Verdict::Partial
                } else {
                    Verdict::Incorrect
                }
            }
            QuestionKind::Essay | QuestionKind::Other(_) => Verdict::Ungraded,
        }
    }
}

//! Core data model types for lingomark.
//!
//! These are the types shared by the correction engine, the submission
//! parser, and the report writers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a slice of text should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Correct,
    Incorrect,
    Missing,
    Extra,
    Neutral,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Correct => write!(f, "correct"),
            SegmentKind::Incorrect => write!(f, "incorrect"),
            SegmentKind::Missing => write!(f, "missing"),
            SegmentKind::Extra => write!(f, "extra"),
            SegmentKind::Neutral => write!(f, "neutral"),
        }
    }
}

/// A classified slice of text for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    /// Literal text to render.
    pub text: String,
    /// Classification driving the styling.
    pub kind: SegmentKind,
    /// Rationale shown on hover.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Set when the text was synthesized for display and is not part of the
    /// source string (missing-word placeholders and their separators).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inserted: bool,
}

impl TextSegment {
    pub fn new(text: impl Into<String>, kind: SegmentKind) -> Self {
        Self {
            text: text.into(),
            kind,
            explanation: None,
            inserted: false,
        }
    }

    pub fn neutral(text: impl Into<String>) -> Self {
        Self::new(text, SegmentKind::Neutral)
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn inserted(mut self) -> Self {
        self.inserted = true;
        self
    }

    /// Whether this segment is a pure whitespace separator.
    pub fn is_separator(&self) -> bool {
        self.kind == SegmentKind::Neutral && self.text.chars().all(char::is_whitespace)
    }
}

/// Concatenate the text of every segment that came from the source string.
pub fn reconstruct(segments: &[TextSegment]) -> String {
    segments
        .iter()
        .filter(|s| !s.inserted)
        .map(|s| s.text.as_str())
        .collect()
}

/// Category of a span annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationCategory {
    Grammar,
    Vocabulary,
}

impl fmt::Display for AnnotationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationCategory::Grammar => write!(f, "grammar"),
            AnnotationCategory::Vocabulary => write!(f, "vocabulary"),
        }
    }
}

/// A defect marker over a source text.
///
/// `start` and `end` are UTF-16 code unit offsets, `start` inclusive and
/// `end` exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanAnnotation {
    pub start: usize,
    pub end: usize,
    pub category: AnnotationCategory,
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub corrected: String,
    #[serde(default)]
    pub reason: String,
}

impl SpanAnnotation {
    /// Tooltip text for the annotated span.
    pub fn explanation(&self) -> String {
        format!("{} → {}", self.reason, self.corrected)
    }
}

/// The kind of question an answer belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    FillBlank,
    ShortAnswer,
    Essay,
    /// Any kind this crate does not know how to correct.
    Other(String),
}

impl QuestionKind {
    /// Parse a kind name, accepting common aliases. Unrecognized names
    /// become [`QuestionKind::Other`].
    pub fn from_name(name: &str) -> Self {
        let normalized = name.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "multiple_choice" | "mcq" | "choice" => QuestionKind::MultipleChoice,
            "true_false" | "tf" | "boolean" => QuestionKind::TrueFalse,
            "fill_blank" | "fill_in_blank" | "fill_in_the_blank" => QuestionKind::FillBlank,
            "short_answer" | "short" => QuestionKind::ShortAnswer,
            "essay" | "writing" => QuestionKind::Essay,
            _ => QuestionKind::Other(name.trim().to_string()),
        }
    }

    /// Single selectable option kinds, compared as a whole.
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionKind::MultipleChoice | QuestionKind::TrueFalse)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::MultipleChoice => write!(f, "multiple_choice"),
            QuestionKind::TrueFalse => write!(f, "true_false"),
            QuestionKind::FillBlank => write!(f, "fill_blank"),
            QuestionKind::ShortAnswer => write!(f, "short_answer"),
            QuestionKind::Essay => write!(f, "essay"),
            QuestionKind::Other(raw) => write!(f, "{raw}"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(QuestionKind::from_name(s))
    }
}

impl Serialize for QuestionKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QuestionKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(QuestionKind::from_name(&raw))
    }
}

/// Everything the correction engine needs for one answer.
#[derive(Debug, Clone, Copy)]
pub struct CorrectionInput<'a> {
    pub submitted: &'a str,
    pub expected: &'a str,
    pub kind: &'a QuestionKind,
    /// Grammar and vocabulary findings over `submitted` (essay mode).
    pub annotations: &'a [SpanAnnotation],
}

/// A learner's answer to one question, as delivered by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: String,
    pub kind: QuestionKind,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub submitted: String,
    #[serde(default)]
    pub expected: String,
    #[serde(default)]
    pub grammar: Vec<SpanAnnotation>,
    #[serde(default)]
    pub vocabulary: Vec<SpanAnnotation>,
}

impl AnswerRecord {
    /// Grammar and vocabulary annotations merged into one list.
    pub fn annotations(&self) -> Vec<SpanAnnotation> {
        self.grammar
            .iter()
            .chain(self.vocabulary.iter())
            .cloned()
            .collect()
    }
}

/// A quiz attempt with all of its answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Time limit of the attempt, when the quiz is timed.
    #[serde(default)]
    pub time_limit_secs: Option<u64>,
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_kind_parse_and_display() {
        assert_eq!(
            "multiple_choice".parse::<QuestionKind>().unwrap(),
            QuestionKind::MultipleChoice
        );
        assert_eq!(
            "Fill-In-Blank".parse::<QuestionKind>().unwrap(),
            QuestionKind::FillBlank
        );
        assert_eq!("tf".parse::<QuestionKind>().unwrap(), QuestionKind::TrueFalse);
        assert_eq!(
            "matching".parse::<QuestionKind>().unwrap(),
            QuestionKind::Other("matching".into())
        );
        assert_eq!(QuestionKind::ShortAnswer.to_string(), "short_answer");
        assert!(QuestionKind::TrueFalse.is_choice());
        assert!(!QuestionKind::Essay.is_choice());
    }

    #[test]
    fn segment_serde_omits_defaults() {
        let seg = TextSegment::new("cat", SegmentKind::Correct);
        let json = serde_json::to_string(&seg).unwrap();
        assert_eq!(json, r#"{"text":"cat","kind":"correct"}"#);

        let seg = TextSegment::new("[dog]", SegmentKind::Missing)
            .with_explanation("expected \"dog\"")
            .inserted();
        let json = serde_json::to_string(&seg).unwrap();
        let back: TextSegment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seg);
    }

    #[test]
    fn reconstruct_skips_inserted() {
        let segments = vec![
            TextSegment::new("cat", SegmentKind::Correct),
            TextSegment::neutral(" ").inserted(),
            TextSegment::new("[dog]", SegmentKind::Missing).inserted(),
        ];
        assert_eq!(reconstruct(&segments), "cat");
    }

    #[test]
    fn answer_record_merges_annotations() {
        let json = r#"{
            "question_id": "q1",
            "kind": "essay",
            "submitted": "I has a apple",
            "grammar": [{"start": 2, "end": 5, "category": "grammar", "corrected": "have"}],
            "vocabulary": [{"start": 8, "end": 13, "category": "vocabulary", "corrected": "an apple"}]
        }"#;
        let record: AnswerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, QuestionKind::Essay);
        assert_eq!(record.annotations().len(), 2);
    }
}

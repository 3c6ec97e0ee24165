//! Annotation validation errors.
//!
//! The correction engine never fails on bad offsets; it clamps and skips.
//! These errors let the `validate` path report exactly what it would skip.

use thiserror::Error;

use crate::model::AnnotationCategory;

/// A problem with a span annotation relative to its source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationIssue {
    /// `end` does not come after `start`.
    #[error("{category} span {start}..{end} is empty or reversed")]
    EmptySpan {
        category: AnnotationCategory,
        start: usize,
        end: usize,
    },

    /// The span extends past the end of the text.
    #[error("{category} span {start}..{end} exceeds text length {len}")]
    OutOfRange {
        category: AnnotationCategory,
        start: usize,
        end: usize,
        len: usize,
    },

    /// The span starts inside an earlier span.
    #[error("{category} span {start}..{end} overlaps an earlier span ending at {previous_end}")]
    Overlap {
        category: AnnotationCategory,
        start: usize,
        end: usize,
        previous_end: usize,
    },

    /// The offset falls inside a surrogate pair.
    #[error("{category} span {start}..{end} splits a character")]
    SplitsCharacter {
        category: AnnotationCategory,
        start: usize,
        end: usize,
    },
}

impl AnnotationIssue {
    /// Returns `true` if the engine drops the annotation entirely rather
    /// than rendering a trimmed or clamped version of it.
    pub fn is_dropped(&self) -> bool {
        matches!(self, AnnotationIssue::EmptySpan { .. })
    }
}

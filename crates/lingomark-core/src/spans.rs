//! Span annotation splicing.
//!
//! Turns a text plus a list of caller-supplied defect spans into neutral and
//! incorrect segments. Offsets arrive as UTF-16 code units and are mapped to
//! byte offsets here, clamped to the text and snapped down to a char
//! boundary. Spans are processed in `start` order; a span that begins inside
//! an already-rendered span is trimmed to its uncovered tail, or dropped if
//! nothing remains.

use crate::error::AnnotationIssue;
use crate::model::{SegmentKind, SpanAnnotation, TextSegment};

/// Map a UTF-16 offset to a byte offset into `text`.
///
/// Offsets past the end clamp to `text.len()`. Offsets inside a surrogate
/// pair snap to the start of that character. For repeated lookups over the
/// same text, build a [`Utf16Index`] instead.
pub fn byte_offset(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (idx, ch) in text.char_indices() {
        let next = units + ch.len_utf16();
        if next > utf16_offset {
            return idx;
        }
        units = next;
    }
    text.len()
}

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// UTF-16 to byte offset table for one text, built in a single pass.
#[derive(Debug, Clone)]
pub struct Utf16Index {
    /// `bytes[k]` is the byte offset of the character holding UTF-16 unit
    /// `k`; the last entry is `text.len()`.
    bytes: Vec<usize>,
}

impl Utf16Index {
    pub fn new(text: &str) -> Self {
        let mut bytes = Vec::with_capacity(text.len() + 1);
        for (idx, ch) in text.char_indices() {
            for _ in 0..ch.len_utf16() {
                bytes.push(idx);
            }
        }
        bytes.push(text.len());
        Self { bytes }
    }

    /// Length of the text in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.bytes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Same mapping as [`byte_offset`].
    pub fn byte_offset(&self, utf16_offset: usize) -> usize {
        self.bytes[utf16_offset.min(self.len())]
    }

    /// Whether `utf16_offset` falls between the two halves of a surrogate
    /// pair. Offsets past the end never split.
    pub fn splits_character(&self, utf16_offset: usize) -> bool {
        utf16_offset > 0
            && utf16_offset < self.len()
            && self.bytes[utf16_offset] == self.bytes[utf16_offset - 1]
    }
}

fn sorted_by_start(annotations: &[SpanAnnotation]) -> Vec<&SpanAnnotation> {
    let mut sorted: Vec<&SpanAnnotation> = annotations.iter().collect();
    sorted.sort_by_key(|a| a.start);
    sorted
}

/// Split `text` into neutral gaps and incorrect annotated spans.
///
/// Concatenating the returned segments always yields `text`.
pub fn splice_annotations(text: &str, annotations: &[SpanAnnotation]) -> Vec<TextSegment> {
    let index = Utf16Index::new(text);
    let mut segments = Vec::new();
    let mut cursor = 0usize;

    for annotation in sorted_by_start(annotations) {
        let mut start = index.byte_offset(annotation.start);
        let end = index.byte_offset(annotation.end);

        if end <= start {
            tracing::warn!(
                "skipping empty {} span {}..{}",
                annotation.category,
                annotation.start,
                annotation.end
            );
            continue;
        }
        if start < cursor {
            if end <= cursor {
                tracing::warn!(
                    "skipping {} span {}..{} covered by an earlier span",
                    annotation.category,
                    annotation.start,
                    annotation.end
                );
                continue;
            }
            tracing::warn!(
                "trimming overlapping {} span {}..{}",
                annotation.category,
                annotation.start,
                annotation.end
            );
            start = cursor;
        }

        if start > cursor {
            segments.push(TextSegment::neutral(&text[cursor..start]));
        }
        segments.push(
            TextSegment::new(&text[start..end], SegmentKind::Incorrect)
                .with_explanation(annotation.explanation()),
        );
        cursor = end;
    }

    if cursor < text.len() || segments.is_empty() {
        segments.push(TextSegment::neutral(&text[cursor..]));
    }

    segments
}

/// Apply every annotation's suggested correction to `text`.
///
/// Uses the same ordering and overlap rules as [`splice_annotations`]; a
/// trimmed span has its whole correction applied to the uncovered tail.
pub fn corrected_text(text: &str, annotations: &[SpanAnnotation]) -> String {
    let index = Utf16Index::new(text);
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0usize;

    for annotation in sorted_by_start(annotations) {
        let start = index.byte_offset(annotation.start).max(cursor);
        let end = index.byte_offset(annotation.end);
        if end <= start {
            continue;
        }
        out.push_str(&text[cursor..start]);
        out.push_str(&annotation.corrected);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Report every annotation the engine would clamp, trim, or drop.
pub fn validate_annotations(text: &str, annotations: &[SpanAnnotation]) -> Vec<AnnotationIssue> {
    let index = Utf16Index::new(text);
    let len = index.len();
    let mut issues = Vec::new();
    let mut previous_end: Option<usize> = None;

    for annotation in sorted_by_start(annotations) {
        let (category, start, end) = (annotation.category, annotation.start, annotation.end);

        if end <= start {
            issues.push(AnnotationIssue::EmptySpan {
                category,
                start,
                end,
            });
            continue;
        }
        if end > len {
            issues.push(AnnotationIssue::OutOfRange {
                category,
                start,
                end,
                len,
            });
        }
        if index.splits_character(start) || index.splits_character(end) {
            issues.push(AnnotationIssue::SplitsCharacter {
                category,
                start,
                end,
            });
        }
        if let Some(previous_end) = previous_end {
            if start < previous_end {
                issues.push(AnnotationIssue::Overlap {
                    category,
                    start,
                    end,
                    previous_end,
                });
            }
        }
        previous_end = Some(previous_end.map_or(end, |p| p.max(end)));
    }

    issues
}

/// Score shown next to an annotated text: 100 minus 10 per correction,
/// floored at zero.
pub fn improvement_score(correction_count: usize) -> u32 {
    100usize.saturating_sub(correction_count.saturating_mul(10)) as u32
}

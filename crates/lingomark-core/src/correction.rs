//! Answer correction engine.
//!
//! Maps a submitted answer and its expected answer to an ordered list of
//! [`TextSegment`]s, one strategy per question kind. Every function here is
//! pure and infallible: bad input degrades to a neutral rendering.

use crate::model::{CorrectionInput, QuestionKind, SegmentKind, SpanAnnotation, TextSegment};
use crate::spans::splice_annotations;

/// Compute the display segments for one answer.
///
/// Blank submissions and unknown question kinds produce a single neutral
/// segment holding the raw submitted text.
pub fn compute_segments(input: &CorrectionInput<'_>) -> Vec<TextSegment> {
    if input.submitted.trim().is_empty() {
        return vec![TextSegment::neutral(input.submitted)];
    }

    match input.kind {
        QuestionKind::MultipleChoice | QuestionKind::TrueFalse => {
            correct_choice(input.submitted, input.expected)
        }
        QuestionKind::FillBlank => correct_fill_blank(input.submitted, input.expected),
        QuestionKind::ShortAnswer => correct_short_answer(input.submitted, input.expected),
        QuestionKind::Essay => correct_essay(input.submitted, input.annotations),
        QuestionKind::Other(kind) => {
            tracing::debug!("no corrector for question kind '{kind}', rendering as-is");
            vec![TextSegment::neutral(input.submitted)]
        }
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Whole-answer comparison for single-option questions.
pub fn correct_choice(submitted: &str, expected: &str) -> Vec<TextSegment> {
    let segment = if eq_ignore_case(submitted.trim(), expected.trim()) {
        TextSegment::new(submitted, SegmentKind::Correct)
    } else {
        TextSegment::new(submitted, SegmentKind::Incorrect)
            .with_explanation(format!("expected \"{}\"", expected.trim()))
    };
    vec![segment]
}

/// A whitespace-delimited view of a string that keeps every byte.
struct WordLayout<'a> {
    leading: &'a str,
    words: Vec<&'a str>,
    /// `gaps[i]` is the whitespace between `words[i]` and `words[i + 1]`.
    gaps: Vec<&'a str>,
    trailing: &'a str,
}

impl<'a> WordLayout<'a> {
    fn new(text: &'a str) -> Self {
        let mut words = Vec::new();
        let mut gaps = Vec::new();
        let mut word_start: Option<usize> = None;
        let mut last_word_end: Option<usize> = None;
        let mut first_word_start = text.len();

        for (idx, ch) in text.char_indices() {
            match (ch.is_whitespace(), word_start) {
                (false, None) => {
                    if let Some(end) = last_word_end {
                        gaps.push(&text[end..idx]);
                    } else {
                        first_word_start = idx;
                    }
                    word_start = Some(idx);
                }
                (true, Some(start)) => {
                    words.push(&text[start..idx]);
                    last_word_end = Some(idx);
                    word_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = word_start {
            words.push(&text[start..]);
            last_word_end = Some(text.len());
        }

        let trailing_start = last_word_end.unwrap_or(text.len());
        Self {
            leading: &text[..first_word_start.min(trailing_start)],
            words,
            gaps,
            trailing: &text[trailing_start..],
        }
    }
}

/// Word-by-word alignment for fill-in-the-blank answers.
///
/// Words are compared case-insensitively at equal positions. Surplus
/// submitted words are `extra`; expected words with no counterpart are
/// rendered as inserted `[word]` placeholders.
pub fn correct_fill_blank(submitted: &str, expected: &str) -> Vec<TextSegment> {
    let layout = WordLayout::new(submitted);
    let expected: Vec<&str> = expected.split_whitespace().collect();
    let total = layout.words.len().max(expected.len());

    let mut segments = Vec::with_capacity(total * 2 + 2);
    if !layout.leading.is_empty() {
        segments.push(TextSegment::neutral(layout.leading));
    }

    for i in 0..total {
        if i > 0 {
            let separator = match layout.gaps.get(i - 1) {
                Some(gap) if i < layout.words.len() => TextSegment::neutral(*gap),
                _ => TextSegment::neutral(" ").inserted(),
            };
            segments.push(separator);
        }

        let segment = match (layout.words.get(i), expected.get(i)) {
            (Some(word), Some(want)) if eq_ignore_case(word, want) => {
                TextSegment::new(*word, SegmentKind::Correct)
            }
            (Some(word), Some(want)) => TextSegment::new(*word, SegmentKind::Incorrect)
                .with_explanation(format!("expected \"{want}\"")),
            (Some(word), None) => TextSegment::new(*word, SegmentKind::Extra)
                .with_explanation("not part of the expected answer"),
            (None, Some(want)) => TextSegment::new(format!("[{want}]"), SegmentKind::Missing)
                .with_explanation(format!("missing \"{want}\""))
                .inserted(),
            (None, None) => unreachable!("index below the longer word list"),
        };
        segments.push(segment);
    }

    if !layout.trailing.is_empty() {
        segments.push(TextSegment::neutral(layout.trailing));
    }
    segments
}

fn keyword_match(word: &str, keywords: &[String]) -> bool {
    let word = word.to_lowercase();
    keywords
        .iter()
        .any(|k| word.contains(k.as_str()) || k.contains(word.as_str()))
}

fn lowercase_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Keyword highlighting for short answers.
///
/// A submitted word is `correct` when it contains, or is contained in, any
/// expected word (case-insensitive). Everything else stays neutral.
pub fn correct_short_answer(submitted: &str, expected: &str) -> Vec<TextSegment> {
    let keywords = lowercase_words(expected);
    let layout = WordLayout::new(submitted);

    let mut segments = Vec::with_capacity(layout.words.len() * 2 + 1);
    if !layout.leading.is_empty() {
        segments.push(TextSegment::neutral(layout.leading));
    }
    for (i, word) in layout.words.iter().enumerate() {
        if i > 0 {
            segments.push(TextSegment::neutral(layout.gaps[i - 1]));
        }
        let kind = if keyword_match(word, &keywords) {
            SegmentKind::Correct
        } else {
            SegmentKind::Neutral
        };
        segments.push(TextSegment::new(*word, kind));
    }
    if !layout.trailing.is_empty() {
        segments.push(TextSegment::neutral(layout.trailing));
    }
    segments
}

/// Fraction of expected words matched by at least one submitted word, using
/// the same containment rule as [`correct_short_answer`].
///
/// An empty expected answer has nothing to cover and scores 1.0.
pub fn keyword_coverage(submitted: &str, expected: &str) -> f64 {
    let keywords = lowercase_words(expected);
    if keywords.is_empty() {
        return 1.0;
    }
    let words = lowercase_words(submitted);
    let covered = keywords
        .iter()
        .filter(|k| {
            words
                .iter()
                .any(|w| w.contains(k.as_str()) || k.contains(w.as_str()))
        })
        .count();
    covered as f64 / keywords.len() as f64
}

/// Essay answers are highlighted from their grammar and vocabulary spans.
pub fn correct_essay(text: &str, annotations: &[SpanAnnotation]) -> Vec<TextSegment> {
    splice_annotations(text, annotations)
}

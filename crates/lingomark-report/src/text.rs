//! Plain-text rendering for terminals and logs.
//!
//! Markers: `~~incorrect~~`, `(+extra)`, missing words keep their `[word]`
//! placeholder, correct and neutral text is printed as-is.

use lingomark_core::model::{SegmentKind, TextSegment};
use lingomark_core::report::CorrectionReport;

/// Render segments inline with text markers.
pub fn render_segments(segments: &[TextSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment.kind {
            SegmentKind::Incorrect => {
                out.push_str("~~");
                out.push_str(&segment.text);
                out.push_str("~~");
            }
            SegmentKind::Extra => {
                out.push_str("(+");
                out.push_str(&segment.text);
                out.push(')');
            }
            SegmentKind::Correct | SegmentKind::Missing | SegmentKind::Neutral => {
                out.push_str(&segment.text)
            }
        }
    }
    out
}

/// Explanations in segment order, one per line.
pub fn render_explanations(segments: &[TextSegment]) -> Vec<String> {
    segments
        .iter()
        .filter_map(|s| {
            s.explanation
                .as_ref()
                .map(|e| format!("{}: {}", s.text.trim(), e))
        })
        .collect()
}

/// Render a whole report as indented plain text.
pub fn render_report(report: &CorrectionReport) -> String {
    let mut out = format!(
        "Submission: {} ({} answers)\n",
        report.submission.id, report.submission.answer_count
    );
    for answer in &report.answers {
        out.push_str(&format!(
            "\n[{}] {} — {}\n",
            answer.question_id, answer.kind, answer.verdict
        ));
        out.push_str(&format!("  {}\n", render_segments(&answer.segments)));
        for line in render_explanations(&answer.segments) {
            out.push_str(&format!("    - {line}\n"));
        }
        if let Some(score) = answer.improvement_score {
            out.push_str(&format!("  improvement score: {score}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingomark_core::correction::correct_fill_blank;
    use lingomark_core::model::{AnswerRecord, QuestionKind, Submission};

    #[test]
    fn markers_for_each_kind() {
        let segments = correct_fill_blank("a big dog runs", "a small dog");
        assert_eq!(render_segments(&segments), "a ~~big~~ dog (+runs)");

        let segments = correct_fill_blank("a", "a dog");
        assert_eq!(render_segments(&segments), "a [dog]");
    }

    #[test]
    fn explanations_listed_in_order() {
        let segments = correct_fill_blank("a big dog runs", "a small dog");
        assert_eq!(
            render_explanations(&segments),
            vec![
                "big: expected \"small\"".to_string(),
                "runs: not part of the expected answer".to_string()
            ]
        );
    }

    #[test]
    fn report_lists_every_answer() {
        let report = CorrectionReport::build(&Submission {
            id: "s-9".into(),
            title: String::new(),
            time_limit_secs: None,
            answers: vec![AnswerRecord {
                question_id: "q1".into(),
                kind: QuestionKind::TrueFalse,
                prompt: String::new(),
                submitted: "true".into(),
                expected: "TRUE".into(),
                grammar: vec![],
                vocabulary: vec![],
            }],
        });
        let text = render_report(&report);
        assert!(text.starts_with("Submission: s-9 (1 answers)"));
        assert!(text.contains("[q1] true_false — correct"));
    }
}

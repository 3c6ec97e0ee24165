//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use lingomark_core::model::TextSegment;
use lingomark_core::report::{AnswerCorrection, CorrectionReport};
use lingomark_core::summary::Verdict;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Render segments as a run of inline `<span>`s, one per segment.
///
/// Explanations become `title` tooltips. Inserted segments carry an extra
/// `inserted` class.
pub fn render_segments(segments: &[TextSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        let mut class = format!("seg {}", segment.kind);
        if segment.inserted {
            class.push_str(" inserted");
        }
        match &segment.explanation {
            Some(explanation) => out.push_str(&format!(
                "<span class=\"{}\" title=\"{}\">{}</span>",
                class,
                html_escape(explanation),
                html_escape(&segment.text)
            )),
            None => out.push_str(&format!(
                "<span class=\"{}\">{}</span>",
                class,
                html_escape(&segment.text)
            )),
        }
    }
    out
}

fn verdict_class(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Correct => "pass",
        Verdict::Partial => "partial",
        Verdict::Incorrect => "fail",
        Verdict::Ungraded => "ungraded",
    }
}

fn render_answer(html: &mut String, answer: &AnswerCorrection) {
    html.push_str(&format!(
        "<article class=\"answer {}\">\n",
        verdict_class(answer.verdict)
    ));
    html.push_str(&format!(
        "<h3>{} <small>{} · {}</small></h3>\n",
        html_escape(&answer.question_id),
        html_escape(&answer.kind.to_string()),
        answer.verdict
    ));
    if !answer.prompt.is_empty() {
        html.push_str(&format!(
            "<p class=\"prompt\">{}</p>\n",
            html_escape(&answer.prompt)
        ));
    }
    html.push_str("<p class=\"segments\">");
    html.push_str(&render_segments(&answer.segments));
    html.push_str("</p>\n");

    if let Some(score) = answer.improvement_score {
        html.push_str(&format!(
            "<p class=\"meta\">Improvement score: <strong>{score}</strong></p>\n"
        ));
    }
    if let Some(corrected) = &answer.corrected_text {
        html.push_str("<details>\n<summary>Corrected text</summary>\n");
        html.push_str(&format!("<p>{}</p>\n", html_escape(corrected)));
        html.push_str("</details>\n");
    }
    html.push_str("</article>\n");
}

/// Generate an HTML report from a correction report.
pub fn generate_html(report: &CorrectionReport) -> String {
    let mut html = String::new();
    let title = if report.submission.title.is_empty() {
        &report.submission.id
    } else {
        &report.submission.title
    };

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>lingomark report — {}</title>\n",
        html_escape(title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(title)));
    html.push_str(&format!(
        "<p class=\"meta\">Submission <strong>{}</strong> | {} answers | {}</p>\n",
        html_escape(&report.submission.id),
        report.submission.answer_count,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary
    let totals = &report.totals;
    html.push_str("<section class=\"dashboard\">\n<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Correct</th><th>Partial</th><th>Incorrect</th><th>Ungraded</th><th>Score</th></tr></thead>\n");
    let score = totals
        .score()
        .map(|s| format!("{:.1}%", s * 100.0))
        .unwrap_or_else(|| "-".to_string());
    html.push_str(&format!(
        "<tbody><tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr></tbody>\n",
        totals.correct, totals.partial, totals.incorrect, totals.ungraded, score
    ));
    html.push_str("</table>\n</section>\n");

    // Answers
    html.push_str("<section class=\"answers\">\n<h2>Answers</h2>\n");
    for answer in &report.answers {
        render_answer(&mut html, answer);
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>\n");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &CorrectionReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; --partial: #fef9c3; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; --partial: #713f12; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta, small { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.answer { border-left: 4px solid var(--border); padding: 0.25rem 1rem; margin: 1rem 0; }
.answer.pass { border-color: #22c55e; }
.answer.partial { border-color: #eab308; }
.answer.fail { border-color: #ef4444; }
.segments { font-size: 1.1rem; line-height: 1.8; white-space: pre-wrap; }
.seg.correct { background: var(--pass); }
.seg.incorrect { background: var(--fail); text-decoration: underline wavy #ef4444; }
.seg.missing { color: #6b7280; font-style: italic; }
.seg.extra { text-decoration: line-through; }
.seg[title] { cursor: help; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;

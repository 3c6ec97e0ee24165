//! The `lingomark correct` command.

use std::path::PathBuf;

use anyhow::Result;

use lingomark_core::parser;
use lingomark_core::report::CorrectionReport;
use lingomark_report::html::write_html_report;
use lingomark_report::text::render_report;

use crate::config::load_config_from;

pub fn execute(
    submission_path: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let output = output.unwrap_or(config.output_dir);
    let format = format.unwrap_or(config.default_format);

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html", "text"]
    } else {
        format.split(',').map(str::trim).collect()
    };
    if let Some(unknown) = formats
        .iter()
        .find(|f| !matches!(**f, "json" | "html" | "text"))
    {
        anyhow::bail!("unknown format '{unknown}' (expected json, html, text, or all)");
    }

    let submissions = parser::load_submissions(&submission_path)?;
    anyhow::ensure!(
        !submissions.is_empty(),
        "no submissions found in {}",
        submission_path.display()
    );

    let reports: Vec<CorrectionReport> = submissions.iter().map(CorrectionReport::build).collect();
    print_summary(&reports);

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S").to_string();
    for report in &reports {
        let stem = report.file_stem(&timestamp);
        for fmt in &formats {
            match *fmt {
                "json" => {
                    let path = output.join(format!("{stem}.json"));
                    report.save_json(&path)?;
                    tracing::info!("saved JSON report for {}", report.submission.id);
                    eprintln!("Results saved to: {}", path.display());
                }
                "html" => {
                    let path = output.join(format!("{stem}.html"));
                    write_html_report(report, &path)?;
                    tracing::info!("saved HTML report for {}", report.submission.id);
                    eprintln!("HTML report: {}", path.display());
                }
                _ => {
                    println!("{}", render_report(report));
                }
            }
        }
    }

    Ok(())
}

fn print_summary(reports: &[CorrectionReport]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec![
        "Submission",
        "Answers",
        "Correct",
        "Partial",
        "Incorrect",
        "Ungraded",
        "Score",
    ]);

    for report in reports {
        let totals = &report.totals;
        let score = totals
            .score()
            .map(|s| format!("{:.1}%", s * 100.0))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(&report.submission.id),
            Cell::new(report.submission.answer_count),
            Cell::new(totals.correct),
            Cell::new(totals.partial),
            Cell::new(totals.incorrect),
            Cell::new(totals.ungraded),
            Cell::new(score),
        ]);
    }

    eprintln!("{table}");
}

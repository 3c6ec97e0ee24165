//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lingomark() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("lingomark").unwrap()
}

#[test]
fn validate_toml_submission() {
    lingomark()
        .arg("validate")
        .arg("--submission")
        .arg("../../quizzes/german-a1.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("German A1: Articles (5 answers)"))
        .stdout(predicate::str::contains("All submissions valid"));
}

#[test]
fn validate_directory() {
    lingomark()
        .arg("validate")
        .arg("--submission")
        .arg("../../quizzes")
        .assert()
        .success()
        .stdout(predicate::str::contains("German A1: Articles"))
        .stdout(predicate::str::contains("English B1: Writing"));
}

#[test]
fn validate_reports_warnings() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("odd.toml");
    std::fs::write(
        &path,
        r#"
[submission]
id = "odd"

[[answers]]
question_id = "q1"
kind = "matching"
submitted = "a-1"

[[answers]]
question_id = "q1"
kind = "essay"
submitted = "hello"
"#,
    )
    .unwrap();

    lingomark()
        .arg("validate")
        .arg("--submission")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown question kind 'matching'"))
        .stdout(predicate::str::contains("duplicate question ID"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    lingomark()
        .arg("validate")
        .arg("--submission")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn correct_text_report_to_stdout() {
    let tmp = TempDir::new().unwrap();
    lingomark()
        .arg("correct")
        .arg("--submission")
        .arg("../../quizzes/german-a1.toml")
        .arg("--format")
        .arg("text")
        .arg("--output")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Submission: german-a1-quiz-3 (5 answers)"))
        .stdout(predicate::str::contains("habe ~~ein~~ Katze"))
        .stdout(predicate::str::contains("Accusative masculine article → einen"))
        .stdout(predicate::str::contains("improvement score: 90"));
}

#[test]
fn correct_writes_json_report() {
    let tmp = TempDir::new().unwrap();
    lingomark()
        .arg("correct")
        .arg("--submission")
        .arg("../../quizzes/german-a1.toml")
        .arg("--format")
        .arg("json")
        .arg("--output")
        .arg(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Results saved to"))
        .stderr(predicate::str::contains("saved JSON report for german-a1-quiz-3"));

    let report_path = std::fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .find(|p| p.extension().is_some_and(|ext| ext == "json"))
        .expect("json report written");
    let content = std::fs::read_to_string(report_path).unwrap();
    let report: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert_eq!(report["submission"]["id"], "german-a1-quiz-3");
    assert_eq!(report["answers"].as_array().unwrap().len(), 5);
    assert_eq!(report["totals"]["correct"], 1);
    assert_eq!(report["totals"]["partial"], 2);
    assert_eq!(report["totals"]["incorrect"], 1);
    assert_eq!(report["totals"]["ungraded"], 1);
    assert_eq!(report["answers"][4]["corrected_text"], "Ich habe einen Hund.");
}

#[test]
fn correct_writes_html_report() {
    let tmp = TempDir::new().unwrap();
    lingomark()
        .arg("correct")
        .arg("--submission")
        .arg("../../quizzes/english-b1.json")
        .arg("--format")
        .arg("html")
        .arg("--output")
        .arg(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("HTML report"));

    let html_path = std::fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .find(|p| p.extension().is_some_and(|ext| ext == "html"))
        .expect("html report written");
    let html = std::fs::read_to_string(html_path).unwrap();
    assert!(html.contains("english-b1-writing"));
    assert!(html.contains("libary"));
}

#[test]
fn correct_keeps_reports_inside_output_dir() {
    let tmp = TempDir::new().unwrap();
    let quizzes = tmp.path().join("quizzes");
    std::fs::create_dir_all(&quizzes).unwrap();
    for name in ["a.toml", "b.toml"] {
        std::fs::write(
            quizzes.join(name),
            r#"
[submission]
id = "../escaped"

[[answers]]
question_id = "q1"
kind = "multiple_choice"
submitted = "der"
expected = "der"
"#,
        )
        .unwrap();
    }
    let output = tmp.path().join("out");

    lingomark()
        .arg("correct")
        .arg("--submission")
        .arg(&quizzes)
        .arg("--format")
        .arg("json,html")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let mut top_level: Vec<String> = std::fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    top_level.sort();
    assert_eq!(top_level, vec!["out", "quizzes"]);

    let written: Vec<String> = std::fs::read_dir(&output)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(written.len(), 4, "one JSON and one HTML per submission: {written:?}");
    assert!(written.iter().all(|name| name.starts_with("___escaped-")));
}

#[test]
fn correct_rejects_unknown_format() {
    lingomark()
        .arg("correct")
        .arg("--submission")
        .arg("../../quizzes/german-a1.toml")
        .arg("--format")
        .arg("pdf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format 'pdf'"));
}

#[test]
fn init_creates_files() {
    let tmp = TempDir::new().unwrap();
    lingomark()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created lingomark.toml"))
        .stdout(predicate::str::contains("Created quizzes/example.toml"));

    assert!(tmp.path().join("lingomark.toml").exists());
    assert!(tmp.path().join("quizzes/example.toml").exists());

    // The generated example must itself be valid.
    lingomark()
        .current_dir(tmp.path())
        .arg("validate")
        .arg("--submission")
        .arg("quizzes/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("All submissions valid"));
}

#[test]
fn init_skips_existing_files() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("lingomark.toml"), "output_dir = \"mine\"\n").unwrap();

    lingomark()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("lingomark.toml already exists, skipping."));

    let config = std::fs::read_to_string(tmp.path().join("lingomark.toml")).unwrap();
    assert_eq!(config, "output_dir = \"mine\"\n");
}

#[test]
fn timer_with_zero_seconds_expires() {
    lingomark()
        .arg("timer")
        .arg("--seconds")
        .arg("0")
        .assert()
        .success()
        .stdout(predicate::str::contains("Time is up after 0:00."));
}

#[test]
fn timer_stops_on_quit() {
    lingomark()
        .arg("timer")
        .arg("--seconds")
        .arg("600")
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Timer stopped with"));
}

#[test]
fn help_output() {
    lingomark()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("correct"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("timer"))
        .stdout(predicate::str::contains("init"));
}

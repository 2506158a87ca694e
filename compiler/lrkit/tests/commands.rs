// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests for the lrkit commands.
//!
//! Each test loads a language from `tests/fixtures/` and runs a command over
//! a fixture input, comparing the full report.

use std::path::{Path, PathBuf};

use lrkit::commands::{check_language, lex_file, parse_file, CommandError};
use pretty_assertions::assert_eq;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Run a command against the fixtures directory, returning its verdict and
/// everything it wrote.
fn run(command: impl FnOnce(&mut Vec<u8>, &Path) -> Result<bool, CommandError>) -> (bool, String) {
    let mut out = Vec::new();
    let ok = command(&mut out, &fixtures()).expect("command failed");
    (ok, String::from_utf8(out).unwrap())
}

#[test]
fn check_lists_productions() {
    let (ok, report) = run(|out, dir| check_language(out, dir, "assign"));
    assert!(ok);
    assert_eq!(
        report,
        "\
Language 'assign': 6 productions, 8 states
Terminals: $ = id num

Productions:
    0  S' -> S
    1  S -> id S2
    2  S2 -> = VAL
    3  S2 -> ''
    4  VAL -> id
    5  VAL -> num
"
    );
}

#[test]
fn lex_prints_tokens() {
    let (ok, report) = run(|out, dir| lex_file(out, dir, "assign", &dir.join("assign.txt")));
    assert!(ok);
    let expected = format!(
        "Tokens for '{}':\n  id \"x\" = x\n  = \"=\" = =\n  num \"20\" = 20\n  $\n",
        fixtures().join("assign.txt").display()
    );
    assert_eq!(report, expected);
}

#[test]
fn lex_reports_and_skips_unrecognized_input() {
    let (ok, report) = run(|out, dir| lex_file(out, dir, "expr", &dir.join("stray.txt")));
    assert!(!ok);
    let lines: Vec<&str> = report.lines().skip(1).collect();
    assert_eq!(
        lines,
        [
            "  num \"1\" = 1",
            "  error: Unrecognized character sequence: #",
            "  num \"2\" = 2",
            "  $",
        ]
    );
}

#[test]
fn parse_prints_reductions_and_tree() {
    let (ok, report) = run(|out, dir| parse_file(out, dir, "expr", &dir.join("sum.txt")));
    assert!(ok);
    let expected = format!(
        "\
Reductions for '{}':
  F -> num
  M -> F
  S -> M
  F -> num
  M -> F
  F -> num
  M -> M * F
  S -> S + M

Accepted: (S (S (M (F 1))) + (M (M (F 2)) * (F 3)))
",
        fixtures().join("sum.txt").display()
    );
    assert_eq!(report, expected);
}

#[test]
fn parse_skips_comments() {
    let (ok, report) = run(|out, dir| parse_file(out, dir, "expr", &dir.join("member.txt")));
    assert!(ok);
    assert!(report.ends_with("Accepted: (S (M (M (F ( (S (S (M (F a (DOT . b)))) + (M (F 2))) ))) * (F c (DOT))))\n"));
}

#[test]
fn parse_failure_reports_errors() {
    let (ok, report) = run(|out, dir| parse_file(out, dir, "expr", &dir.join("unclosed.txt")));
    assert!(!ok);
    assert!(report.contains("  S -> S + M\n\nErrors:\n  Unexpected end of file\n"));
}

#[test]
fn assignment_language() {
    let (ok, report) = run(|out, dir| parse_file(out, dir, "assign", &dir.join("assign.txt")));
    assert!(ok);
    assert!(report.ends_with("Accepted: (S x (S2 = (VAL 20)))\n"));
}

#[test]
fn missing_language() {
    let mut out = Vec::new();
    let error = check_language(&mut out, &fixtures(), "nope").unwrap_err();
    assert!(matches!(error, CommandError::Load(_)));
    assert!(error.to_string().starts_with("Could not read "));
    assert!(out.is_empty());
}

#[test]
fn missing_input_file() {
    let mut out = Vec::new();
    let dir = fixtures();
    let error = parse_file(&mut out, &dir, "expr", &dir.join("absent.txt")).unwrap_err();
    assert!(matches!(error, CommandError::Open { .. }));
}

#[test]
fn tokenizer_failure_aborts_parse() {
    let mut out = Vec::new();
    let dir = fixtures();
    let error = parse_file(&mut out, &dir, "expr", &dir.join("stray.txt")).unwrap_err();
    assert_eq!(error.to_string(), "error reading input: Unrecognized character sequence: #");
}

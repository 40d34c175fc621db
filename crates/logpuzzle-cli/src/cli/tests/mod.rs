//! CLI parse, usage and list-mode tests.

use super::commands::run_list;
use super::{usage_exit, Cli};
use clap::Parser;
use logpuzzle_core::config::PuzzleConfig;
use std::fs;
use std::path::Path;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_logfile_only() {
    let cli = parse(&["logpuzzle", "animal_code.google.com"]);
    assert_eq!(cli.logfile, Path::new("animal_code.google.com"));
    assert!(cli.todir.is_none());
    assert!(cli.timeout.is_none());
    assert!(!cli.no_open);
}

#[test]
fn cli_parse_todir_long_and_short() {
    let cli = parse(&["logpuzzle", "--todir", "pics", "place_code.google.com"]);
    assert_eq!(cli.todir.as_deref(), Some(Path::new("pics")));
    assert_eq!(cli.logfile, Path::new("place_code.google.com"));

    let cli = parse(&["logpuzzle", "animal_code.google.com", "-d", "/tmp/out"]);
    assert_eq!(cli.todir.as_deref(), Some(Path::new("/tmp/out")));
}

#[test]
fn cli_parse_missing_logfile_fails() {
    assert!(Cli::try_parse_from(["logpuzzle", "--todir", "pics"]).is_err());
}

#[test]
fn cli_parse_rejects_extra_positional() {
    assert!(Cli::try_parse_from(["logpuzzle", "a_b.com", "c_d.com"]).is_err());
}

#[test]
fn overrides_replace_config_values() {
    let cli = parse(&["logpuzzle", "a_code.google.com", "--timeout", "15", "--no-open"]);
    let mut cfg = PuzzleConfig::default();
    cli.apply_overrides(&mut cfg);
    assert_eq!(cfg.timeout_secs, Some(15));
    assert!(!cfg.open_viewer);
}

#[test]
fn no_overrides_keep_config() {
    let cli = parse(&["logpuzzle", "a_code.google.com"]);
    let mut cfg = PuzzleConfig {
        timeout_secs: Some(99),
        ..PuzzleConfig::default()
    };
    cli.apply_overrides(&mut cfg);
    assert_eq!(cfg.timeout_secs, Some(99));
    assert!(cfg.open_viewer);
}

#[test]
fn no_arguments_exit_with_status_one() {
    assert_eq!(usage_exit(0), Some(1));
    assert_eq!(usage_exit(1), Some(1));
    assert_eq!(usage_exit(2), None);
    assert_eq!(usage_exit(4), None);
}

#[test]
fn list_prints_ordered_urls_one_per_line() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("animal_code.google.com");
    let puzzle = "/edu/languages/google-python-class/images/puzzle/";
    let mut text = String::new();
    for code in ["babf", "baaa", "baaa", "baab"] {
        text.push_str(&format!(
            "10.254.254.28 - - [06/Aug/2007:00:13:48 -0700] \"GET {}a-{}.jpg HTTP/1.0\" 302 528 \"-\" \"Mozilla/5.0\"\n",
            puzzle, code
        ));
    }
    fs::write(&log, text).unwrap();

    let mut out = Vec::new();
    run_list(&log, &PuzzleConfig::default(), &mut out).unwrap();
    let printed = String::from_utf8(out).unwrap();
    let expected: Vec<String> = ["baaa", "baab", "babf"]
        .iter()
        .map(|c| format!("http://code.google.com{}a-{}.jpg", puzzle, c))
        .collect();
    assert_eq!(printed.lines().collect::<Vec<_>>(), expected);
    assert!(printed.ends_with('\n'));
}

#[test]
fn list_of_missing_log_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut out = Vec::new();
    let res = run_list(
        &dir.path().join("animal_code.google.com"),
        &PuzzleConfig::default(),
        &mut out,
    );
    assert!(res.is_err());
    assert!(out.is_empty());
}

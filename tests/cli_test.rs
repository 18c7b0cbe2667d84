//! End-to-end tests through command dispatch

use std::path::PathBuf;

use clap::Parser;
use rstest::rstest;
use tempfile::TempDir;

use orgtree::application::ApplicationError;
use orgtree::cli::{execute_command, Cli, CliError};
use orgtree::domain::DomainError;
use orgtree::infrastructure::InfraError;
use orgtree::util::testing;

const SAMPLE_ROSTER: &str = "tests/resources/rosters/sample_org.toml";

fn run(args: &[&str]) -> Result<(), CliError> {
    let cli = Cli::parse_from(std::iter::once("orgtree").chain(args.iter().copied()));
    execute_command(&cli)
}

fn create_roster(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("roster.toml");
    std::fs::write(&path, content).expect("write roster");
    path
}

#[test]
fn given_sample_org_when_checking_then_passes() {
    testing::init_test_setup();
    assert!(run(&["check", "--rounds", "3", "--seed", "1"]).is_ok());
}

#[test]
fn given_roster_without_expected_when_checking_then_passes_against_own_build() {
    assert!(run(&["check", "--roster", SAMPLE_ROSTER, "--rounds", "5", "--seed", "3"]).is_ok());
}

#[test]
fn given_wrong_expected_when_checking_then_check_failed_exit_one() {
    // Arrange
    let args = ["check", "--rounds", "0", "--expected", "Kirk{Mark}"];

    // Act
    let err = run(&args).unwrap_err();

    // Assert
    assert_eq!(err.exit_code(), 1);
    match err {
        CliError::CheckFailed(message) => {
            assert!(message.starts_with("Incorrect tree"), "{message}")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn given_roster_and_wrong_ceo_when_checking_then_reports_ceo() {
    let err = run(&[
        "check",
        "--roster",
        SAMPLE_ROSTER,
        "--rounds",
        "0",
        "--expected",
        "Spock{Kirk}",
    ])
    .unwrap_err();

    assert!(
        matches!(err, CliError::CheckFailed(ref message)
            if message == "Incorrect ceo, expected: Spock, actual: Kirk"),
        "{err}"
    );
}

#[test]
fn given_roster_with_detached_people_when_showing_then_succeeds() {
    let dir = TempDir::new().unwrap();
    let path = create_roster(
        &dir,
        r#"
[[person]]
key = "kirk"
name = "Kirk"

[[person]]
key = "mark"
name = "Mark"
manager = "kirk"

[[person]]
key = "a"
name = "Alpha"
manager = "b"

[[person]]
key = "b"
name = "Beta"
manager = "a"
"#,
    );

    assert!(run(&["show", "--roster", path.to_str().unwrap()]).is_ok());
    assert!(run(&["stringify", "--roster", path.to_str().unwrap()]).is_ok());
}

#[rstest]
#[case("/nonexistent/roster.toml", 66)]
#[case("tests/resources/rosters/unknown_manager.toml", 65)]
#[case("tests/resources/rosters/two_ceos.toml", 65)]
fn given_bad_roster_when_stringifying_then_exit_code(#[case] roster: &str, #[case] code: i32) {
    let err = run(&["stringify", "--roster", roster]).unwrap_err();
    assert_eq!(err.exit_code(), code, "{err}");
}

#[test]
fn given_missing_roster_when_showing_then_io_error() {
    let err = run(&["show", "--roster", "/nonexistent/roster.toml"]).unwrap_err();
    assert!(matches!(err, CliError::Infra(InfraError::Io { .. })), "{err}");
}

#[test]
fn given_two_ceos_when_checking_then_domain_error() {
    let err = run(&["check", "--roster", "tests/resources/rosters/two_ceos.toml"]).unwrap_err();
    assert!(
        matches!(
            err,
            CliError::Infra(InfraError::Application(ApplicationError::Domain(
                DomainError::MultipleRoots(_)
            )))
        ),
        "{err}"
    );
}

#[test]
fn given_missing_config_file_when_running_then_config_exit_code() {
    let err = run(&["--config", "/nonexistent/orgtree.toml", "stringify"]).unwrap_err();
    assert_eq!(err.exit_code(), 78);
}

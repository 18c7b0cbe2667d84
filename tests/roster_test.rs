//! Tests for roster loading

use std::path::{Path, PathBuf};

use rstest::rstest;
use tempfile::TempDir;

use orgtree::application::SAMPLE_EXPECTED;
use orgtree::domain::{build_tree, stringify, DomainError};
use orgtree::infrastructure::{load_roster, InfraError};

fn create_roster(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write roster");
    path
}

#[test]
fn given_sample_roster_when_loading_then_builds_sample_org() {
    let people = load_roster(Path::new("tests/resources/rosters/sample_org.toml")).unwrap();

    let tree = build_tree(&people).unwrap();

    assert_eq!(people.len(), 10);
    assert_eq!(stringify(&tree).unwrap(), SAMPLE_EXPECTED);
}

#[test]
fn given_two_ceos_roster_when_building_then_multiple_roots() {
    let people = load_roster(Path::new("tests/resources/rosters/two_ceos.toml")).unwrap();

    let err = build_tree(&people).unwrap_err();

    assert!(matches!(err, DomainError::MultipleRoots(_)));
}

#[rstest]
#[case("tests/resources/rosters/unknown_manager.toml", "unknown manager key 'khan'")]
fn given_bad_roster_when_loading_then_roster_error(#[case] path: &str, #[case] expected: &str) {
    let err = load_roster(Path::new(path)).unwrap_err();

    assert!(matches!(err, InfraError::Roster { .. }));
    assert!(err.to_string().contains(expected), "{err}");
}

#[test]
fn given_duplicate_key_when_loading_then_roster_error() {
    let temp = TempDir::new().unwrap();
    let path = create_roster(
        &temp,
        "dup.toml",
        "[[person]]\nkey = \"a\"\nname = \"A\"\n\n[[person]]\nkey = \"a\"\nname = \"B\"\n",
    );

    let err = load_roster(&path).unwrap_err();

    assert!(err.to_string().contains("duplicate key: a"), "{err}");
}

#[test]
fn given_nonexistent_file_when_loading_then_io_error() {
    let err = load_roster(Path::new("/nonexistent/roster.toml")).unwrap_err();
    assert!(matches!(err, InfraError::Io { .. }));
}

#[test]
fn given_roster_when_loading_twice_then_ids_are_fresh() {
    let path = Path::new("tests/resources/rosters/sample_org.toml");

    let first = load_roster(path).unwrap();
    let second = load_roster(path).unwrap();

    assert_ne!(first[0].id(), second[0].id());
    assert_eq!(first[0].name(), second[0].name());
}

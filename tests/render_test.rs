//! Tests for the canonical string form

use rstest::rstest;

use orgtree::application::{run_check, sample_org, SAMPLE_EXPECTED};
use orgtree::domain::{build_tree, stringify, DomainError, OrgTree, Person, TreeDisplay};

#[test]
fn given_sample_org_when_stringifying_then_matches_expected() {
    let tree = build_tree(&sample_org()).unwrap();
    assert_eq!(stringify(&tree).unwrap(), SAMPLE_EXPECTED);
}

#[test]
fn given_single_person_when_stringifying_then_name_only() {
    let tree = build_tree(&[Person::new("Kirk", None)]).unwrap();
    assert_eq!(stringify(&tree).unwrap(), "Kirk");
}

#[test]
fn given_tree_when_stringifying_twice_then_same_result() {
    let tree = build_tree(&sample_org()).unwrap();

    let first = stringify(&tree).unwrap();
    let second = stringify(&tree).unwrap();

    assert_eq!(first, second);
}

#[rstest]
#[case(&["bob", "Alice", "carol"], "Boss{Alice,bob,carol}")]
#[case(&["Zoe", "adam"], "Boss{adam,Zoe}")]
#[case(&["Tom", "Tom"], "Boss{Tom,Tom}")]
#[case(&["Zoe", "Émile"], "Boss{Émile,Zoe}")]
#[case(&["Ölaf", "Oscar", "Otto"], "Boss{Ölaf,Oscar,Otto}")]
fn given_reports_when_stringifying_then_sorted_case_insensitively(
    #[case] reports: &[&str],
    #[case] expected: &str,
) {
    let boss = Person::new("Boss", None);
    let mut people = vec![boss.clone()];
    people.extend(reports.iter().map(|name| Person::new(*name, Some(&boss))));

    let tree = build_tree(&people).unwrap();

    assert_eq!(stringify(&tree).unwrap(), expected);
}

#[test]
fn given_equal_names_with_different_reports_when_stringifying_then_order_is_stable() {
    // Two Toms: one with a report, one without. Order must not depend on input order.
    let boss = Person::new("Boss", None);
    let tom1 = Person::new("Tom", Some(&boss));
    let tom2 = Person::new("Tom", Some(&boss));
    let amy = Person::new("Amy", Some(&tom2));

    let forward = build_tree(&[boss.clone(), tom1.clone(), tom2.clone(), amy.clone()]).unwrap();
    let backward = build_tree(&[amy, tom2, tom1, boss]).unwrap();

    assert_eq!(stringify(&forward).unwrap(), "Boss{Tom,Tom{Amy}}");
    assert_eq!(stringify(&backward).unwrap(), "Boss{Tom,Tom{Amy}}");
}

#[test]
fn given_long_management_chain_when_stringifying_then_does_not_overflow() {
    // Arrange: P0 manages P1 manages P2 ... one level per person
    const LEN: usize = 100_000;
    let mut people = vec![Person::new("P0", None)];
    for i in 1..LEN {
        let report = Person::new(format!("P{i}"), Some(&people[i - 1]));
        people.push(report);
    }
    people.reverse();
    let mut expected = (0..LEN).map(|i| format!("P{i}")).collect::<Vec<_>>().join("{");
    expected.push_str(&"}".repeat(LEN - 1));

    // Act
    let tree = build_tree(&people).unwrap();
    let text = stringify(&tree).unwrap();

    // Assert
    assert_eq!(tree.depth(), LEN);
    assert_eq!(text, expected);
    assert!(run_check(&people, &expected, "P0").success);
}

#[test]
fn given_person_under_two_managers_when_stringifying_then_multiple_managers() {
    // Arrange
    let mut tree = OrgTree::new();
    let kirk = tree.insert_node(Person::new("Kirk", None), None);
    let mark = tree.insert_node(Person::new("Mark", None), Some(kirk));
    let spock = tree.insert_node(Person::new("Spock", None), Some(kirk));
    let tom = Person::new("Tom", None);
    let tom_id = tom.id();
    let tom_idx = tree.insert_node(tom, Some(mark));
    tree.attach(spock, tom_idx).unwrap();

    // Act
    let err = stringify(&tree).unwrap_err();

    // Assert
    assert_eq!(
        err,
        DomainError::MultipleManagers {
            id: tom_id,
            name: "Tom".to_string()
        }
    );
    assert!(err.to_string().contains("reports to more than one person"));
}

#[test]
fn given_cycle_through_root_when_stringifying_then_root_reported() {
    let mut tree = OrgTree::new();
    let kirk = tree.insert_node(Person::new("Kirk", None), None);
    let mark = tree.insert_node(Person::new("Mark", None), Some(kirk));
    tree.attach(mark, kirk).unwrap();

    let err = stringify(&tree).unwrap_err();

    assert!(matches!(err, DomainError::MultipleManagers { ref name, .. } if name == "Kirk"));
}

#[test]
fn given_sample_org_when_displaying_then_lists_every_person() {
    let tree = build_tree(&sample_org()).unwrap();

    let text = tree.to_display_tree().to_string();

    assert_eq!(text.lines().count(), 10);
    assert!(text.starts_with("Kirk"));
}

#[test]
fn given_empty_tree_when_displaying_then_placeholder() {
    assert_eq!(
        OrgTree::new().to_display_tree().to_string().trim(),
        "Empty tree"
    );
}

use super::*;
use crate::test_support::{Account, Car, Vehicle};

fn vehicle(kind: Option<&str>, note: Option<&str>, manufacturer_id: Option<u64>) -> Vehicle {
    Vehicle {
        note: note.map(str::to_string),
        kind: kind.map(str::to_string),
        manufacturer_id,
    }
}

// ---- valid_fields --------------------------------------------------------

#[test]
fn field_without_rules_is_valid() {
    let v = vehicle(Some("car"), Some("a note"), Some(1));

    assert!(valid_fields(&v, &["note"], None));
}

#[test]
fn unknown_field_is_valid() {
    let v = vehicle(Some("car"), None, Some(1));

    assert!(valid_fields(&v, &["fake_attribute"], None));
}

#[test]
fn invalid_field_fails() {
    let v = vehicle(None, None, Some(1));

    assert!(!valid_fields(&v, &["kind"], None));
}

#[test]
fn only_named_fields_are_checked() {
    let v = vehicle(None, Some("notie"), Some(1));

    assert!(valid_fields(&v, &["note"], None));
    assert!(!valid_fields(&v, &["note", "kind"], None));
}

#[test]
fn kinds_restrict_which_rules_run() {
    let car = Car {
        kind: Some("car".to_string()),
        manufacturer_id: Some(1),
        wheels: Some(3),
        ..Car::default()
    };

    assert!(!valid_fields(&car, &["wheels"], None));
    assert!(valid_fields(&car, &["wheels"], Some(&["presence"][..])));
    assert!(!valid_fields(&car, &["wheels"], Some(&["numericality"][..])));
}

// ---- validate_fields -----------------------------------------------------

#[test]
fn reports_full_messages() {
    let v = vehicle(None, Some("notie"), Some(1));

    let result = validate_fields(&v, &["kind"]);

    assert!(!result.valid);
    assert_eq!(result.messages, ["Kind can't be blank"]);
}

#[test]
fn reports_messages_for_every_failing_field_in_order() {
    let v = vehicle(None, Some("notie"), None);

    let result = validate_fields(&v, &["note", "kind", "manufacturer_id"]);

    assert_eq!(
        result.messages,
        ["Kind can't be blank", "Manufacturer can't be blank"]
    );
}

#[test]
fn subtype_inherits_parent_rules() {
    let car = Car::default();

    let result = validate_fields(&car, &["kind", "wheels"]);

    assert_eq!(
        result.messages,
        ["Kind can't be blank", "Wheels is not a number"]
    );
}

#[test]
fn duplicate_fields_report_once() {
    let v = vehicle(None, None, Some(1));

    let result = validate_fields(&v, &["kind", "kind"]);

    assert_eq!(result.messages, ["Kind can't be blank"]);
}

#[test]
fn cross_field_rule_reads_the_record() {
    let account = Account {
        email: Some("a@b.c".to_string()),
        password: Some("hunter2".to_string()),
        password_confirmation: Some("hunter3".to_string()),
    };

    let result = validate_fields(&account, &["password_confirmation"]);

    assert_eq!(
        result.messages,
        ["Password confirmation doesn't match Password"]
    );
}

#[test]
fn empty_field_list_passes() {
    let v = Vehicle::default();

    assert_eq!(validate_fields(&v, &[]), FieldValidation::pass());
}

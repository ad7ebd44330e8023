use crate::value::{FieldMap, Value};

// ---- helpers -----------------------------------------------------------

fn v_txt(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn record(pairs: &[(&str, Value)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

// ---- blank -------------------------------------------------------------

#[test]
fn blank_covers_null_whitespace_and_empty_collections() {
    assert!(Value::Null.is_blank());
    assert!(v_txt("").is_blank());
    assert!(v_txt("  \t").is_blank());
    assert!(Value::List(vec![]).is_blank());
    assert!(Value::Record(FieldMap::new()).is_blank());
}

#[test]
fn numbers_and_booleans_are_never_blank() {
    assert!(!Value::Int(0).is_blank());
    assert!(!Value::Uint(0).is_blank());
    assert!(!Value::Float(0.0).is_blank());
    assert!(!Value::Bool(false).is_blank());
    assert!(!v_txt("car").is_blank());
}

// ---- numeric view ------------------------------------------------------

#[test]
fn numeric_text_reads_as_number() {
    assert_eq!(v_txt(" 4 ").as_f64(), Some(4.0));
    assert_eq!(v_txt("four").as_f64(), None);
    assert_eq!(v_txt("NaN").as_f64(), None);
    assert_eq!(Value::Uint(7).as_f64(), Some(7.0));
}

// ---- json shape ----------------------------------------------------------

#[test]
fn serializes_as_natural_json() {
    let value = Value::records([record(&[
        ("kind", v_txt("car")),
        ("wheels", Value::Int(4)),
        ("note", Value::Null),
    ])]);

    let json = serde_json::to_value(&value).expect("value should serialize");

    assert_eq!(
        json,
        serde_json::json!([{ "kind": "car", "wheels": 4, "note": null }])
    );
}

#[test]
fn deserializes_from_natural_json() {
    let json = serde_json::json!({ "kind": "car", "wheels": 4, "parts": [1, 2] });
    let value: Value = serde_json::from_value(json).expect("value should deserialize");

    let map = value.as_record().expect("object should become a record");
    assert_eq!(map.get("kind"), Some(&v_txt("car")));
    assert_eq!(map.get("wheels"), Some(&Value::Int(4)));
    assert_eq!(
        map.get("parts"),
        Some(&Value::List(vec![Value::Int(1), Value::Int(2)]))
    );
}

#[test]
fn record_keeps_insertion_order() {
    let map = record(&[
        ("wheels", Value::Int(4)),
        ("kind", v_txt("car")),
        ("note", Value::Null),
    ]);

    let keys: Vec<_> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, ["wheels", "kind", "note"]);
}

#[test]
fn display_renders_scalars_bare() {
    assert_eq!(v_txt("car").to_string(), "car");
    assert_eq!(Value::Int(-3).to_string(), "-3");
    assert_eq!(Value::Null.to_string(), "");
}

#[test]
fn option_converts_to_null() {
    assert_eq!(Value::from(None::<String>), Value::Null);
    assert_eq!(Value::from(Some("car")), v_txt("car"));
}

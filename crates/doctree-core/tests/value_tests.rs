use doctree_core::{Format, Map, Number, SetError, Value};

fn doc(json: &str) -> Value {
    Format::Json.try_parse(json.as_bytes()).unwrap()
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn field_lookup_returns_child_or_null() {
    let value = doc(r#"{"a": 1, "b": null}"#);
    assert_eq!(value["a"], Value::from(1));
    assert!(value["b"].is_null());
    assert!(value["missing"].is_null());
    assert!(Value::from(3)["a"].is_null());
}

#[test]
fn index_lookup_on_arrays() {
    let value = doc("[10, 20]");
    assert_eq!(value[1], Value::from(20));
    assert!(value[2].is_null());
}

#[test]
fn index_zero_on_non_array_is_the_value_itself() {
    for value in [doc(r#"{"k": "v"}"#), Value::from("s"), Value::from(1.5), Value::from(false)] {
        assert_eq!(value[0], value);
        assert!(value[1].is_null());
    }
}

#[test]
fn index_zero_on_null_is_null() {
    assert!(Value::Null[0].is_null());
}

#[test]
fn misses_propagate_through_chains() {
    let value = doc(r#"{"a": [{"b": 1}]}"#);
    assert_eq!(value["a"][0]["b"], Value::from(1));
    assert!(value["x"][0]["b"][5]["c"].is_null());
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn duplicate_keys_keep_one_entry_with_last_value() {
    let value: Value = [("k", Value::from(1)), ("other", Value::from(2)), ("k", Value::from(3))]
        .into_iter()
        .collect();
    assert_eq!(value.len(), 2);
    assert_eq!(value["k"], Value::from(3));
}

#[test]
fn object_equality_ignores_insertion_order() {
    assert_eq!(doc(r#"{"a": 1, "b": 2}"#), doc(r#"{"b": 2, "a": 1}"#));
}

#[test]
fn array_order_is_significant() {
    assert_ne!(doc("[1, 2]"), doc("[2, 1]"));
}

#[test]
fn clones_are_independent() {
    let mut original = doc(r#"{"list": [1]}"#);
    let snapshot = original.clone();
    original
        .as_object_mut()
        .unwrap()
        .get_mut("list")
        .unwrap()
        .append(Value::from(2));
    assert_eq!(snapshot, doc(r#"{"list": [1]}"#));
    assert_eq!(original, doc(r#"{"list": [1, 2]}"#));
}

// ============================================================================
// Mutation
// ============================================================================

#[test]
fn set_field_on_object_inserts_and_replaces() {
    let mut value = Value::object();
    value.set_field("a", Value::from(1)).unwrap();
    value.set_field("a", Value::from(2)).unwrap();
    assert_eq!(value, doc(r#"{"a": 2}"#));
}

#[test]
fn set_field_on_non_object_is_rejected_and_leaves_value() {
    let mut value = Value::from("text");
    let err = value.set_field("a", Value::from(1)).unwrap_err();
    assert_eq!(
        err,
        SetError::NotAnObject {
            key: "a".to_string(),
            found: "string",
        }
    );
    assert_eq!(value, Value::from("text"));
}

#[test]
fn set_index_replaces_or_appends_at_length() {
    let mut value = doc("[1, 2]");
    value.set_index(0, Value::from(9)).unwrap();
    value.set_index(2, Value::from(3)).unwrap();
    assert_eq!(value, doc("[9, 2, 3]"));
}

#[test]
fn set_index_past_length_is_rejected() {
    let mut value = doc("[1]");
    assert_eq!(
        value.set_index(3, Value::from(0)),
        Err(SetError::IndexOutOfRange { index: 3, len: 1 })
    );
    assert_eq!(value, doc("[1]"));
}

#[test]
fn set_index_on_non_array_is_rejected() {
    let mut value = Value::object();
    assert_eq!(
        value.set_index(0, Value::from(1)),
        Err(SetError::NotAnArray {
            index: 0,
            found: "object",
        })
    );
}

#[test]
fn append_to_array_pushes() {
    let mut value = doc("[1]");
    value.append(Value::from(2));
    assert_eq!(value, doc("[1, 2]"));
}

#[test]
fn append_to_scalar_or_object_wraps_in_array() {
    let mut scalar = Value::from("first");
    scalar.append(Value::from("second"));
    assert_eq!(scalar, doc(r#"["first", "second"]"#));

    let mut object = doc(r#"{"a": 1}"#);
    object.append(Value::from(2));
    assert_eq!(object, doc(r#"[{"a": 1}, 2]"#));
}

#[test]
fn append_to_null_starts_an_array() {
    let mut value = Value::Null;
    value.append(Value::from(1));
    assert_eq!(value, doc("[1]"));
}

#[test]
fn remove_at_on_array() {
    let mut value = doc("[1, 2, 3]");
    assert_eq!(value.remove_at(1), Some(Value::from(2)));
    assert_eq!(value.remove_at(5), None);
    assert_eq!(value, doc("[1, 3]"));
}

#[test]
fn remove_at_zero_on_non_array_empties_it() {
    let mut value = Value::from(7);
    assert_eq!(value.remove_at(1), None);
    assert_eq!(value, Value::from(7));
    assert_eq!(value.remove_at(0), Some(Value::from(7)));
    assert_eq!(value, Value::array());
}

// ============================================================================
// Classification and accessors
// ============================================================================

#[test]
fn predicates_classify_each_variant() {
    let cases = [
        (Value::Null, "null"),
        (Value::from(true), "bool"),
        (Value::from(1), "number"),
        (Value::from("s"), "string"),
        (Value::array(), "array"),
        (Value::object(), "object"),
    ];
    for (value, kind) in cases {
        assert_eq!(value.kind(), kind);
        assert_eq!(value.is_null(), kind == "null");
        assert_eq!(value.has_value(), kind != "null");
        assert_eq!(value.is_bool(), kind == "bool");
        assert_eq!(value.is_number(), kind == "number");
        assert_eq!(value.is_string(), kind == "string");
        assert_eq!(value.is_array(), kind == "array");
        assert_eq!(value.is_object(), kind == "object");
        assert_eq!(value.is_collection(), kind == "array" || kind == "object");
    }
}

#[test]
fn typed_accessors_return_none_on_mismatch() {
    let value = doc(r#"{"n": -5, "f": 2.5, "s": "x", "b": true}"#);
    assert_eq!(value["n"].as_i64(), Some(-5));
    assert_eq!(value["n"].as_u64(), None);
    assert_eq!(value["f"].as_f64(), Some(2.5));
    assert_eq!(value["f"].as_i64(), None);
    assert_eq!(value["s"].as_str(), Some("x"));
    assert_eq!(value["b"].as_bool(), Some(true));
    assert_eq!(value["s"].as_bool(), None);
    assert!(value["n"].as_array().is_none());
    assert_eq!(value.keys().collect::<Vec<_>>(), ["n", "f", "s", "b"]);
}

#[test]
fn map_alias_builds_objects() {
    let mut map = Map::new();
    map.insert("k".to_string(), Value::from(1));
    assert_eq!(Value::from(map), doc(r#"{"k": 1}"#));
}

// ============================================================================
// Description
// ============================================================================

#[test]
fn compact_description() {
    let value = doc(r#"{"value1": "foo", "value2": [1, 2], "value3": {"first": {"value2": []}}}"#);
    assert_eq!(
        value.description(0, false, false),
        r#"{"value1":"foo","value2":[1,2],"value3":{"first":{"value2":[]}}}"#
    );
    assert_eq!(value.to_string(), value.description(0, false, false));
}

#[test]
fn pretty_description() {
    let value = doc(r#"{"id": 7, "title": "Intro", "tags": ["live"]}"#);
    let expected = "{\n\t\"id\":\t\t7,\n\t\"title\":\t\"Intro\",\n\t\"tags\":\t\t[\n\t\t\"live\"\n\t]\n}";
    assert_eq!(value.description(0, true, false), expected);
    assert_eq!(format!("{value:#}"), expected);
}

#[test]
fn description_truncates_long_strings_on_request() {
    let value = Value::from("a".repeat(100));
    let truncated = value.description(0, false, true);
    assert_eq!(truncated.len(), 80 + "\"...\"".len());
    assert!(truncated.ends_with("...\""));
    assert_eq!(value.description(0, false, false).len(), 102);
}

#[test]
fn description_escapes_newlines_only() {
    let value = Value::from("line1\nline2 \"quoted\"");
    assert_eq!(value.to_string(), "\"line1\\nline2 \"quoted\"\"");
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn unsigned_numbers_normalize_to_signed_when_they_fit() {
    assert_eq!(Number::from(7u64).as_i64(), Some(7));
    assert_eq!(Number::from(u64::MAX).as_i64(), None);
    assert_eq!(Number::from(u64::MAX).as_u64(), Some(u64::MAX));
}

#[test]
fn integer_and_float_are_distinct() {
    assert_ne!(Number::from(1), Number::from(1.0));
    assert_eq!(Number::from(-3i8), Number::from(-3i64));
    assert_ne!(Value::from(1), Value::from(1.0));
}

#[test]
fn integral_floats_expose_exact_integer() {
    assert_eq!(Number::from(4.0).as_i128(), Some(4));
    assert_eq!(Number::from(4.5).as_i128(), None);
    assert_eq!(Number::from(f64::NAN).as_i128(), None);
}

#[test]
fn float_display_keeps_float_marker() {
    assert_eq!(Number::from(1.0).to_string(), "1.0");
    assert_eq!(Number::from(0.25).to_string(), "0.25");
    assert_eq!(Number::from(f64::INFINITY).to_string(), "null");
}

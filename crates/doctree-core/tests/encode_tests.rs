use doctree_core::{
    decode, decode_value, encode, encode_value, Decode, DecodeError, Decoder, Encode, Encoded,
    Encoder, Format, Value,
};
use indexmap::IndexMap;
use std::collections::BTreeMap;
use uuid::Uuid;

fn doc(json: &str) -> Value {
    Format::Json.try_parse(json.as_bytes()).unwrap()
}

#[derive(Debug, Clone, PartialEq)]
struct Profile {
    id: Uuid,
    name: String,
    age: Option<u8>,
    scores: Vec<f64>,
    nickname: Option<String>,
    tags: BTreeMap<String, String>,
}

impl Decode for Profile {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Profile {
            id: decoder.decode("id")?,
            name: decoder.decode("name")?,
            age: decoder.decode("age")?,
            scores: decoder.decode("scores")?,
            nickname: decoder.decode("nickname")?,
            tags: decoder.decode("tags")?,
        })
    }
}

impl Encode for Profile {
    fn encode(&self, encoder: &mut Encoder) -> Encoded {
        encoder.encode_field("id", &self.id);
        encoder.encode_field("name", &self.name);
        encoder.encode_field("age", &self.age);
        encoder.encode_field("scores", &self.scores);
        encoder.encode_field("nickname", &self.nickname);
        encoder.encode_field("tags", &self.tags);
        Encoded::Produced
    }
}

fn profile() -> Profile {
    Profile {
        id: Uuid::from_u128(0x6ba7b810_9dad_11d1_80b4_00c04fd430c8),
        name: "Ada".to_string(),
        age: Some(36),
        scores: vec![9.5, 7.0],
        nickname: None,
        tags: BTreeMap::from([("lang".to_string(), "en".to_string())]),
    }
}

// ============================================================================
// Omission
// ============================================================================

#[test]
fn absent_optional_field_is_omitted_not_null() {
    let encoded = encode_value(&profile());
    assert!(encoded.as_object().unwrap().get("nickname").is_none());
    assert_eq!(encoded.len(), 5);
}

#[test]
fn sequence_of_optionals_drops_absent_elements() {
    let encoded = encode_value(&vec![Some(1), None, Some(2)]);
    assert_eq!(encoded, doc("[1, 2]"));
    assert_eq!(encoded.len(), 2);
}

#[test]
fn map_of_optionals_drops_absent_entries() {
    let mut map = IndexMap::new();
    map.insert("a".to_string(), Some(1));
    map.insert("b".to_string(), None);
    let encoded = encode_value(&map);
    assert_eq!(encoded, doc(r#"{"a": 1}"#));
}

#[test]
fn omitted_root_encodes_as_empty_object() {
    let bytes = encode(&None::<String>, Format::Json, true).unwrap();
    assert_eq!(bytes, b"{}");
}

// ============================================================================
// Shapes
// ============================================================================

#[test]
fn scalars_replace_the_handle_value() {
    assert_eq!(encode_value(&true), Value::from(true));
    assert_eq!(encode_value("hi"), Value::from("hi"));
    assert_eq!(encode_value(&-4i16), Value::from(-4));
    assert_eq!(encode_value(&2.5f32), Value::from(2.5));
}

#[test]
fn uuid_encodes_as_lowercase_hyphenated_string() {
    let encoded = encode_value(&profile().id);
    assert_eq!(encoded, Value::from("6ba7b810-9dad-11d1-80b4-00c04fd430c8"));
}

#[test]
fn struct_encodes_as_object() {
    let encoded = encode_value(&profile());
    assert_eq!(
        encoded,
        doc(r#"{
            "id": "6ba7b810-9dad-11d1-80b4-00c04fd430c8",
            "name": "Ada",
            "age": 36,
            "scores": [9.5, 7.0],
            "tags": {"lang": "en"}
        }"#)
    );
}

#[test]
fn nested_sequences_build_nested_arrays() {
    let encoded = encode_value(&vec![vec![1, 2], vec![], vec![3]]);
    assert_eq!(encoded, doc("[[1, 2], [], [3]]"));
}

#[test]
fn encode_without_key_writes_into_current_handle() {
    struct Wrapper(Vec<u8>);

    impl Encode for Wrapper {
        fn encode(&self, encoder: &mut Encoder) -> Encoded {
            encoder.encode(&self.0)
        }
    }

    assert_eq!(encode_value(&Wrapper(vec![1, 2])), doc("[1, 2]"));
}

#[test]
fn encode_without_key_skips_omitted_values() {
    struct Maybe(Option<u8>);

    impl Encode for Maybe {
        fn encode(&self, encoder: &mut Encoder) -> Encoded {
            encoder.encode(&self.0)
        }
    }

    let outer: Vec<Maybe> = vec![Maybe(Some(1)), Maybe(None)];
    assert_eq!(encode_value(&outer), doc("[1]"));
}

#[test]
fn omitted_value_leaves_encoder_untouched() {
    let mut encoder = Encoder::new();
    encoder.set_value(5);
    assert_eq!(encoder.encode(&None::<u8>), Encoded::Omitted);
    assert_eq!(encoder.value(), &Value::from(5));
}

#[test]
fn field_on_non_object_is_reported_as_omitted() {
    let mut encoder = Encoder::new();
    encoder.set_value("scalar");
    assert_eq!(encoder.encode_field("k", &1), Encoded::Omitted);
    assert_eq!(encoder.value(), &Value::from("scalar"));
}

// ============================================================================
// Round-trip
// ============================================================================

#[test]
fn decode_of_encode_is_identity() {
    let original = profile();
    let decoded: Profile = decode_value(&encode_value(&original)).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn round_trip_through_json_bytes() {
    let original = profile();
    for pretty in [false, true] {
        let bytes = encode(&original, Format::Json, pretty).unwrap();
        let decoded: Profile = decode(&bytes, Format::Json).unwrap();
        assert_eq!(decoded, original);
    }
}

#[test]
fn round_trip_through_property_list() {
    let original = Profile {
        nickname: Some("countess".to_string()),
        ..profile()
    };
    let bytes = encode(&original, Format::PropertyList, true).unwrap();
    let decoded: Profile = decode(&bytes, Format::PropertyList).unwrap();
    assert_eq!(decoded, original);
}

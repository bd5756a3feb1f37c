//! The document tree: a tagged union over the six value shapes shared by JSON
//! and property lists.
//!
//! Lookups never fail. A missing field, an out-of-range index, or a lookup on
//! a scalar all yield [`Value::Null`], so a chain of lookups degrades to `Null`
//! instead of erroring part-way:
//!
//! ```
//! use doctree_core::{Format, Value};
//!
//! let doc = Format::Json.parse(br#"{"tags":["a","b"],"count":2}"#);
//! assert_eq!(doc["tags"][1], Value::from("b"));
//! assert!(doc["missing"]["deeper"][3].is_null());
//!
//! // A non-array answers index 0 with itself.
//! assert_eq!(doc["count"][0], Value::from(2));
//! ```

use crate::describe::Layout;
use crate::error::SetError;
use crate::key_path::KeyPath;
use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use std::fmt;
use std::ops::Index;

/// Object storage. Keys are unique; insertion order is kept for output but
/// ignored by equality.
pub type Map = IndexMap<String, Value>;

static NULL: Value = Value::Null;

/// A node in a document tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Absent or explicitly null. The two are not distinguished.
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    /// An empty object.
    pub fn object() -> Self {
        Value::Object(Map::new())
    }

    /// An empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    // ── Lookup ──────────────────────────────────────────────────────────────

    /// The field `key` of an object, or `Null`.
    pub fn get(&self, key: &str) -> &Value {
        match self {
            Value::Object(map) => map.get(key).unwrap_or(&NULL),
            _ => &NULL,
        }
    }

    /// Element `index` of an array, or `Null` when out of range.
    ///
    /// Any other value answers index `0` with itself, so a lone value reads
    /// the same as a one-element array. Property lists converted from XML
    /// cannot tell the two apart.
    pub fn get_index(&self, index: usize) -> &Value {
        match self {
            Value::Array(items) => items.get(index).unwrap_or(&NULL),
            _ if index == 0 => self,
            _ => &NULL,
        }
    }

    /// The value at `path`, or `Null` if any step misses.
    pub fn at(&self, path: &KeyPath) -> &Value {
        path.resolve(self)
    }

    // ── Mutation ────────────────────────────────────────────────────────────

    /// Set field `key` of an object, replacing any existing entry.
    ///
    /// On a non-object this is a no-op: a warning is logged and an error
    /// returned.
    pub fn set_field(&mut self, key: impl Into<String>, value: Value) -> Result<(), SetError> {
        match self {
            Value::Object(map) => {
                map.insert(key.into(), value);
                Ok(())
            }
            other => {
                let err = SetError::NotAnObject {
                    key: key.into(),
                    found: other.kind(),
                };
                log::warn!(target: "doctree::value", "{err}");
                Err(err)
            }
        }
    }

    /// Replace element `index` of an array; `index == len` appends.
    ///
    /// Any other index, or a non-array receiver, is a no-op that logs a
    /// warning and returns an error.
    pub fn set_index(&mut self, index: usize, value: Value) -> Result<(), SetError> {
        let err = match self {
            Value::Array(items) if index < items.len() => {
                items[index] = value;
                return Ok(());
            }
            Value::Array(items) if index == items.len() => {
                items.push(value);
                return Ok(());
            }
            Value::Array(items) => SetError::IndexOutOfRange {
                index,
                len: items.len(),
            },
            other => SetError::NotAnArray {
                index,
                found: other.kind(),
            },
        };
        log::warn!(target: "doctree::value", "{err}");
        Err(err)
    }

    /// Append to an array. A `Null` receiver becomes `[value]`; any other
    /// non-array becomes the two-element array `[previous, value]`.
    pub fn append(&mut self, value: Value) {
        match self {
            Value::Array(items) => items.push(value),
            Value::Null => *self = Value::Array(vec![value]),
            other => {
                let previous = std::mem::take(other);
                *other = Value::Array(vec![previous, value]);
            }
        }
    }

    /// Remove and return element `index` of an array.
    ///
    /// A non-array is treated as a one-element array: index `0` empties it into
    /// `[]` and returns the previous value.
    pub fn remove_at(&mut self, index: usize) -> Option<Value> {
        match self {
            Value::Array(items) if index < items.len() => Some(items.remove(index)),
            Value::Array(_) => None,
            _ if index == 0 => Some(std::mem::replace(self, Value::array())),
            _ => None,
        }
    }

    // ── Classification ──────────────────────────────────────────────────────

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for every variant except `Null`.
    pub fn has_value(&self) -> bool {
        !self.is_null()
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Arrays and objects.
    pub fn is_collection(&self) -> bool {
        self.is_array() || self.is_object()
    }

    // ── Typed accessors ─────────────────────────────────────────────────────

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(number) => Some(number),
            _ => None,
        }
    }

    /// The number as `i64`, if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    /// The number as `u64`, if it is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        self.as_number().and_then(Number::as_u64)
    }

    /// Any number, converted to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::to_f64)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Number of children of an array or object; `0` for anything else.
    pub fn len(&self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Field names of an object, in insertion order. Empty for non-objects.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.as_object()
            .into_iter()
            .flat_map(|map| map.keys().map(String::as_str))
    }

    /// Render the value as text.
    ///
    /// `offset` is the number of tabs the rendering is assumed to start at;
    /// nested lines are indented relative to it. In pretty mode objects and
    /// arrays put each entry on its own line and object values are aligned
    /// to a common tab stop. Strings escape literal newlines only, and are
    /// cut to 80 characters when `truncate_strings` is set.
    pub fn description(&self, offset: usize, pretty: bool, truncate_strings: bool) -> String {
        Layout::description(pretty, truncate_strings).render(self, offset)
    }
}

/// Compact description; `{:#}` gives the pretty form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description(0, f.alternate(), false))
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key)
    }
}

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.get_index(index)
    }
}

// ── Numbers ─────────────────────────────────────────────────────────────────

/// A numeric value that remembers whether it was an integer or a float.
///
/// Integers compare by value regardless of sign representation; an integer
/// never equals a float.
#[derive(Clone, Copy)]
pub struct Number(N);

#[derive(Clone, Copy)]
enum N {
    Int(i64),
    /// Only used above `i64::MAX`.
    UInt(u64),
    Float(f64),
}

impl Number {
    pub fn is_integer(&self) -> bool {
        !self.is_float()
    }

    pub fn is_float(&self) -> bool {
        matches!(self.0, N::Float(_))
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.0 {
            N::Int(i) => Some(i),
            N::UInt(_) | N::Float(_) => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self.0 {
            N::Int(i) => u64::try_from(i).ok(),
            N::UInt(u) => Some(u),
            N::Float(_) => None,
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self.0 {
            N::Int(i) => i as f64,
            N::UInt(u) => u as f64,
            N::Float(f) => f,
        }
    }

    /// The exact integer this number holds. Floats qualify when they are
    /// finite and have no fractional part.
    pub fn as_i128(&self) -> Option<i128> {
        const LIMIT: f64 = 1.0e38;
        match self.0 {
            N::Int(i) => Some(i128::from(i)),
            N::UInt(u) => Some(i128::from(u)),
            N::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < LIMIT => {
                Some(f as i128)
            }
            N::Float(_) => None,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self.0, other.0) {
            (N::Float(a), N::Float(b)) => a == b,
            (N::Float(_), _) | (_, N::Float(_)) => false,
            _ => self.as_i128() == other.as_i128(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            N::Int(i) => write!(f, "{i}"),
            N::UInt(u) => write!(f, "{u}"),
            // `{:?}` is the shortest form that reads back exactly and always
            // keeps a `.` or exponent, so floats stay floats.
            N::Float(x) if x.is_finite() => write!(f, "{x:?}"),
            N::Float(_) => f.write_str("null"),
        }
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number({self})")
    }
}

macro_rules! number_from_signed {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Number {
            fn from(n: $ty) -> Self {
                Number(N::Int(n as i64))
            }
        }
    )*};
}

macro_rules! number_from_unsigned {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Number {
            fn from(n: $ty) -> Self {
                let n = n as u64;
                match i64::try_from(n) {
                    Ok(i) => Number(N::Int(i)),
                    Err(_) => Number(N::UInt(n)),
                }
            }
        }
    )*};
}

number_from_signed!(i8, i16, i32, i64, isize);
number_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number(N::Float(f))
    }
}

impl From<f32> for Number {
    fn from(f: f32) -> Self {
        Number(N::Float(f64::from(f)))
    }
}

// ── Conversions into Value ──────────────────────────────────────────────────

macro_rules! value_from_number {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            fn from(n: $ty) -> Self {
                Value::Number(Number::from(n))
            }
        }
    )*};
}

value_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::String(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::String(text.to_owned())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

/// Builds an object. Repeated keys keep the last value.
impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// ── Deserialization ─────────────────────────────────────────────────────────

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any document value")
    }

    fn visit_bool<E: de::Error>(self, flag: bool) -> Result<Value, E> {
        Ok(Value::Bool(flag))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Value, E> {
        Ok(Value::from(n))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Value, E> {
        Ok(Value::from(n))
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> Result<Value, E> {
        Ok(Value::from(n))
    }

    fn visit_str<E: de::Error>(self, text: &str) -> Result<Value, E> {
        Ok(Value::from(text))
    }

    fn visit_string<E: de::Error>(self, text: String) -> Result<Value, E> {
        Ok(Value::String(text))
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = Map::with_capacity(access.size_hint().unwrap_or(0));
        // Duplicate keys: last one wins.
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.insert(key, value);
        }
        Ok(Value::Object(map))
    }
}

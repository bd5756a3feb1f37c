//! Encoding typed values into a document tree.
//!
//! A type takes part by implementing [`Encode`]. Its implementation writes
//! into an [`Encoder`], usually one [`Encoder::encode_field`] call per field,
//! and reports whether it produced anything.
//!
//! # Omission
//!
//! `None` reports [`Encoded::Omitted`]. The nearest container honours that by
//! leaving the slot out: an object drops the field and an array drops the
//! element. Nothing is ever written as `null` on account of an absent option.
//!
//! ```
//! use doctree_core::{encode_value, Value};
//!
//! let encoded = encode_value(&vec![Some(1), None, Some(2)]);
//! assert_eq!(encoded, Value::from(vec![Value::from(1), Value::from(2)]));
//! ```

use crate::error::Result;
use crate::format::Format;
use crate::value::Value;
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use uuid::Uuid;

/// Outcome of encoding one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoded {
    /// The encoder now holds the value.
    Produced,
    /// Nothing to write; the enclosing container must leave this slot out.
    Omitted,
}

/// A type that can be written to a document tree.
pub trait Encode {
    fn encode(&self, encoder: &mut Encoder) -> Encoded;
}

/// A write cursor holding the value under construction. Starts as an empty
/// object.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoder {
    value: Value,
}

impl Default for Encoder {
    fn default() -> Self {
        Encoder {
            value: Value::object(),
        }
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Replace the current value.
    pub fn set_value(&mut self, value: impl Into<Value>) -> Encoded {
        self.value = value.into();
        Encoded::Produced
    }

    /// Encode `value` directly into this encoder. An omitted value leaves it
    /// untouched.
    pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Encoded {
        value.encode(self)
    }

    /// Encode `value` and store it as field `key` of the current object.
    ///
    /// When `value` is omitted the field is left out entirely. Writing a
    /// field into a value that is not an object is logged and reported as
    /// omitted.
    pub fn encode_field<T: Encode + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Encoded {
        let Some(encoded) = encode_fresh(value) else {
            return Encoded::Omitted;
        };
        match self.value.set_field(key, encoded) {
            Ok(()) => Encoded::Produced,
            Err(_) => Encoded::Omitted,
        }
    }
}

/// Run `value`'s conformance on a fresh encoder.
fn encode_fresh<T: Encode + ?Sized>(value: &T) -> Option<Value> {
    let mut encoder = Encoder::new();
    match value.encode(&mut encoder) {
        Encoded::Produced => Some(encoder.into_value()),
        Encoded::Omitted => None,
    }
}

/// Encode `value` into a tree. An omitted root yields an empty object.
pub fn encode_value<T: Encode + ?Sized>(value: &T) -> Value {
    let mut encoder = Encoder::new();
    encoder.encode(value);
    encoder.into_value()
}

/// Encode `value` and serialize it in the given format.
pub fn encode<T: Encode + ?Sized>(value: &T, format: Format, pretty: bool) -> Result<Vec<u8>> {
    format.serialize(&encode_value(value), pretty)
}

// ── Built-in conformances ───────────────────────────────────────────────────

impl Encode for Value {
    fn encode(&self, encoder: &mut Encoder) -> Encoded {
        encoder.set_value(self.clone())
    }
}

impl Encode for str {
    fn encode(&self, encoder: &mut Encoder) -> Encoded {
        encoder.set_value(self)
    }
}

impl Encode for String {
    fn encode(&self, encoder: &mut Encoder) -> Encoded {
        encoder.set_value(self.as_str())
    }
}

macro_rules! encode_scalar {
    ($($ty:ty),*) => {$(
        impl Encode for $ty {
            fn encode(&self, encoder: &mut Encoder) -> Encoded {
                encoder.set_value(*self)
            }
        }
    )*};
}

encode_scalar!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Lowercase hyphenated form.
impl Encode for Uuid {
    fn encode(&self, encoder: &mut Encoder) -> Encoded {
        encoder.set_value(self.hyphenated().to_string())
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode(&self, encoder: &mut Encoder) -> Encoded {
        match self {
            Some(value) => value.encode(encoder),
            None => Encoded::Omitted,
        }
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, encoder: &mut Encoder) -> Encoded {
        (**self).encode(encoder)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self, encoder: &mut Encoder) -> Encoded {
        (**self).encode(encoder)
    }
}

/// Omitted elements are dropped, so the array can be shorter than the slice.
impl<T: Encode> Encode for [T] {
    fn encode(&self, encoder: &mut Encoder) -> Encoded {
        encoder.set_value(self.iter().filter_map(encode_fresh).collect::<Value>())
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, encoder: &mut Encoder) -> Encoded {
        self.as_slice().encode(encoder)
    }
}

fn encode_entries<'a, T: Encode + 'a>(
    encoder: &mut Encoder,
    entries: impl IntoIterator<Item = (&'a String, &'a T)>,
) -> Encoded {
    encoder.set_value(Value::object());
    for (key, value) in entries {
        encoder.encode_field(key.as_str(), value);
    }
    Encoded::Produced
}

impl<T: Encode, S: BuildHasher> Encode for HashMap<String, T, S> {
    fn encode(&self, encoder: &mut Encoder) -> Encoded {
        encode_entries(encoder, self)
    }
}

impl<T: Encode> Encode for BTreeMap<String, T> {
    fn encode(&self, encoder: &mut Encoder) -> Encoded {
        encode_entries(encoder, self)
    }
}

impl<T: Encode, S: BuildHasher> Encode for IndexMap<String, T, S> {
    fn encode(&self, encoder: &mut Encoder) -> Encoded {
        encode_entries(encoder, self)
    }
}

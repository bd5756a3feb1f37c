//! Decoding typed values out of a document tree.
//!
//! A type takes part by implementing [`Decode`]. Its implementation receives a
//! [`Decoder`] positioned on the value to read and pulls fields out with
//! [`Decoder::decode`], which accepts anything convertible to a [`KeyPath`].
//!
//! # Optional values
//!
//! `Option<T>` never fails. A `Null` or missing value decodes to `None`, and
//! so does a present value that `T` rejects, however deep the rejection
//! happened. This applies per element too: an array decoded as
//! `Vec<Option<T>>` keeps going past malformed entries.
//!
//! ```
//! use doctree_core::{decode, Format};
//!
//! let values: Vec<Option<u16>> = decode(br#"[[2,3],1,"x",null]"#, Format::Json).unwrap();
//! assert_eq!(values, [None, Some(1), None, None]);
//! ```
//!
//! # Diagnostics
//!
//! In [`Diagnostics::Verbose`] mode decoders track the key path they were
//! reached by and failures report it as [`DecodeError::Mismatch`]. When a
//! top-level decode fails the failing location, the expected type, a dump of
//! the offending value, and the field names available next to it are logged
//! at debug level under the `doctree::decode` target. [`Diagnostics::Lean`]
//! skips path tracking and reports [`DecodeError::Failed`].

use crate::error::DecodeError;
use crate::format::Format;
use crate::key_path::{Key, KeyPath};
use crate::value::{Map, Value};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use uuid::Uuid;

const LOG_TARGET: &str = "doctree::decode";

/// How much failure detail the decoder collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostics {
    /// Track key paths and report where and what failed.
    Verbose,
    /// No path tracking; failures carry no detail.
    Lean,
}

/// `Verbose` in debug builds, `Lean` in release builds.
impl Default for Diagnostics {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Diagnostics::Verbose
        } else {
            Diagnostics::Lean
        }
    }
}

/// A type that can be read from a document tree.
pub trait Decode: Sized {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError>;
}

/// A read cursor: the current value plus the path that led to it.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    value: &'a Value,
    key_path: KeyPath,
    diagnostics: Diagnostics,
}

impl<'a> Decoder<'a> {
    /// A decoder at the root of `value` with default diagnostics.
    pub fn new(value: &'a Value) -> Self {
        Self::with_diagnostics(value, Diagnostics::default())
    }

    pub fn with_diagnostics(value: &'a Value, diagnostics: Diagnostics) -> Self {
        Decoder {
            value,
            key_path: KeyPath::new(),
            diagnostics,
        }
    }

    /// The value under the cursor.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Path from the root to the cursor. Always empty in lean mode.
    pub fn key_path(&self) -> &KeyPath {
        &self.key_path
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    /// Decode the value at `path`, relative to the cursor.
    pub fn decode<T: Decode>(&self, path: impl Into<KeyPath>) -> Result<T, DecodeError> {
        let path = path.into();
        let child = Decoder {
            value: path.resolve(self.value),
            key_path: self.extend(|parent| parent.join(&path)),
            diagnostics: self.diagnostics,
        };
        T::decode(&child)
    }

    /// Whether `path` leads to a value other than `Null`.
    pub fn exists(&self, path: impl Into<KeyPath>) -> bool {
        path.into().resolve(self.value).has_value()
    }

    /// Decode the current value as `T`, turning any failure into `None`.
    ///
    /// This is the only place decode errors are discarded.
    pub fn try_decode<T: Decode>(&self) -> Option<T> {
        T::decode(self).ok()
    }

    /// The error for "the current value is not a `expected`".
    pub fn mismatch(&self, expected: &'static str) -> DecodeError {
        match self.diagnostics {
            Diagnostics::Verbose => DecodeError::Mismatch {
                expected,
                key_path: self.key_path.clone(),
            },
            Diagnostics::Lean => DecodeError::Failed,
        }
    }

    /// Cursor on an array element that has already been looked up.
    fn item(&self, index: usize, value: &'a Value) -> Decoder<'a> {
        Decoder {
            value,
            key_path: self.extend(|parent| parent.child(Key::Index(index))),
            diagnostics: self.diagnostics,
        }
    }

    /// Cursor on an object entry that has already been looked up.
    fn entry(&self, key: &str, value: &'a Value) -> Decoder<'a> {
        Decoder {
            value,
            key_path: self.extend(|parent| parent.child(key)),
            diagnostics: self.diagnostics,
        }
    }

    fn extend(&self, join: impl FnOnce(&KeyPath) -> KeyPath) -> KeyPath {
        match self.diagnostics {
            Diagnostics::Verbose => join(&self.key_path),
            Diagnostics::Lean => KeyPath::new(),
        }
    }

    fn decode_entries<T, C>(&self) -> Result<C, DecodeError>
    where
        T: Decode,
        C: FromIterator<(String, T)>,
    {
        let map: &Map = self.value.as_object().ok_or_else(|| self.mismatch("object"))?;
        map.iter()
            .map(|(key, value)| Ok((key.clone(), T::decode(&self.entry(key, value))?)))
            .collect()
    }
}

/// Decode `T` from `bytes` in the given format.
///
/// Input that does not parse becomes a `Null` document, so it fails like any
/// other root mismatch.
pub fn decode<T: Decode>(bytes: &[u8], format: Format) -> Result<T, DecodeError> {
    decode_value(&format.parse(bytes))
}

/// [`decode`] with explicit diagnostics.
pub fn decode_with<T: Decode>(
    bytes: &[u8],
    format: Format,
    diagnostics: Diagnostics,
) -> Result<T, DecodeError> {
    decode_value_with(&format.parse(bytes), diagnostics)
}

/// Decode `T` from the root of `value`.
pub fn decode_value<T: Decode>(value: &Value) -> Result<T, DecodeError> {
    decode_value_with(value, Diagnostics::default())
}

/// [`decode_value`] with explicit diagnostics.
pub fn decode_value_with<T: Decode>(
    value: &Value,
    diagnostics: Diagnostics,
) -> Result<T, DecodeError> {
    T::decode(&Decoder::with_diagnostics(value, diagnostics))
        .inspect_err(|err| report_failure(value, err))
}

fn report_failure(root: &Value, err: &DecodeError) {
    let DecodeError::Mismatch { expected, key_path } = err else {
        return;
    };
    if !log::log_enabled!(target: LOG_TARGET, log::Level::Debug) {
        return;
    }
    let failing = key_path.resolve(root);
    let scope = key_path.parent().map_or(root, |parent| parent.resolve(root));
    let available: Vec<&str> = scope.keys().collect();
    log::debug!(
        target: LOG_TARGET,
        "failed to decode {expected} at {key_path}; available fields: [{}]\n{}",
        available.join(", "),
        failing.description(0, true, true)
    );
}

// ── Built-in conformances ───────────────────────────────────────────────────

impl Decode for Value {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(decoder.value().clone())
    }
}

impl Decode for String {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        decoder
            .value()
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| decoder.mismatch("string"))
    }
}

impl Decode for bool {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.value().as_bool().ok_or_else(|| decoder.mismatch("bool"))
    }
}

macro_rules! decode_integer {
    ($($ty:ty),*) => {$(
        /// Any number holding an integer that fits. Floats qualify when
        /// they have no fractional part.
        impl Decode for $ty {
            fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
                decoder
                    .value()
                    .as_number()
                    .and_then(|n| n.as_i128())
                    .and_then(|n| <$ty>::try_from(n).ok())
                    .ok_or_else(|| decoder.mismatch(stringify!($ty)))
            }
        }
    )*};
}

decode_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Decode for f64 {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.value().as_f64().ok_or_else(|| decoder.mismatch("f64"))
    }
}

impl Decode for f32 {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        decoder
            .value()
            .as_f64()
            .map(|n| n as f32)
            .ok_or_else(|| decoder.mismatch("f32"))
    }
}

impl Decode for Uuid {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        decoder
            .value()
            .as_str()
            .and_then(|text| Uuid::parse_str(text).ok())
            .ok_or_else(|| decoder.mismatch("uuid"))
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        if decoder.value().is_null() {
            return Ok(None);
        }
        Ok(decoder.try_decode())
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        T::decode(decoder).map(Box::new)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        let items = decoder.value().as_array().ok_or_else(|| decoder.mismatch("array"))?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| T::decode(&decoder.item(index, item)))
            .collect()
    }
}

impl<T: Decode, S: BuildHasher + Default> Decode for HashMap<String, T, S> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.decode_entries()
    }
}

impl<T: Decode> Decode for BTreeMap<String, T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.decode_entries()
    }
}

impl<T: Decode, S: BuildHasher + Default> Decode for IndexMap<String, T, S> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.decode_entries()
    }
}

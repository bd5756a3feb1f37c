//! Key paths: ordered sequences of field names and array indices.
//!
//! A key path is both a navigation program over a [`Value`] and the location
//! reported when a decode fails.
//!
//! ```
//! use doctree_core::{key_path, Format, KeyPath, Value};
//!
//! let doc = Format::Json.parse(br#"{"album":{"tracks":[{"title":"Intro"}]}}"#);
//! let path = key_path!["album", "tracks", 0, "title"];
//! assert_eq!(doc.at(&path), &Value::from("Intro"));
//! assert_eq!(path.to_string(), "album.tracks[0].title");
//!
//! // The dotted form used on the command line.
//! assert_eq!("album.tracks.0.title".parse::<KeyPath>().unwrap(), path);
//! ```

use crate::error::ParsePathError;
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

/// One step of a key path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Array position.
    Index(usize),
    /// Object field name.
    Field(String),
}

impl Key {
    /// Apply this key to `value`.
    pub fn lookup<'v>(&self, value: &'v Value) -> &'v Value {
        match self {
            Key::Index(index) => value.get_index(*index),
            Key::Field(name) => value.get(name),
        }
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Field(name.to_owned())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Field(name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "[{index}]"),
            Key::Field(name) => f.write_str(name),
        }
    }
}

/// An ordered, immutable sequence of [`Key`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath {
    keys: Vec<Key>,
}

impl KeyPath {
    /// The empty path, addressing the root.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn last(&self) -> Option<&Key> {
        self.keys.last()
    }

    /// The path without its last key, or `None` for the root.
    pub fn parent(&self) -> Option<KeyPath> {
        let (_, init) = self.keys.split_last()?;
        Some(KeyPath {
            keys: init.to_vec(),
        })
    }

    /// This path followed by one more key.
    pub fn child(&self, key: impl Into<Key>) -> KeyPath {
        let mut keys = Vec::with_capacity(self.keys.len() + 1);
        keys.extend_from_slice(&self.keys);
        keys.push(key.into());
        KeyPath { keys }
    }

    /// This path followed by every key of `tail`.
    pub fn join(&self, tail: &KeyPath) -> KeyPath {
        let mut keys = Vec::with_capacity(self.keys.len() + tail.keys.len());
        keys.extend_from_slice(&self.keys);
        keys.extend_from_slice(&tail.keys);
        KeyPath { keys }
    }

    /// Walk `root` along this path. Once a step yields `Null` every later
    /// step does too.
    pub fn resolve<'v>(&self, root: &'v Value) -> &'v Value {
        self.keys.iter().fold(root, |value, key| key.lookup(value))
    }
}

/// `album.tracks[0].title`; the empty path prints as `<root>`.
impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.keys.is_empty() {
            return f.write_str("<root>");
        }
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 && matches!(key, Key::Field(_)) {
                f.write_str(".")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

/// Parse the dotted form `a.b.0.c`. Segments made only of ASCII digits are
/// indices; the empty string is the root path.
impl FromStr for KeyPath {
    type Err = ParsePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(KeyPath::new());
        }
        s.split('.')
            .enumerate()
            .map(|(position, segment)| {
                if segment.is_empty() {
                    return Err(ParsePathError {
                        path: s.to_owned(),
                        position,
                    });
                }
                Ok(match segment.parse::<usize>() {
                    Ok(index) if segment.bytes().all(|b| b.is_ascii_digit()) => Key::Index(index),
                    _ => Key::Field(segment.to_owned()),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(KeyPath::from)
    }
}

impl From<Vec<Key>> for KeyPath {
    fn from(keys: Vec<Key>) -> Self {
        KeyPath { keys }
    }
}

impl<const N: usize> From<[Key; N]> for KeyPath {
    fn from(keys: [Key; N]) -> Self {
        KeyPath {
            keys: keys.into(),
        }
    }
}

impl From<Key> for KeyPath {
    fn from(key: Key) -> Self {
        KeyPath { keys: vec![key] }
    }
}

/// A single field name. The string is taken literally, not split on dots.
impl From<&str> for KeyPath {
    fn from(name: &str) -> Self {
        KeyPath::from(Key::from(name))
    }
}

impl From<String> for KeyPath {
    fn from(name: String) -> Self {
        KeyPath::from(Key::from(name))
    }
}

impl From<usize> for KeyPath {
    fn from(index: usize) -> Self {
        KeyPath::from(Key::Index(index))
    }
}

impl From<&KeyPath> for KeyPath {
    fn from(path: &KeyPath) -> Self {
        path.clone()
    }
}

impl FromIterator<Key> for KeyPath {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        KeyPath {
            keys: iter.into_iter().collect(),
        }
    }
}

/// Build a [`KeyPath`] from a mix of field names and indices.
///
/// ```
/// use doctree_core::{key_path, Key};
///
/// let path = key_path!["items", 2, "name"];
/// assert_eq!(path.keys()[1], Key::Index(2));
/// ```
#[macro_export]
macro_rules! key_path {
    () => {
        $crate::KeyPath::new()
    };
    ($($key:expr),+ $(,)?) => {
        $crate::KeyPath::from(vec![$($crate::Key::from($key)),+])
    };
}

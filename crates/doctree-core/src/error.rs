//! Error types for decoding, serialization, and best-effort tree mutation.

use crate::key_path::KeyPath;
use thiserror::Error;

/// A typed decode failed.
///
/// Which variant is produced depends on the decoder's
/// [`Diagnostics`](crate::Diagnostics) mode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A required value was missing, had the wrong variant, or could not be
    /// converted to the target type.
    #[error("expected {expected} at {key_path}")]
    Mismatch {
        expected: &'static str,
        key_path: KeyPath,
    },

    /// Lean diagnostics: the decode failed, with no location or type detail.
    #[error("decode failed")]
    Failed,
}

/// A subscript assignment that could not be applied. The tree is left
/// unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetError {
    #[error("cannot set field `{key}` on a {found} value")]
    NotAnObject { key: String, found: &'static str },

    #[error("cannot set index {index} on a {found} value")]
    NotAnArray { index: usize, found: &'static str },

    #[error("index {index} is out of range for an array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// A dotted key path string could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("empty segment at position {position} in key path `{path}`")]
pub struct ParsePathError {
    pub path: String,
    pub position: usize,
}

/// A format name was not recognised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown format `{0}` (expected `json` or `plist`)")]
pub struct ParseFormatError(pub String);

/// Errors from the byte-level entry points.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The input was not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input was not a valid property list, or writing one failed.
    #[error("property list error: {0}")]
    Plist(#[from] plist::Error),

    /// The tree holds something the target format has no encoding for.
    #[error("{format} cannot represent {what}")]
    Unrepresentable {
        format: &'static str,
        what: &'static str,
    },
}

/// Convenience alias used by the byte-level entry points.
pub type Result<T> = std::result::Result<T, Error>;

//! Format adapters: raw bytes to and from a [`Value`] tree.
//!
//! - [`Format::Json`]: parsed with `serde_json`; written with the
//!   [`describe`](crate::describe) layout using full JSON escaping.
//! - [`Format::PropertyList`]: XML or binary property lists parsed with the
//!   `plist` crate; written as XML.
//!
//! [`Format::parse`] never fails: input that does not parse becomes `Null`
//! (with a warning logged), which then fails whatever decode is attempted on
//! it. Use [`Format::try_parse`] to get the parser error instead.

mod json;
mod property_list;

use crate::error::{ParseFormatError, Result};
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

const LOG_TARGET: &str = "doctree::format";

/// A concrete wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    PropertyList,
}

impl Format {
    /// Parse `bytes`, or fail with the underlying parser's error.
    pub fn try_parse(self, bytes: &[u8]) -> Result<Value> {
        match self {
            Format::Json => json::parse(bytes),
            Format::PropertyList => property_list::parse(bytes),
        }
    }

    /// Parse `bytes`. Malformed input is logged and yields `Null`.
    pub fn parse(self, bytes: &[u8]) -> Value {
        self.try_parse(bytes).unwrap_or_else(|err| {
            log::warn!(target: LOG_TARGET, "malformed {self} input: {err}");
            Value::Null
        })
    }

    /// Serialize `value`. `pretty` selects the indented layout for JSON;
    /// property lists are always written as indented XML.
    pub fn serialize(self, value: &Value, pretty: bool) -> Result<Vec<u8>> {
        match self {
            Format::Json => Ok(json::serialize(value, pretty)),
            Format::PropertyList => property_list::serialize(value),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Json => "json",
            Format::PropertyList => "plist",
        })
    }
}

/// Accepts `json`, `plist`, and `property-list`, case-insensitively.
impl FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "plist" | "property-list" => Ok(Format::PropertyList),
            _ => Err(ParseFormatError(s.to_owned())),
        }
    }
}

//! Property lists have no null, and carry dates, raw data, and UIDs that the
//! document tree has no variant for. On the way in those become ISO-8601
//! strings, base64 strings, and unsigned numbers. On the way out `Null`
//! object fields and array elements are dropped; a `Null` root cannot be
//! written at all.

use crate::error::{Error, Result};
use crate::value::Value;
use base64::prelude::{Engine as _, BASE64_STANDARD};
use std::io::Cursor;

pub(super) fn parse(bytes: &[u8]) -> Result<Value> {
    let root = plist::Value::from_reader(Cursor::new(bytes))?;
    Ok(from_plist(root))
}

pub(super) fn serialize(value: &Value) -> Result<Vec<u8>> {
    let root = to_plist(value).ok_or(Error::Unrepresentable {
        format: "a property list",
        what: "a null root value",
    })?;
    let mut out = Vec::new();
    root.to_writer_xml(&mut out)?;
    Ok(out)
}

fn from_plist(value: plist::Value) -> Value {
    match value {
        plist::Value::Array(items) => items.into_iter().map(from_plist).collect(),
        plist::Value::Dictionary(dict) => dict
            .into_iter()
            .map(|(key, value)| (key, from_plist(value)))
            .collect(),
        plist::Value::Boolean(flag) => Value::Bool(flag),
        plist::Value::Data(bytes) => Value::String(BASE64_STANDARD.encode(bytes)),
        plist::Value::Date(date) => Value::String(date.to_xml_format()),
        plist::Value::Real(n) => Value::from(n),
        plist::Value::Integer(n) => match (n.as_signed(), n.as_unsigned()) {
            (Some(signed), _) => Value::from(signed),
            (None, Some(unsigned)) => Value::from(unsigned),
            (None, None) => Value::Null,
        },
        plist::Value::String(text) => Value::String(text),
        plist::Value::Uid(uid) => Value::from(uid.get()),
        _ => Value::Null,
    }
}

fn to_plist(value: &Value) -> Option<plist::Value> {
    let converted = match value {
        Value::Null => return None,
        Value::Bool(flag) => plist::Value::Boolean(*flag),
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(signed), _) => plist::Value::Integer(signed.into()),
            (None, Some(unsigned)) => plist::Value::Integer(unsigned.into()),
            (None, None) => plist::Value::Real(n.to_f64()),
        },
        Value::String(text) => plist::Value::String(text.clone()),
        Value::Array(items) => plist::Value::Array(items.iter().filter_map(to_plist).collect()),
        Value::Object(map) => plist::Value::Dictionary(
            map.iter()
                .filter_map(|(key, value)| Some((key.clone(), to_plist(value)?)))
                .collect(),
        ),
    };
    Some(converted)
}

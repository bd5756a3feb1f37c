use crate::describe::Layout;
use crate::error::Result;
use crate::value::Value;

pub(super) fn parse(bytes: &[u8]) -> Result<Value> {
    Ok(serde_json::from_slice(bytes)?)
}

pub(super) fn serialize(value: &Value, pretty: bool) -> Vec<u8> {
    Layout::json(pretty).render(value, 0).into_bytes()
}

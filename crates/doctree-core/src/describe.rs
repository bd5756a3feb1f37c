//! Text layout for document trees.
//!
//! One renderer serves both [`Value::description`] and the JSON serializer.
//! They differ only in string escaping: descriptions escape literal newlines
//! and nothing else, while the JSON serializer escapes everything JSON
//! requires so its output always parses back.
//!
//! Pretty layout indents with tabs and aligns object values on a shared tab
//! stop, one past the longest `"key":` in that object:
//!
//! ```text
//! {
//! 	"id":		7,
//! 	"title":	"Intro",
//! 	"tags":		[
//! 		"live"
//! 	]
//! }
//! ```

use crate::value::{Map, Value};

const TAB_WIDTH: usize = 4;

/// Strings longer than this are cut when truncation is requested.
pub const TRUNCATED_LENGTH: usize = 80;

/// How string contents are escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escaping {
    /// Literal newlines become `\n`; everything else is written as-is.
    NewlinesOnly,
    /// Full JSON string escaping.
    Json,
}

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub pretty: bool,
    pub truncate_strings: bool,
    pub escaping: Escaping,
}

impl Layout {
    /// The layout behind [`Value::description`].
    pub fn description(pretty: bool, truncate_strings: bool) -> Self {
        Layout {
            pretty,
            truncate_strings,
            escaping: Escaping::NewlinesOnly,
        }
    }

    /// The layout behind JSON serialization.
    pub fn json(pretty: bool) -> Self {
        Layout {
            pretty,
            truncate_strings: false,
            escaping: Escaping::Json,
        }
    }

    /// Render `value` as if it started `offset` tabs in.
    pub fn render(&self, value: &Value, offset: usize) -> String {
        let mut out = String::new();
        self.write_value(value, offset, &mut out);
        out
    }

    fn write_value(&self, value: &Value, offset: usize, out: &mut String) {
        match value {
            Value::Null => out.push_str("null"),
            Value::Bool(flag) => out.push_str(if *flag { "true" } else { "false" }),
            Value::Number(number) => out.push_str(&number.to_string()),
            Value::String(text) => self.write_string(text, self.truncate_strings, out),
            Value::Array(items) if items.is_empty() => out.push_str("[]"),
            Value::Array(items) => self.write_array(items, offset, out),
            Value::Object(map) if map.is_empty() => out.push_str("{}"),
            Value::Object(map) => self.write_object(map, offset, out),
        }
    }

    fn write_array(&self, items: &[Value], offset: usize, out: &mut String) {
        out.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.break_line(offset + 1, out);
            self.write_value(item, offset + 1, out);
        }
        self.break_line(offset, out);
        out.push(']');
    }

    fn write_object(&self, map: &Map, offset: usize, out: &mut String) {
        let value_stop = map.keys().map(|key| key_width(key)).max().unwrap_or(0) / TAB_WIDTH + 1;
        out.push('{');
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.break_line(offset + 1, out);
            self.write_string(key, false, out);
            out.push(':');
            if self.pretty {
                push_tabs(value_stop - key_width(key) / TAB_WIDTH, out);
            }
            self.write_value(value, offset + 1, out);
        }
        self.break_line(offset, out);
        out.push('}');
    }

    fn break_line(&self, depth: usize, out: &mut String) {
        if self.pretty {
            out.push('\n');
            push_tabs(depth, out);
        }
    }

    fn write_string(&self, text: &str, truncate: bool, out: &mut String) {
        out.push('"');
        let mut chars = text.chars();
        let limit = if truncate { TRUNCATED_LENGTH } else { usize::MAX };
        for ch in chars.by_ref().take(limit) {
            match self.escaping {
                Escaping::NewlinesOnly => escape_newline(ch, out),
                Escaping::Json => escape_json(ch, out),
            }
        }
        if chars.next().is_some() {
            out.push_str("...");
        }
        out.push('"');
    }
}

/// Columns taken by `"key":`.
fn key_width(key: &str) -> usize {
    key.chars().count() + 3
}

fn push_tabs(count: usize, out: &mut String) {
    out.extend(std::iter::repeat_n('\t', count));
}

fn escape_newline(ch: char, out: &mut String) {
    match ch {
        '\n' => out.push_str("\\n"),
        _ => out.push(ch),
    }
}

fn escape_json(ch: char, out: &mut String) {
    match ch {
        '"' => out.push_str("\\\""),
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\u{08}' => out.push_str("\\b"),
        '\u{0c}' => out.push_str("\\f"),
        c if c < '\u{20}' => out.push_str(&format!("\\u{:04x}", c as u32)),
        c => out.push(c),
    }
}

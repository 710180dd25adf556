//! Reading Doxygen `search/*.js` tables.
//!
//! Doxygen emits each table as a JavaScript assignment (`var searchData=[...];`) using
//! single-quoted strings. Keys escape every non-alphanumeric byte as `_xx` and end in a
//! numeric `_<n>` ordinal; labels and scopes are HTML-escaped.

use std::{path::Path, str::Chars};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::{
    category::SymbolCategory,
    error::Result,
    index::Entry,
    payload::{KeyEncoding, parse_payload},
};

/// Leading `var searchData=` assignment.
static ASSIGNMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*var\s+[A-Za-z_$][\w$]*\s*=\s*").expect("valid regex"));
/// Trailing statement terminator.
static TERMINATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r";\s*$").expect("valid regex"));
/// HTML character references Doxygen writes into labels.
static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#([0-9]+)|#[xX]([0-9a-fA-F]+)|(lt|gt|amp|quot|apos|nbsp));")
        .expect("valid regex")
});

/// Resolve the category of a table from its file name, e.g. `functions_6.js`.
pub fn category_for_file(path: &Path) -> Option<SymbolCategory> {
    let stem = path.file_stem()?.to_str()?;
    let table = match stem.rsplit_once('_') {
        Some((table, page)) if page.bytes().all(|b| b.is_ascii_alphanumeric()) => table,
        _ => stem,
    };
    SymbolCategory::from_table_name(table)
}

/// Parse one Doxygen table into entries of the given category.
pub fn parse_table(source: &str, category: SymbolCategory) -> Result<Vec<Entry>> {
    let json = js_to_json(source);
    let value: serde_json::Value = serde_json::from_str(&json)?;
    parse_payload(&value, KeyEncoding::Doxygen, category)
}

/// Rewrite a Doxygen table script into a JSON document.
pub fn js_to_json(source: &str) -> String {
    let body = ASSIGNMENT.replace(source, "");
    let body = TERMINATOR.replace(&body, "");

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                out.push('"');
                copy_string(&mut chars, &mut out, '\'');
                out.push('"');
            }
            '"' => {
                out.push('"');
                copy_string(&mut chars, &mut out, '"');
                out.push('"');
            }
            _ => out.push(c),
        }
    }
    out
}

/// Copy a string literal body up to its closing `quote`, re-escaping for JSON.
fn copy_string(chars: &mut Chars<'_>, out: &mut String, quote: char) {
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('\'') => out.push('\''),
                Some(escaped) => {
                    out.push('\\');
                    out.push(escaped);
                }
                None => out.push_str("\\\\"),
            },
            c if c == quote => return,
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
}

/// Undo Doxygen's `_xx` key escaping.
pub fn decode_key(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'_'
            && i + 2 < bytes.len()
            && let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2]))
        {
            out.push((hi << 4) | lo);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Decode the HTML character references found in Doxygen labels.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITY
        .replace_all(text, |caps: &Captures<'_>| {
            let code = if let Some(dec) = caps.get(1) {
                dec.as_str().parse().ok()
            } else if let Some(hex) = caps.get(2) {
                u32::from_str_radix(hex.as_str(), 16).ok()
            } else {
                None
            };
            if let Some(code) = code {
                return char::from_u32(code).map_or_else(|| caps[0].to_string(), String::from);
            }
            let named = match &caps[3] {
                "lt" => "<",
                "gt" => ">",
                "amp" => "&",
                "quot" => "\"",
                "apos" => "'",
                _ => " ",
            };
            named.to_string()
        })
        .into_owned()
}

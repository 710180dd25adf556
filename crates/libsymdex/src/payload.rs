//! Eager validation of raw payload tables into typed entries.
//!
//! A table is a JSON array of `[key, [label, occurrences...]]` tuples. Occurrences may be
//! nested in one list (`[label, [[reference, scope], ...]]`) or follow the label directly,
//! Doxygen style (`[label, [reference, flag, scope], ...]`).

use serde_json::Value;

use crate::{
    category::SymbolCategory,
    doxygen::{decode_entities, decode_key},
    error::{Result, SymdexError},
    index::{Entry, Occurrence},
    normalize::normalize_text,
};

/// How raw keys and display strings are encoded in a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyEncoding {
    /// Keys and labels are taken verbatim.
    #[default]
    Plain,
    /// Keys carry `_xx` hex escapes and labels carry HTML entities.
    Doxygen,
}

/// Split a trailing `_<digits>` disambiguation suffix off a raw key.
pub fn split_ordinal(raw: &str) -> (&str, Option<u64>) {
    if let Some((base, suffix)) = raw.rsplit_once('_')
        && !base.is_empty()
        && !suffix.is_empty()
        && suffix.bytes().all(|b| b.is_ascii_digit())
        && let Ok(ordinal) = suffix.parse()
    {
        return (base, Some(ordinal));
    }
    (raw, None)
}

/// Validate a payload table and convert it into entries.
///
/// Any structural problem aborts the whole table with [`SymdexError::MalformedIndex`].
pub fn parse_payload(
    value: &Value,
    encoding: KeyEncoding,
    category: SymbolCategory,
) -> Result<Vec<Entry>> {
    let tuples = value
        .as_array()
        .ok_or_else(|| SymdexError::malformed(0, "payload is not an array of entries"))?;
    tuples
        .iter()
        .enumerate()
        .map(|(position, tuple)| parse_entry(position, tuple, encoding, category))
        .collect()
}

fn parse_entry(
    position: usize,
    tuple: &Value,
    encoding: KeyEncoding,
    category: SymbolCategory,
) -> Result<Entry> {
    let fail = |reason: &str| SymdexError::malformed(position, reason);

    let [raw_key, body] = tuple
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| fail("entry is not an array"))?
    else {
        return Err(fail("entry must have exactly two elements"));
    };
    let raw_key = raw_key.as_str().ok_or_else(|| fail("key is not a string"))?;
    if raw_key.is_empty() {
        return Err(fail("key is empty"));
    }

    let body = body
        .as_array()
        .ok_or_else(|| fail("entry body is not an array"))?;
    let (label, rest) = body
        .split_first()
        .ok_or_else(|| fail("entry body is empty"))?;
    let label = label.as_str().ok_or_else(|| fail("label is not a string"))?;

    let raw_occurrences: &[Value] = match rest {
        [Value::Array(list)] if list.first().is_some_and(Value::is_array) => list,
        [Value::Array(list)] if list.is_empty() => list,
        _ => rest,
    };
    if raw_occurrences.is_empty() {
        return Err(fail("entry has no occurrences"));
    }
    let occurrences = raw_occurrences
        .iter()
        .map(|occurrence| parse_occurrence(position, occurrence, encoding))
        .collect::<Result<Vec<_>>>()?;

    let (base, ordinal) = split_ordinal(raw_key);
    let (decoded_key, label) = match encoding {
        KeyEncoding::Plain => (base.to_string(), label.to_string()),
        KeyEncoding::Doxygen => (decode_key(base), decode_entities(label)),
    };
    let mut key = normalize_text(&decoded_key);
    if key.is_empty() {
        key = decoded_key.to_lowercase();
    }

    Ok(Entry {
        id: raw_key.to_string(),
        key,
        ordinal,
        label,
        category,
        occurrences,
    })
}

fn parse_occurrence(position: usize, value: &Value, encoding: KeyEncoding) -> Result<Occurrence> {
    let fail = |reason: &str| SymdexError::malformed(position, reason);

    let parts = value
        .as_array()
        .ok_or_else(|| fail("occurrence is not an array"))?;
    let (reference, flag, scope) = match parts.as_slice() {
        [reference, scope] => (reference, None, scope),
        [reference, flag, scope] => (reference, Some(flag), scope),
        _ => return Err(fail("occurrence must have two or three elements")),
    };
    let reference = reference
        .as_str()
        .ok_or_else(|| fail("occurrence reference is not a string"))?;
    let scope = scope
        .as_str()
        .ok_or_else(|| fail("occurrence scope is not a string"))?;
    let opens_in_parent = match flag {
        None => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(flag)) => flag.as_f64().is_some_and(|flag| flag != 0.0),
        Some(_) => return Err(fail("occurrence flag is not a number or bool")),
    };

    let scope_label = match encoding {
        KeyEncoding::Plain => scope.to_string(),
        KeyEncoding::Doxygen => decode_entities(scope),
    };
    Ok(Occurrence {
        reference: reference.to_string(),
        scope_label,
        opens_in_parent,
    })
}

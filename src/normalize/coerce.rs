//! Cell-level coercion and the ordered-fallback resolution helper.

use serde_json::Value;

use crate::source::RawRow;

/// Whether a cell counts for synonym resolution. Blank strings and numeric
/// zero are both treated as absent, so a later candidate label (or the
/// field default) wins over them.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::Bool(b) => *b,
        _ => true,
    }
}

/// First candidate label present in the row with a non-empty value.
pub fn resolve<'a>(row: &'a RawRow, labels: &[&str]) -> Option<&'a Value> {
    labels
        .iter()
        .find_map(|label| row.get(*label).filter(|v| is_present(v)))
}

/// Best-effort numeric coercion: absent → 0, numbers pass through, strings
/// are parsed after stripping thousands-separator commas, anything
/// unparseable → 0. Non-finite values ("NaN", "inf") also coerce to 0 so
/// every derived attribute stays a well-defined number. Never fails.
pub fn coerce_num(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite()).unwrap_or(0.0)
}

/// Resolve + coerce in one step for numeric fields.
pub fn num_field(row: &RawRow, labels: &[&str]) -> f64 {
    coerce_num(resolve(row, labels))
}

/// Resolve a text field; numbers render as their decimal text, absent
/// fields become the empty string.
pub fn text_field(row: &RawRow, labels: &[&str]) -> String {
    match resolve(row, labels) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// First non-empty string among `candidates`, else `fallback`. Keeps the
/// precedence rules for identity/classification fields in one place.
pub fn first_non_empty<'a>(candidates: &[&'a str], fallback: &'a str) -> &'a str {
    candidates
        .iter()
        .find(|s| !s.trim().is_empty())
        .copied()
        .unwrap_or(fallback)
}

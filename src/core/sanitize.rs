// src/core/sanitize.rs
// Lenient coercion of loosely typed upstream JSON. Anything odd becomes "missing".

use serde_json::Value;

/// Parse text as a finite number. Empty, non-numeric, NaN and infinities are `None`.
pub fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Numeric view of a JSON scalar: numbers as-is, numeric strings parsed.
pub fn coerce_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_finite(s),
        _ => None,
    }
}

/// Text view of a JSON value. `null` is missing; strings are unquoted.
pub fn value_text(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// `value_text` over an optional field.
pub fn opt_text(v: Option<&Value>) -> Option<String> {
    v.and_then(value_text)
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

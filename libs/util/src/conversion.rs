//! Lenient conversions from loosely typed request values.
//!
//! None of these functions fail. An absent field is passed in as
//! [`Value::Null`] and yields the zero value of the target type.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Textual form of scalars. Null, objects and arrays become `""`.
pub fn to_safe_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => number_to_string(f),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Object(_) | Value::Array(_) => String::new(),
    }
}

/// Numeric form of scalars. Anything unparsable becomes `0`.
pub fn to_safe_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => parse_number(s).unwrap_or_default(),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null | Value::Object(_) | Value::Array(_) => 0.0,
    }
}

pub fn to_safe_boolean(s: &str) -> bool {
    let s = s.to_lowercase();
    s == "true" || s == "1"
}

/// Numbers are epoch milliseconds. Strings that are not a recognised date
/// and every other kind of value map to the epoch.
pub fn to_safe_date(value: &Value) -> DateTime<Utc> {
    let date = match value {
        Value::Number(n) => n
            .as_f64()
            .filter(|ms| ms.is_finite())
            .and_then(|ms| DateTime::from_timestamp_millis(ms.trunc() as i64)),
        Value::String(s) => parse_date(s),
        Value::Bool(b) => DateTime::from_timestamp_millis(i64::from(*b)),
        Value::Null | Value::Object(_) | Value::Array(_) => None,
    };

    date.unwrap_or_default()
}

/// The textual form of `value` if it reads as a number, else `""`.
pub fn to_numeric_char(value: &Value) -> String {
    let s = to_safe_string(value);
    match parse_number(&s) {
        Some(_) => s,
        None => String::new(),
    }
}

/// Parses a JSON array. Any other input yields an empty vector.
pub fn to_array(s: &str) -> Vec<Value> {
    match serde_json::from_str::<Value>(s) {
        Ok(Value::Array(values)) => values,
        _ => Vec::new(),
    }
}

/// Escapes the `LIKE` wildcards of a trimmed search term.
pub fn to_sql_like(s: &str) -> String {
    s.trim().replace('%', "\\%").replace('_', "\\_")
}

/// Loose truthiness: null, `false`, `0`, `NaN` and `""` are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Object(_) | Value::Array(_) => true,
    }
}

pub fn is_data(value: &Value) -> bool {
    !value.is_null()
}

fn number_to_string(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{:.0}", f)
    } else {
        f.to_string()
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    let radix = match s.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix).ok().map(|n| n as f64);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    // Rust also accepts "inf" and "nan" spellings; those are not numbers here.
    if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }

    s.parse::<f64>().ok().filter(|n| !n.is_nan())
}

fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(s) {
        return Some(date.with_timezone(&Utc));
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(date) = NaiveDateTime::parse_from_str(s, format) {
            return Some(date.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}

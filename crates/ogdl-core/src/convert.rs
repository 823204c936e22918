//! Coercions between dynamically typed values
//!
//! Text takes part in numeric coercion only when it has the shape of a
//! numeric literal: an optional minus sign, digits, and an optional
//! fractional part. `inf`, `nan` or `1e3` stay text.

use crate::scalar::Value;

/// A value classified for arithmetic
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn to_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(i) => Value::Int(i),
            Number::Float(f) => Value::Float(f),
        }
    }
}

/// Whether `s` is a numeric literal: `-?digits(.digits)?`
pub fn is_number(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.map_or(true, all_digits)
}

/// Parse a numeric literal; integers that overflow i64 become floats
pub fn parse_number(s: &str) -> Option<Number> {
    if !is_number(s) {
        return None;
    }
    if !s.contains('.') {
        if let Ok(i) = s.parse::<i64>() {
            return Some(Number::Int(i));
        }
    }
    s.parse::<f64>().ok().map(Number::Float)
}

fn text(v: &Value) -> Option<&str> {
    match v {
        Value::Str(s) => Some(s),
        Value::Bytes(b) => std::str::from_utf8(b).ok(),
        _ => None,
    }
}

/// Classify a value as an integer or a float
pub fn number(v: &Value) -> Option<Number> {
    match v {
        Value::Int(i) => Some(Number::Int(*i)),
        Value::Float(f) => Some(Number::Float(*f)),
        other => text(other).and_then(parse_number),
    }
}

/// Integers and integer text
pub fn as_int(v: &Value) -> Option<i64> {
    match number(v)? {
        Number::Int(i) => Some(i),
        Number::Float(_) => None,
    }
}

/// Like [`as_int`], also truncating floats
pub fn as_int_lenient(v: &Value) -> Option<i64> {
    match number(v)? {
        Number::Int(i) => Some(i),
        Number::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        Number::Float(_) => None,
    }
}

/// Floats and numeric text
pub fn as_float(v: &Value) -> Option<f64> {
    match v {
        Value::Int(_) => None,
        other => number(other).map(Number::to_f64),
    }
}

/// Like [`as_float`], also widening integers
pub fn as_float_lenient(v: &Value) -> Option<f64> {
    number(v).map(Number::to_f64)
}

/// Booleans, non-zero numbers, and `true`/`false` text
pub fn as_bool(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::Nil | Value::Graph(_) => None,
        other => match text(other) {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => number(other).map(|n| n.to_f64() != 0.0),
        },
    }
}

//! Raw cell values as supplied by a record source.
//!
//! A [`Value`] is deliberately untyped: sources hand cells over exactly as
//! read (a CSV loader produces strings, an in-memory table may carry real
//! numbers) and the expectation predicates decide what a cell lexically *is*.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Anchored shape of an integer literal.
static INTEGER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+$").expect("static pattern"));

/// Anchored shape of a floating point literal.
static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d*\.?\d+([eE][+-]?\d+)?$").expect("static pattern"));

/// A raw cell value: a string, a number, or a null marker.
///
/// Equality is structural; `Int(5)` and `Str("5")` are distinct values even
/// though both satisfy an integer type expectation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Explicit null / absent marker
    Null,
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value, as read from the input
    Str(String),
}

impl Value {
    /// Returns true for the explicit null marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if the cell counts as missing under the engine's
    /// missing-value policy. CSV-shaped inputs cannot distinguish an empty
    /// cell from a null one, so the empty string is treated as missing too.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Str(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Interprets the cell as an integer without information loss.
    ///
    /// Strings must match the integer shape and fit in an `i64` (overflow is
    /// information loss and yields `None`); floats qualify only when they are
    /// finite and integral.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64
                {
                    Some(*f as i64)
                } else {
                    None
                }
            }
            Value::Str(s) if INTEGER_RE.is_match(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Interprets the cell as a finite number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) if f.is_finite() => Some(*f),
            Value::Str(s) if NUMBER_RE.is_match(s) => s.parse().ok().filter(|f: &f64| f.is_finite()),
            _ => None,
        }
    }

    /// Returns the string contents if the cell is textual.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

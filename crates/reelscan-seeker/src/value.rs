//! Runtime value types for field comparison and matching.
//!
//! Two layers live here:
//!
//! - [`FieldValue`] is the owned value stored inside a [`Record`](crate::Record).
//! - [`Value`] is the borrowed view the search and sort routines work with.
//!   Accessors hand out a `Value` for a field without cloning the source data.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Text produced for a null or absent field when it is stringified.
pub const NONE_SENTINEL: &str = "None";

/// Runtime value for comparison, borrowed from the source item.
///
/// # Example
///
/// ```
/// use reelscan_seeker::{Value, Number};
///
/// struct Show {
///     title: String,
///     release_year: i32,
/// }
///
/// fn accessor<'a>(show: &'a Show, field: &str) -> Value<'a> {
///     match field {
///         "title" => Value::String(&show.title),
///         "release_year" => Value::Number(Number::I64(show.release_year as i64)),
///         _ => Value::Missing,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Field present but holds no value.
    Null,
    /// Field not present on the item.
    Missing,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `String` value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if this is a `Number` value.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the field is present but null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the field is absent.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(*s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Name of the value's kind, used in error messages.
    ///
    /// Integers and reals share the `number` kind since they order against
    /// each other natively.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "text",
            Value::Number(_) => "number",
            Value::Null => "null",
            Value::Missing => "missing",
        }
    }

    /// Returns the display string of this value.
    ///
    /// Null and missing fields both stringify to [`NONE_SENTINEL`].
    pub fn display_string(&self) -> Cow<'a, str> {
        match self {
            Value::String(s) => Cow::Borrowed(*s),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::Null | Value::Missing => Cow::Borrowed(NONE_SENTINEL),
        }
    }
}

/// Numeric value.
///
/// Integers are kept as `I64` so large values don't lose precision; mixed
/// comparisons fall back to `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed variants.
    ///
    /// Returns `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::F64(n) => f.write_str(&format_real(*n)),
        }
    }
}

/// Reals always carry a decimal point or exponent so `2.0` never reads as
/// the integer `2`. Exponents are signed and at least two digits wide
/// (`1e+16`, `1e-05`).
fn format_real(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    } else if n == f64::INFINITY {
        return "inf".to_string();
    } else if n == f64::NEG_INFINITY {
        return "-inf".to_string();
    }

    let text = format!("{n:?}");
    match text.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}

/// Owned field value stored in a [`Record`](crate::Record).
///
/// Serializes untagged, so a record round-trips through JSON as a plain
/// object: `{"title": "Dick Johnson Is Dead", "release_year": 2020}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text value.
    Text(String),
    /// Integer value.
    Integer(i64),
    /// Real value.
    Real(f64),
    /// Explicit null.
    #[default]
    Null,
}

impl FieldValue {
    /// Borrows this value as a comparison [`Value`].
    pub fn as_value(&self) -> Value<'_> {
        match self {
            FieldValue::Text(s) => Value::String(s),
            FieldValue::Integer(n) => Value::Number(Number::I64(*n)),
            FieldValue::Real(n) => Value::Number(Number::F64(*n)),
            FieldValue::Null => Value::Null,
        }
    }

    /// Returns `true` for [`FieldValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Extracts the text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Extracts the integer, if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_value().display_string())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Integer(n as i64)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Real(n)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

//! SQL value representation.
//!
//! [`Value`] is the uniform shape every literal argument takes before it is
//! either interpolated into the SQL text or collected into the parameter
//! list. Conversions from Rust types go through [`IntoValue`].

use chrono::{DateTime, Utc};

/// A SQL value.
///
/// This is both the literal form used by the renderer and the argument form
/// handed to a driver in prepared mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer (all signed widths widen to i64)
    Int(i64),
    /// Unsigned integer that does not fit i64
    UInt(u64),
    /// Floating point
    Float(f64),
    /// Text
    Str(String),
    /// Raw bytes (rendered like text, passed through as-is when prepared)
    Bytes(Vec<u8>),
    /// Timestamp; inline rendering uses the dialect's time format
    Timestamp(DateTime<Utc>),
    /// JSON document
    Json(serde_json::Value),
    /// A regular-expression pattern; comparisons using it select the
    /// dialect's regex operator instead of LIKE
    Regex(String),
}

impl Value {
    /// Bytes constructor, useful because `Vec<u8>` would otherwise be
    /// ambiguous with a list of integer values.
    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(b.into())
    }

    /// Returns `true` for the zero value of the variant's type.
    ///
    /// Used by the `default_if_empty` field flag to decide when a struct
    /// field renders as `DEFAULT`.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Int(i) => *i == 0,
            Value::UInt(u) => *u == 0,
            Value::Float(f) => *f == 0.0,
            Value::Str(s) => s.is_empty(),
            Value::Bytes(b) => b.is_empty(),
            Value::Timestamp(_) => false,
            Value::Json(j) => j.is_null(),
            Value::Regex(r) => r.is_empty(),
        }
    }
}

/// Conversion of a Rust value into a [`Value`].
pub trait IntoValue {
    fn into_value(self) -> Value;
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

macro_rules! impl_into_value_int {
    ($($t:ty),*) => {
        $(impl IntoValue for $t {
            fn into_value(self) -> Value {
                Value::Int(self as i64)
            }
        })*
    };
}

impl_into_value_int!(i8, i16, i32, i64, isize, u8, u16, u32);

impl IntoValue for u64 {
    fn into_value(self) -> Value {
        match i64::try_from(self) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::UInt(self),
        }
    }
}

impl IntoValue for usize {
    fn into_value(self) -> Value {
        (self as u64).into_value()
    }
}

impl IntoValue for f32 {
    fn into_value(self) -> Value {
        Value::Float(self as f64)
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Str(self.to_string())
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::Str(self)
    }
}

impl IntoValue for &String {
    fn into_value(self) -> Value {
        Value::Str(self.clone())
    }
}

impl IntoValue for DateTime<Utc> {
    fn into_value(self) -> Value {
        Value::Timestamp(self)
    }
}

impl IntoValue for serde_json::Value {
    fn into_value(self) -> Value {
        Value::Json(self)
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Null,
        }
    }
}

/// Marks a string as a regular-expression pattern.
///
/// `col("a").like(regex("[ab]"))` renders with the dialect's regex operator
/// (`~` on the default dialect, `REGEXP` on mysql/sqlite3).
pub fn regex(pattern: impl Into<String>) -> Value {
    Value::Regex(pattern.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_widening() {
        assert_eq!(1i32.into_value(), Value::Int(1));
        assert_eq!(1u8.into_value(), Value::Int(1));
        assert_eq!(u64::MAX.into_value(), Value::UInt(u64::MAX));
        assert_eq!(10u64.into_value(), Value::Int(10));
    }

    #[test]
    fn option_becomes_null() {
        assert_eq!(Option::<i32>::None.into_value(), Value::Null);
        assert_eq!(Some("a").into_value(), Value::Str("a".into()));
    }

    #[test]
    fn zero_values() {
        assert!(Value::Str(String::new()).is_zero());
        assert!(Value::Int(0).is_zero());
        assert!(!Value::Int(1).is_zero());
        assert!(Value::Null.is_zero());
        assert!(!Value::Str("x".into()).is_zero());
    }
}

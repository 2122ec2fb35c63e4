//! Driver-generic rows and scanning contracts.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::value::Value;

/// One result row: column names shared across the result set, plus values.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<Vec<String>>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(columns: Arc<Vec<String>>, values: Vec<Value>) -> Self {
        Row { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    /// Value of the named column.
    pub fn get_named(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == name)
            .and_then(|i| self.values.get(i))
    }

    /// Decode the first column.
    pub fn first_value<T: FromValue>(&self) -> Result<T> {
        match self.values.first() {
            Some(v) => T::from_value(v).map_err(|e| match e {
                Error::Decode { message, .. } => Error::decode(
                    self.columns.first().cloned().unwrap_or_default(),
                    message,
                ),
                other => other,
            }),
            None => Err(Error::decode("", "row has no columns")),
        }
    }
}

/// Maps a result row onto a user type.
///
/// Implementations look fields up by column name and must report a returned
/// column they have no field for with
/// [`Error::UnmappedColumn`](crate::Error::UnmappedColumn), so schema drift
/// surfaces instead of being silently dropped.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> Result<Self>;
}

impl FromRow for Row {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(row.clone())
    }
}

/// Converts a single [`Value`] into a Rust scalar.
pub trait FromValue: Sized {
    fn from_value(v: &Value) -> Result<Self>;
}

impl FromValue for Value {
    fn from_value(v: &Value) -> Result<Self> {
        Ok(v.clone())
    }
}

impl FromValue for i64 {
    fn from_value(v: &Value) -> Result<Self> {
        match v {
            Value::Int(i) => Ok(*i),
            Value::UInt(u) => i64::try_from(*u)
                .map_err(|_| Error::decode("", format!("unsigned value {u} overflows i64"))),
            other => Err(Error::decode("", format!("expected integer, got {other:?}"))),
        }
    }
}

impl FromValue for i32 {
    fn from_value(v: &Value) -> Result<Self> {
        let i = i64::from_value(v)?;
        i32::try_from(i).map_err(|_| Error::decode("", format!("value {i} overflows i32")))
    }
}

impl FromValue for u32 {
    fn from_value(v: &Value) -> Result<Self> {
        let i = i64::from_value(v)?;
        u32::try_from(i).map_err(|_| Error::decode("", format!("value {i} overflows u32")))
    }
}

impl FromValue for u64 {
    fn from_value(v: &Value) -> Result<Self> {
        match v {
            Value::Int(i) => u64::try_from(*i)
                .map_err(|_| Error::decode("", format!("negative value {i} for u64"))),
            Value::UInt(u) => Ok(*u),
            other => Err(Error::decode("", format!("expected integer, got {other:?}"))),
        }
    }
}

impl FromValue for f64 {
    fn from_value(v: &Value) -> Result<Self> {
        match v {
            Value::Float(f) => Ok(*f),
            Value::Int(i) => Ok(*i as f64),
            Value::UInt(u) => Ok(*u as f64),
            other => Err(Error::decode("", format!("expected float, got {other:?}"))),
        }
    }
}

impl FromValue for bool {
    fn from_value(v: &Value) -> Result<Self> {
        match v {
            Value::Bool(b) => Ok(*b),
            Value::Int(0) => Ok(false),
            Value::Int(1) => Ok(true),
            other => Err(Error::decode("", format!("expected boolean, got {other:?}"))),
        }
    }
}

impl FromValue for String {
    fn from_value(v: &Value) -> Result<Self> {
        match v {
            Value::Str(s) => Ok(s.clone()),
            Value::Bytes(b) => Ok(String::from_utf8_lossy(b).into_owned()),
            other => Err(Error::decode("", format!("expected text, got {other:?}"))),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(v: &Value) -> Result<Self> {
        match v {
            Value::Bytes(b) => Ok(b.clone()),
            Value::Str(s) => Ok(s.clone().into_bytes()),
            other => Err(Error::decode("", format!("expected bytes, got {other:?}"))),
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(v: &Value) -> Result<Self> {
        match v {
            Value::Timestamp(t) => Ok(*t),
            other => Err(Error::decode("", format!("expected timestamp, got {other:?}"))),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(v: &Value) -> Result<Self> {
        match v {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Row {
        Row::new(
            Arc::new(vec!["id".to_string(), "name".to_string()]),
            vec![Value::Int(7), Value::Str("bob".into())],
        )
    }

    #[test]
    fn get_by_name_and_index() {
        let r = row();
        assert_eq!(r.get(0), Some(&Value::Int(7)));
        assert_eq!(r.get_named("name"), Some(&Value::Str("bob".into())));
        assert_eq!(r.get_named("missing"), None);
    }

    #[test]
    fn first_value_decodes() {
        let id: i64 = row().first_value().unwrap();
        assert_eq!(id, 7);
    }

    #[test]
    fn option_decoding() {
        assert_eq!(Option::<i64>::from_value(&Value::Null).unwrap(), None);
        assert_eq!(Option::<i64>::from_value(&Value::Int(2)).unwrap(), Some(2));
    }
}

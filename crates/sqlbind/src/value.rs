//! Values bound to `?` placeholders.

use crate::error::{QueryError, QueryResult};
use chrono::{DateTime, NaiveDateTime, TimeZone};

/// A value that can be serialized into SQL literal text.
///
/// Arrays render as parenthesized lists; an array of arrays renders as
/// `(..),(..)` which is how multi-row `INSERT ... VALUES` lists are built.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Milliseconds since the Unix epoch.
    Date(i64),
    Array(Vec<Value>),
}

impl Value {
    /// Build a date value from epoch milliseconds.
    pub fn date_millis(millis: i64) -> Self {
        Self::Date(millis)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Convert a loosely-typed JSON argument into a bound value.
    ///
    /// JSON objects have no value form and are rejected with an argument error.
    pub fn from_json(json: &serde_json::Value) -> QueryResult<Self> {
        use serde_json::Value as Json;

        match json {
            Json::Null => Ok(Self::Null),
            Json::Bool(b) => Ok(Self::Bool(*b)),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Ok(Self::Int(i)),
                None => n
                    .as_f64()
                    .map(Self::Float)
                    .ok_or_else(|| QueryError::argument(format!("Unsupported number {n}"))),
            },
            Json::String(s) => Ok(Self::String(s.clone())),
            Json::Array(items) => items
                .iter()
                .map(Self::from_json)
                .collect::<QueryResult<Vec<_>>>()
                .map(Self::Array),
            Json::Object(_) => Err(QueryError::argument(
                "Objects cannot be used as bound values",
            )),
        }
    }

    /// Convert a JSON array of arguments into a list of bound values.
    pub fn list_from_json(json: &serde_json::Value) -> QueryResult<Vec<Self>> {
        match json {
            serde_json::Value::Array(items) => items.iter().map(Self::from_json).collect(),
            _ => Err(QueryError::argument("Argument \"values\" must be an array")),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Self::String(v.clone())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(v: DateTime<Tz>) -> Self {
        Self::Date(v.timestamp_millis())
    }
}

/// Naive timestamps are taken as UTC.
impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Self::Date(v.and_utc().timestamp_millis())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Array(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(feature = "uuid")]
impl From<uuid::Uuid> for Value {
    fn from(v: uuid::Uuid) -> Self {
        Self::String(v.to_string())
    }
}

/// Build a `Vec<Value>` from heterogeneous expressions.
///
/// ```ignore
/// qb.where_("id = ? AND name = ?", &values![5, "alice"])?;
/// ```
#[macro_export]
macro_rules! values {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($value)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_primitives() {
        assert_eq!(Value::from(5), Value::Int(5));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from("x"), Value::String("x".into()));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(
            Value::from(vec![1, 2]),
            Value::Array(vec![Value::Int(1), Value::Int(2)])
        );
    }

    #[test]
    fn from_datetime_uses_epoch_millis() {
        let dt = chrono::Utc.with_ymd_and_hms(2011, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(Value::from(dt), Value::Date(1_299_215_167_000));
    }

    #[test]
    fn values_macro_mixes_types() {
        let v = values![1, "a", 2.5, false];
        assert_eq!(
            v,
            vec![
                Value::Int(1),
                Value::String("a".into()),
                Value::Float(2.5),
                Value::Bool(false)
            ]
        );
        assert!(values![].is_empty());
    }

    #[test]
    fn from_json_nested_rows() {
        let v = Value::from_json(&json!([[1, "x"], [2, null]])).unwrap();
        assert_eq!(
            v,
            Value::Array(vec![
                Value::Array(vec![Value::Int(1), Value::String("x".into())]),
                Value::Array(vec![Value::Int(2), Value::Null]),
            ])
        );
    }

    #[test]
    fn from_json_rejects_objects() {
        let err = Value::from_json(&json!({"a": 1})).unwrap_err();
        assert!(matches!(err, QueryError::Argument(_)));
    }

    #[test]
    fn list_from_json_requires_array() {
        assert!(Value::list_from_json(&json!("x")).is_err());
        assert_eq!(Value::list_from_json(&json!([1])).unwrap(), vec![Value::Int(1)]);
    }
}

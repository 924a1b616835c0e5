//! Casting raw cells into typed values.

use super::raw::RawRow;
use crate::column::{Column, ColumnType};
use crate::config::QueryOptions;
use crate::zone::DateZone;
use bytes::Bytes;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value as Json};

/// A cell after casting.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Bytes),
    Date(DateTime<Utc>),
    /// Milliseconds since midnight (negative for negative intervals).
    Time(i64),
    Set(Vec<String>),
}

impl TypedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// JSON form: dates become RFC 3339 strings, bytes an array of numbers.
    pub fn to_json(&self) -> Json {
        match self {
            Self::Null => Json::Null,
            Self::Bool(b) => Json::Bool(*b),
            Self::Int(i) | Self::Time(i) => Json::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f).map_or(Json::Null, Json::Number),
            Self::String(s) => Json::String(s.clone()),
            Self::Bytes(b) => Json::Array(b.iter().map(|&byte| Json::from(byte)).collect()),
            Self::Date(d) => Json::String(d.to_rfc3339()),
            Self::Set(items) => Json::Array(items.iter().cloned().map(Json::String).collect()),
        }
    }
}

/// A materialized row: values keyed by column name, in column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypedRow {
    fields: Vec<(String, TypedValue)>,
}

impl TypedRow {
    pub fn new(fields: Vec<(String, TypedValue)>) -> Self {
        Self { fields }
    }

    /// Value of column `name`. With duplicate names the last column wins.
    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.fields
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// JSON object keyed by column name.
    pub fn to_json(&self) -> Json {
        let mut map = Map::new();
        for (name, value) in &self.fields {
            map.insert(name.clone(), value.to_json());
        }
        Json::Object(map)
    }
}

/// Cast every cell of `raw` against its column.
pub fn materialize(raw: &RawRow, columns: &[Column], options: &QueryOptions) -> TypedRow {
    let fields = columns
        .iter()
        .zip(raw.cells())
        .map(|(column, cell)| {
            let value = match cell {
                None => TypedValue::Null,
                Some(bytes) if options.cast => cast_cell(bytes, column, options),
                Some(bytes) => TypedValue::String(text(bytes)),
            };
            (column.name.clone(), value)
        })
        .collect();
    TypedRow { fields }
}

fn text(bytes: &Bytes) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Cast one non-NULL cell.
pub fn cast_cell(bytes: &Bytes, column: &Column, options: &QueryOptions) -> TypedValue {
    match column.column_type {
        ColumnType::Bool => TypedValue::Bool(!(bytes.is_empty() || bytes[0] == b'0')),
        ColumnType::Int => parse_int(bytes),
        ColumnType::Number => {
            let s = text(bytes);
            match s.trim().parse::<f64>() {
                Ok(f) => TypedValue::Float(f),
                Err(_) => TypedValue::String(s),
            }
        }
        ColumnType::Time => {
            let s = text(bytes);
            parse_time(&s).map_or(TypedValue::String(s), TypedValue::Time)
        }
        ColumnType::Date => {
            let s = text(bytes);
            parse_date(&s, options.date_zone).map_or(TypedValue::String(s), TypedValue::Date)
        }
        ColumnType::DateTime => {
            let s = text(bytes);
            parse_datetime(&s, options.date_zone).map_or(TypedValue::String(s), TypedValue::Date)
        }
        ColumnType::Set => TypedValue::Set(
            text(bytes)
                .split(',')
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        ColumnType::Text if column.binary || options.buffer_text => {
            TypedValue::Bytes(bytes.clone())
        }
        ColumnType::Text | ColumnType::String => TypedValue::String(text(bytes)),
    }
}

fn parse_int(bytes: &Bytes) -> TypedValue {
    let s = text(bytes);
    let trimmed = s.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return TypedValue::Int(i);
    }
    // DECIMAL-looking text in an INT column: keep the integer part.
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() => TypedValue::Int(f.trunc() as i64),
        _ => TypedValue::String(s),
    }
}

/// `[-]HH:MM:SS[.fff]` to milliseconds. Hours may exceed 24.
fn parse_time(s: &str) -> Option<i64> {
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let mut parts = rest.splitn(3, ':');
    let hours: i64 = parts.next()?.parse().ok()?;
    let minutes: i64 = parts.next()?.parse().ok()?;
    let seconds = parts.next()?;
    let seconds: i64 = seconds.split('.').next()?.parse().ok()?;
    if hours < 0 || !(0..60).contains(&minutes) || !(0..60).contains(&seconds) {
        return None;
    }
    let millis = hours
        .checked_mul(60)?
        .checked_add(minutes)?
        .checked_mul(60)?
        .checked_add(seconds)?
        .checked_mul(1000)?;
    Some(if negative { -millis } else { millis })
}

fn parse_date(s: &str, zone: DateZone) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    zone.to_utc(date.and_hms_opt(0, 0, 0)?)
}

fn parse_datetime(s: &str, zone: DateZone) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").ok()?;
    zone.to_utc(naive)
}

//! Result column metadata.

use serde::{Deserialize, Serialize};

/// Cast category of a result column, as reported by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Bool,
    Int,
    Number,
    Date,
    Time,
    DateTime,
    Text,
    Set,
}

impl ColumnType {
    /// Numeric code published to host bindings (`COLUMN_TYPE_*`).
    pub fn code(self) -> u8 {
        match self {
            ColumnType::String => 0,
            ColumnType::Bool => 1,
            ColumnType::Int => 2,
            ColumnType::Number => 3,
            ColumnType::Date => 4,
            ColumnType::Time => 5,
            ColumnType::DateTime => 6,
            ColumnType::Text => 7,
            ColumnType::Set => 8,
        }
    }

    /// Inverse of [`ColumnType::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => ColumnType::String,
            1 => ColumnType::Bool,
            2 => ColumnType::Int,
            3 => ColumnType::Number,
            4 => ColumnType::Date,
            5 => ColumnType::Time,
            6 => ColumnType::DateTime,
            7 => ColumnType::Text,
            8 => ColumnType::Set,
            _ => return None,
        })
    }

    /// Constant name used by host bindings, e.g. `COLUMN_TYPE_DATETIME`.
    pub fn constant_name(self) -> &'static str {
        match self {
            ColumnType::String => "COLUMN_TYPE_STRING",
            ColumnType::Bool => "COLUMN_TYPE_BOOL",
            ColumnType::Int => "COLUMN_TYPE_INT",
            ColumnType::Number => "COLUMN_TYPE_NUMBER",
            ColumnType::Date => "COLUMN_TYPE_DATE",
            ColumnType::Time => "COLUMN_TYPE_TIME",
            ColumnType::DateTime => "COLUMN_TYPE_DATETIME",
            ColumnType::Text => "COLUMN_TYPE_TEXT",
            ColumnType::Set => "COLUMN_TYPE_SET",
        }
    }
}

/// Name and type of one result column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Only meaningful for `Text` columns: binary data is exposed as bytes.
    #[serde(default)]
    pub binary: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            binary: false,
        }
    }

    /// Mark the column as holding binary data.
    pub fn binary(mut self) -> Self {
        self.binary = true;
        self
    }

    pub fn is_binary(&self) -> bool {
        self.binary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_for_every_type() {
        for code in 0..=8 {
            let ty = ColumnType::from_code(code).unwrap();
            assert_eq!(ty.code(), code);
        }
        assert_eq!(ColumnType::from_code(9), None);
        assert_eq!(ColumnType::DateTime.constant_name(), "COLUMN_TYPE_DATETIME");
    }

    #[test]
    fn column_serializes_with_type_key() {
        let col = Column::new("id", ColumnType::Int);
        let json = serde_json::to_value(&col).unwrap();
        assert_eq!(json["name"], "id");
        assert_eq!(json["type"], "int");
    }
}

//! Value -> SQL literal text.

use crate::connection::{Connection, Quoting};
use crate::error::{QueryError, QueryResult};
use crate::value::Value;
use crate::zone::DateZone;
use std::fmt::Write;

/// Renders [`Value`]s as SQL literals using a connection's escaping and
/// quoting rules.
pub struct Serializer<'a> {
    conn: &'a dyn Connection,
    quoting: Quoting,
    zone: DateZone,
}

impl<'a> Serializer<'a> {
    pub fn new(conn: &'a dyn Connection, zone: DateZone) -> Self {
        Self {
            conn,
            quoting: conn.quoting(),
            zone,
        }
    }

    pub fn quoting(&self) -> Quoting {
        self.quoting
    }

    /// Serialize one value.
    ///
    /// - arrays are wrapped in `(...)` unless `in_array`; a nested array
    ///   starts a new group, giving `(a,b),(c,d)`
    /// - dates become quoted `YYYY-MM-DD HH:MM:SS` in the configured zone
    /// - booleans become `1` / `0`, numbers are unquoted
    /// - strings are escaped and quoted when `escape`, verbatim otherwise
    /// - NULL becomes `NULL`
    pub fn serialize(&self, value: &Value, in_array: bool, escape: bool) -> QueryResult<String> {
        let mut out = String::new();
        self.write_value(&mut out, value, in_array, escape)?;
        Ok(out)
    }

    pub(crate) fn write_value(
        &self,
        out: &mut String,
        value: &Value,
        in_array: bool,
        escape: bool,
    ) -> QueryResult<()> {
        match value {
            Value::Array(items) => {
                if !in_array {
                    out.push('(');
                }
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        if item.is_array() {
                            out.push_str("),(");
                        } else {
                            out.push(',');
                        }
                    }
                    self.write_value(out, item, true, escape)?;
                }
                if !in_array {
                    out.push(')');
                }
            }
            Value::Date(millis) => {
                let text = self.zone.format_millis(*millis).ok_or_else(|| {
                    QueryError::format(format!("Date {millis} is out of range"))
                })?;
                out.push(self.quoting.string);
                out.push_str(&text);
                out.push(self.quoting.string);
            }
            Value::Bool(b) => out.push(if *b { '1' } else { '0' }),
            Value::Int(i) => {
                let _ = write!(out, "{i}");
            }
            Value::Float(f) => {
                if !f.is_finite() {
                    return Err(QueryError::format(format!(
                        "Cannot serialize non-finite number {f}"
                    )));
                }
                let _ = write!(out, "{f}");
            }
            Value::String(s) => {
                if escape {
                    out.push(self.quoting.string);
                    out.push_str(&self.conn.escape(s));
                    out.push(self.quoting.string);
                } else {
                    out.push_str(s);
                }
            }
            Value::Null => out.push_str("NULL"),
        }
        Ok(())
    }

    /// Escape a string with the connection's routine, without quoting it.
    pub fn escape(&self, s: &str) -> String {
        self.conn.escape(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryConnection;

    fn ser(conn: &MemoryConnection) -> Serializer<'_> {
        Serializer::new(conn, DateZone::Utc)
    }

    #[test]
    fn scalars() {
        let conn = MemoryConnection::new();
        let s = ser(&conn);
        assert_eq!(s.serialize(&Value::Int(-3), false, true).unwrap(), "-3");
        assert_eq!(s.serialize(&Value::Float(2.5), false, true).unwrap(), "2.5");
        assert_eq!(s.serialize(&Value::Bool(true), false, true).unwrap(), "1");
        assert_eq!(s.serialize(&Value::Bool(false), false, true).unwrap(), "0");
        assert_eq!(s.serialize(&Value::Null, false, true).unwrap(), "NULL");
    }

    #[test]
    fn strings_escape_only_when_asked() {
        let conn = MemoryConnection::new();
        let s = ser(&conn);
        assert_eq!(
            s.serialize(&Value::from("O'Brien"), false, true).unwrap(),
            r"'O\'Brien'"
        );
        assert_eq!(
            s.serialize(&Value::from("NOW()"), false, false).unwrap(),
            "NOW()"
        );
    }

    #[test]
    fn dates_are_quoted_wall_clock_text() {
        let conn = MemoryConnection::new();
        let s = ser(&conn);
        assert_eq!(
            s.serialize(&Value::Date(1_299_215_167_000), false, true).unwrap(),
            "'2011-03-04 05:06:07'"
        );
    }

    #[test]
    fn arrays_group_with_parentheses() {
        let conn = MemoryConnection::new();
        let s = ser(&conn);
        let flat = Value::from(vec![Value::from(1), Value::from("x")]);
        assert_eq!(s.serialize(&flat, false, true).unwrap(), "(1,'x')");
        assert_eq!(s.serialize(&flat, true, true).unwrap(), "1,'x'");

        let rows = Value::from(vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(s.serialize(&rows, false, true).unwrap(), "(1,2),(3,4)");
    }

    #[test]
    fn non_finite_float_is_rejected() {
        let conn = MemoryConnection::new();
        let s = ser(&conn);
        let err = s.serialize(&Value::Float(f64::NAN), false, true).unwrap_err();
        assert!(matches!(err, QueryError::Format(_)));
    }

    #[test]
    fn uses_connection_string_quote() {
        let conn = MemoryConnection::new().with_quoting(Quoting {
            string: '"',
            table: '"',
            field: '"',
        });
        let s = ser(&conn);
        assert_eq!(s.serialize(&Value::from("a"), false, true).unwrap(), "\"a\"");
    }
}

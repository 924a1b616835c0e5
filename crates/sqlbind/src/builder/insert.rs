use super::QueryBuilder;
use crate::error::{QueryError, QueryResult};
use crate::ident::{self, FieldSpec, TableSpec};
use crate::value::Value;

/// Column list of an `INSERT`.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertFields {
    /// No column list.
    Omit,
    /// Emitted verbatim inside the parentheses.
    Raw(String),
    /// Field specs, quoted and comma-joined. Must not be empty.
    List(Vec<FieldSpec>),
}

impl From<&str> for InsertFields {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

impl From<Vec<&str>> for InsertFields {
    fn from(fields: Vec<&str>) -> Self {
        Self::List(fields.into_iter().map(FieldSpec::from).collect())
    }
}

impl From<Vec<FieldSpec>> for InsertFields {
    fn from(fields: Vec<FieldSpec>) -> Self {
        Self::List(fields)
    }
}

impl QueryBuilder {
    /// Append `INSERT INTO table` followed by a space, for a body added later.
    pub fn insert_into(&mut self, table: impl Into<TableSpec>) -> QueryResult<&mut Self> {
        let rendered = ident::quote_table(self.connection.quoting(), &table.into(), true)?;
        self.push("INSERT INTO ");
        self.push(&rendered);
        Ok(self.push(" "))
    }

    /// Append `INSERT INTO table(fields) VALUES ...` with quoted identifiers.
    ///
    /// When the first row is itself an array every row becomes its own
    /// group (`VALUES (1,'a'),(2,'b')`); otherwise `rows` is one group. An
    /// empty `rows` omits the `VALUES` part.
    pub fn insert(
        &mut self,
        table: impl Into<TableSpec>,
        fields: impl Into<InsertFields>,
        rows: &[Value],
    ) -> QueryResult<&mut Self> {
        self.insert_with(table, fields, rows, true)
    }

    /// [`QueryBuilder::insert`], quoting the table only when `escape` is set.
    pub fn insert_with(
        &mut self,
        table: impl Into<TableSpec>,
        fields: impl Into<InsertFields>,
        rows: &[Value],
        escape: bool,
    ) -> QueryResult<&mut Self> {
        let ser = self.serializer();
        let mut out = String::from("INSERT INTO ");
        out.push_str(&ident::quote_table(ser.quoting(), &table.into(), escape)?);

        match fields.into() {
            InsertFields::Omit => {}
            InsertFields::Raw(raw) => {
                out.push('(');
                out.push_str(&raw);
                out.push(')');
            }
            InsertFields::List(fields) => {
                if fields.is_empty() {
                    return Err(QueryError::empty_input("No fields specified in insert"));
                }
                out.push('(');
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(&ident::field_name(&ser, field)?);
                }
                out.push(')');
            }
        }
        out.push(' ');

        if let Some(first) = rows.first() {
            let grouped = first.is_array();
            out.push_str("VALUES ");
            if !grouped {
                out.push('(');
            }
            for (i, row) in rows.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                ser.write_value(&mut out, row, false, true)?;
            }
            if !grouped {
                out.push(')');
            }
        }

        drop(ser);
        Ok(self.push(&out))
    }
}

use super::QueryBuilder;
use crate::error::{QueryError, QueryResult};
use crate::ident::{self, TableSpec, ValueExpr};

impl QueryBuilder {
    /// Append `UPDATE table` with quoted identifiers.
    pub fn update(&mut self, tables: impl Into<TableSpec>) -> QueryResult<&mut Self> {
        self.update_with(tables, true)
    }

    pub fn update_with(&mut self, tables: impl Into<TableSpec>, escape: bool) -> QueryResult<&mut Self> {
        let rendered = ident::quote_table(self.connection.quoting(), &tables.into(), escape)?;
        self.push("UPDATE ");
        Ok(self.push(&rendered))
    }

    /// Append ` SET field=value,...`.
    ///
    /// Values are escaped unless given as [`ValueExpr::raw`].
    pub fn set<K, E>(&mut self, assignments: impl IntoIterator<Item = (K, E)>) -> QueryResult<&mut Self>
    where
        K: AsRef<str>,
        E: Into<ValueExpr>,
    {
        self.set_with(assignments, true)
    }

    /// [`QueryBuilder::set`], quoting field names only when `escape` is set.
    pub fn set_with<K, E>(
        &mut self,
        assignments: impl IntoIterator<Item = (K, E)>,
        escape: bool,
    ) -> QueryResult<&mut Self>
    where
        K: AsRef<str>,
        E: Into<ValueExpr>,
    {
        let ser = self.serializer();
        // Field names use the table-quote character.
        let quote = ser.quoting().table;
        let mut out = String::from(" SET ");
        let mut empty = true;
        for (i, (field, expr)) in assignments.into_iter().enumerate() {
            empty = false;
            if i > 0 {
                out.push(',');
            }
            ident::write_quoted(&mut out, quote, field.as_ref(), escape);
            out.push('=');
            let expr = expr.into();
            let (value, escape_value) = expr.resolve(|_| true, true);
            ser.write_value(&mut out, value, false, escape_value)?;
        }
        if empty {
            return Err(QueryError::empty_input(
                "Non empty objects should be used for values in set",
            ));
        }

        drop(ser);
        Ok(self.push(&out))
    }
}

use super::QueryBuilder;
use crate::error::QueryResult;
use crate::ident::{self, TableSpec};

impl QueryBuilder {
    /// Append a bare `DELETE`; follow with [`QueryBuilder::from`].
    pub fn delete(&mut self) -> &mut Self {
        self.push("DELETE")
    }

    /// Append `DELETE tables` (multi-table form) with quoted identifiers.
    pub fn delete_tables(&mut self, tables: impl Into<TableSpec>) -> QueryResult<&mut Self> {
        self.delete_with(tables, true)
    }

    pub fn delete_with(&mut self, tables: impl Into<TableSpec>, escape: bool) -> QueryResult<&mut Self> {
        let rendered = ident::quote_table(self.connection.quoting(), &tables.into(), escape)?;
        self.push("DELETE ");
        Ok(self.push(&rendered))
    }
}

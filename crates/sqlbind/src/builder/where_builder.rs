//! `WHERE` / `AND` / `OR` conditions.

use super::QueryBuilder;
use crate::error::QueryResult;
use crate::placeholder;
use crate::value::Value;

impl QueryBuilder {
    /// Append ` WHERE cond`, binding `values` to its placeholders now.
    pub fn where_(&mut self, cond: &str, values: &[Value]) -> QueryResult<&mut Self> {
        self.condition("WHERE", cond, values)
    }

    /// Append ` AND cond`.
    pub fn and(&mut self, cond: &str, values: &[Value]) -> QueryResult<&mut Self> {
        self.condition("AND", cond, values)
    }

    /// Append ` OR cond`.
    pub fn or(&mut self, cond: &str, values: &[Value]) -> QueryResult<&mut Self> {
        self.condition("OR", cond, values)
    }

    fn condition(&mut self, keyword: &str, cond: &str, values: &[Value]) -> QueryResult<&mut Self> {
        let resolved = placeholder::resolve_clause(cond, values, &self.serializer())?;
        self.sql.push(' ');
        self.sql.push_str(keyword);
        self.sql.push(' ');
        Ok(self.push(&resolved))
    }
}

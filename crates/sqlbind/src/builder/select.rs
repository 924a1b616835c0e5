use super::QueryBuilder;
use crate::error::{QueryError, QueryResult};
use crate::ident::{self, Selection, TableSpec};
use crate::placeholder;
use crate::value::Value;

/// A `JOIN` clause.
///
/// ```ignore
/// qb.join(
///     &Join::new("profiles").kind("left").alias("p").on("p.user_id = u.id AND p.kind = ?"),
///     &values!["main"],
/// )?;
/// // LEFT JOIN `profiles` AS `p` ON (p.user_id = u.id AND p.kind = 'main')
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub table: String,
    /// Join type, upper-cased on output. Defaults to `INNER`.
    pub kind: Option<String>,
    pub alias: Option<String>,
    /// `ON` conditions; may contain placeholders.
    pub conditions: Option<String>,
    /// Quote table and alias. Defaults to true.
    pub escape: bool,
}

impl Join {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            kind: None,
            alias: None,
            conditions: None,
            escape: true,
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn on(mut self, conditions: impl Into<String>) -> Self {
        self.conditions = Some(conditions.into());
        self
    }

    pub fn escape(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }
}

impl QueryBuilder {
    /// Append `SELECT fields`.
    ///
    /// A raw string is emitted verbatim; field specs go through identifier
    /// quoting and are comma-joined.
    pub fn select(&mut self, fields: impl Into<Selection>) -> QueryResult<&mut Self> {
        let rendered = {
            let ser = self.serializer();
            match fields.into() {
                Selection::Raw(raw) => raw,
                Selection::Field(field) => ident::field_name(&ser, &field)?,
                Selection::Fields(fields) => {
                    if fields.is_empty() {
                        return Err(QueryError::empty_input("No fields specified in select"));
                    }
                    fields
                        .iter()
                        .map(|f| ident::field_name(&ser, f))
                        .collect::<QueryResult<Vec<_>>>()?
                        .join(",")
                }
            }
        };
        self.push("SELECT ");
        Ok(self.push(&rendered))
    }

    /// Append `FROM tables` with quoted identifiers.
    pub fn from(&mut self, tables: impl Into<TableSpec>) -> QueryResult<&mut Self> {
        self.from_with(tables, true)
    }

    /// Append `FROM tables`, quoting only when `escape` is set.
    pub fn from_with(&mut self, tables: impl Into<TableSpec>, escape: bool) -> QueryResult<&mut Self> {
        let rendered = ident::quote_table(self.connection.quoting(), &tables.into(), escape)?;
        self.push(" FROM ");
        Ok(self.push(&rendered))
    }

    /// Append a `JOIN`. `values` bind the placeholders of the join conditions.
    pub fn join(&mut self, join: &Join, values: &[Value]) -> QueryResult<&mut Self> {
        let quote = self.connection.quoting().table;
        let mut out = String::from(" ");
        match &join.kind {
            Some(kind) => out.push_str(&kind.to_uppercase()),
            None => out.push_str("INNER"),
        }
        out.push_str(" JOIN ");
        ident::write_quoted(&mut out, quote, &join.table, join.escape);
        if let Some(alias) = &join.alias {
            out.push_str(" AS ");
            ident::write_quoted(&mut out, quote, alias, join.escape);
        }
        if let Some(conditions) = &join.conditions {
            let resolved =
                placeholder::resolve_clause(conditions, values, &self.serializer())?;
            out.push_str(" ON (");
            out.push_str(&resolved);
            out.push(')');
        }
        Ok(self.push(&out))
    }

    /// Append `LIMIT rows`.
    pub fn limit(&mut self, rows: u32) -> &mut Self {
        self.push(&format!(" LIMIT {rows}"))
    }

    /// Append `LIMIT offset,rows`.
    pub fn limit_offset(&mut self, offset: u32, rows: u32) -> &mut Self {
        self.push(&format!(" LIMIT {offset},{rows}"))
    }
}

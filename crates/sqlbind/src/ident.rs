//! Table and field identifier handling.
//!
//! Identifiers are wrapped in the connection's quoting characters; aliases
//! are rendered as `expr AS alias`.
//!
//! # Example
//! ```ignore
//! use sqlbind::{FieldSpec, TableSpec};
//!
//! qb.select(vec![FieldSpec::from("id"), FieldSpec::alias("total", "SUM(amount)")])?
//!     .from(TableSpec::alias("o", "orders"))?;
//! // SELECT `id`,SUM(amount) AS `total` FROM `orders` AS `o`
//! ```

use crate::connection::Quoting;
use crate::error::{QueryError, QueryResult};
use crate::serialize::Serializer;
use crate::value::Value;

/// A table reference: a bare name or an `{alias: table}` mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum TableSpec {
    Name(String),
    /// `(alias, table)` pairs. Only the first pair is rendered.
    Aliased(Vec<(String, String)>),
}

impl TableSpec {
    /// `table AS alias`.
    pub fn alias(alias: impl Into<String>, table: impl Into<String>) -> Self {
        Self::Aliased(vec![(alias.into(), table.into())])
    }
}

impl From<&str> for TableSpec {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for TableSpec {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// An expression on the value side of an alias or a `SET` assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueExpr {
    /// A plain value; escaping follows the default of the clause it is used in.
    Literal(Value),
    /// A value with an explicit escaping choice (`{value, escape}`).
    Expr { value: Value, escape: Option<bool> },
}

impl ValueExpr {
    /// A value that is always escaped and quoted.
    pub fn escaped(value: impl Into<Value>) -> Self {
        Self::Expr {
            value: value.into(),
            escape: Some(true),
        }
    }

    /// A value emitted verbatim (SQL expressions such as `NOW()`).
    pub fn raw(value: impl Into<Value>) -> Self {
        Self::Expr {
            value: value.into(),
            escape: Some(false),
        }
    }

    /// Resolve to the value and the escaping to apply.
    ///
    /// `literal_default` applies to [`ValueExpr::Literal`], `expr_default` to
    /// an [`ValueExpr::Expr`] without an explicit choice.
    pub(crate) fn resolve(
        &self,
        literal_default: impl FnOnce(&Value) -> bool,
        expr_default: bool,
    ) -> (&Value, bool) {
        match self {
            ValueExpr::Literal(value) => (value, literal_default(value)),
            ValueExpr::Expr { value, escape } => (value, escape.unwrap_or(expr_default)),
        }
    }
}

macro_rules! impl_value_expr_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ValueExpr {
                fn from(v: $t) -> Self {
                    ValueExpr::Literal(Value::from(v))
                }
            }
        )*
    };
}

impl_value_expr_from!(&str, String, bool, i32, i64, u32, f64);

impl From<Value> for ValueExpr {
    fn from(v: Value) -> Self {
        ValueExpr::Literal(v)
    }
}

/// A single entry of a field list.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    /// A field name, quoted with the field-quote character.
    Name(String),
    /// `(alias, expression)` pairs rendered as `expr AS alias`, comma-joined.
    Aliased(Vec<(String, ValueExpr)>),
}

impl FieldSpec {
    /// `expr AS alias`.
    pub fn alias(alias: impl Into<String>, expr: impl Into<ValueExpr>) -> Self {
        Self::Aliased(vec![(alias.into(), expr.into())])
    }

    /// Several aliases in one entry.
    pub fn aliases<A, E>(pairs: impl IntoIterator<Item = (A, E)>) -> Self
    where
        A: Into<String>,
        E: Into<ValueExpr>,
    {
        Self::Aliased(
            pairs
                .into_iter()
                .map(|(a, e)| (a.into(), e.into()))
                .collect(),
        )
    }
}

impl From<&str> for FieldSpec {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for FieldSpec {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// Argument of `select`.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Emitted verbatim.
    Raw(String),
    /// Comma-joined field specs; must not be empty.
    Fields(Vec<FieldSpec>),
    /// A single field spec.
    Field(FieldSpec),
}

impl From<&str> for Selection {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

impl From<String> for Selection {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

impl From<Vec<FieldSpec>> for Selection {
    fn from(fields: Vec<FieldSpec>) -> Self {
        Self::Fields(fields)
    }
}

impl From<Vec<&str>> for Selection {
    fn from(fields: Vec<&str>) -> Self {
        Self::Fields(fields.into_iter().map(FieldSpec::from).collect())
    }
}

impl From<FieldSpec> for Selection {
    fn from(field: FieldSpec) -> Self {
        Self::Field(field)
    }
}

pub(crate) fn write_quoted(out: &mut String, quote: char, name: &str, escape: bool) {
    if escape {
        out.push(quote);
    }
    out.push_str(name);
    if escape {
        out.push(quote);
    }
}

/// Wrap a field name in the field-quote character.
pub fn quote_field(quoting: Quoting, name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    write_quoted(&mut out, quoting.field, name, true);
    out
}

/// Render a table reference, quoting with the table-quote character when
/// `escape` is set.
pub fn quote_table(quoting: Quoting, spec: &TableSpec, escape: bool) -> QueryResult<String> {
    let mut out = String::new();
    match spec {
        TableSpec::Name(name) => write_quoted(&mut out, quoting.table, name, escape),
        TableSpec::Aliased(pairs) => {
            let Some((alias, table)) = pairs.first() else {
                return Err(QueryError::format(
                    "Non empty objects should be used for aliasing",
                ));
            };
            write_quoted(&mut out, quoting.table, table, escape);
            out.push_str(" AS ");
            write_quoted(&mut out, quoting.table, alias, escape);
        }
    }
    Ok(out)
}

/// Render one field-list entry.
///
/// Literal strings in an alias are emitted verbatim (they are usually SQL
/// expressions); other literals are escaped. `{value, escape}` expressions
/// default to verbatim.
pub fn field_name(ser: &Serializer<'_>, spec: &FieldSpec) -> QueryResult<String> {
    let quoting = ser.quoting();
    match spec {
        FieldSpec::Name(name) => Ok(quote_field(quoting, name)),
        FieldSpec::Aliased(pairs) => {
            if pairs.is_empty() {
                return Err(QueryError::format(
                    "Non empty objects should be used for value aliasing in select",
                ));
            }
            let mut out = String::new();
            for (i, (alias, expr)) in pairs.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                let (value, escape) =
                    expr.resolve(|v| !matches!(v, Value::String(_)), false);
                ser.write_value(&mut out, value, false, escape)?;
                out.push_str(" AS ");
                write_quoted(&mut out, quoting.field, alias, true);
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryConnection;
    use crate::zone::DateZone;

    #[test]
    fn quote_field_uses_field_char() {
        assert_eq!(quote_field(Quoting::MYSQL, "id"), "`id`");
        assert_eq!(quote_field(Quoting::ANSI, "id"), "\"id\"");
    }

    #[test]
    fn quote_table_plain_and_unescaped() {
        let spec = TableSpec::from("users");
        assert_eq!(quote_table(Quoting::MYSQL, &spec, true).unwrap(), "`users`");
        assert_eq!(quote_table(Quoting::MYSQL, &spec, false).unwrap(), "users");
    }

    #[test]
    fn quote_table_alias() {
        let spec = TableSpec::alias("u", "users");
        assert_eq!(
            quote_table(Quoting::MYSQL, &spec, true).unwrap(),
            "`users` AS `u`"
        );
        assert_eq!(
            quote_table(Quoting::MYSQL, &spec, false).unwrap(),
            "users AS u"
        );
    }

    #[test]
    fn quote_table_rejects_empty_alias_map() {
        let err = quote_table(Quoting::MYSQL, &TableSpec::Aliased(vec![]), true).unwrap_err();
        assert!(matches!(err, QueryError::Format(_)));
    }

    #[test]
    fn field_name_aliases() {
        let conn = MemoryConnection::new();
        let ser = Serializer::new(&conn, DateZone::Utc);

        assert_eq!(field_name(&ser, &FieldSpec::from("a")).unwrap(), "`a`");
        assert_eq!(
            field_name(&ser, &FieldSpec::alias("total", "SUM(b)")).unwrap(),
            "SUM(b) AS `total`"
        );
        assert_eq!(
            field_name(&ser, &FieldSpec::alias("n", 5)).unwrap(),
            "5 AS `n`"
        );
        assert_eq!(
            field_name(&ser, &FieldSpec::alias("s", ValueExpr::escaped("x'y"))).unwrap(),
            r"'x\'y' AS `s`"
        );
        assert_eq!(
            field_name(
                &ser,
                &FieldSpec::aliases([("a", ValueExpr::raw("1+1")), ("b", ValueExpr::from(true))])
            )
            .unwrap(),
            "1+1 AS `a`,1 AS `b`"
        );
    }

    #[test]
    fn field_name_rejects_empty_alias_map() {
        let conn = MemoryConnection::new();
        let ser = Serializer::new(&conn, DateZone::Utc);
        let err = field_name(&ser, &FieldSpec::Aliased(vec![])).unwrap_err();
        assert!(matches!(err, QueryError::Format(_)));
    }
}

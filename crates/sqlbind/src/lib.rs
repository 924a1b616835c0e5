//! # sqlbind
//!
//! An incremental SQL query builder with `?` placeholder binding and typed
//! row materialization, for MySQL-style drivers.
//!
//! ## Features
//!
//! - **Textual builder**: clauses append to one SQL buffer and chain
//! - **Placeholder binding**: `?` marks are replaced by escaped literals, skipping
//!   quoted strings and `\?`
//! - **Driver-supplied quoting**: quote characters and escaping come from the [`Connection`]
//! - **Typed rows**: cells are cast by column type (bool, int, number, date, time, set, text)
//! - **Lifecycle notifications**: `each_row`, `success`, `error`, `finish` via [`QueryEvents`]
//! - **Sync or async**: `execute` runs inline, `execute_async` offloads the driver call
//!
//! ## Example
//!
//! ```ignore
//! use sqlbind::prelude::*;
//!
//! let db = Database::new(driver);
//! db.connect(&ConnectionOptions::new().hostname("localhost").user("root"))?;
//!
//! let mut qb = db.query();
//! qb.select(vec!["id", "name"])?
//!     .from("users")?
//!     .where_("age > ? AND name LIKE ?", &values![18, "a%"])?
//!     .limit(10);
//!
//! let result = qb.execute_async(&TracingEvents::new()).await?.into_result()?;
//! for row in &result.rows {
//!     println!("{}", row.to_json());
//! }
//! ```

pub mod builder;
pub mod column;
pub mod config;
pub mod connection;
pub mod database;
pub mod error;
pub mod exec;
pub mod ident;
pub mod json;
pub mod memory;
pub mod placeholder;
pub mod prelude;
pub mod serialize;
pub mod value;
pub mod zone;

pub use builder::{InsertFields, Join, QueryBuilder};
pub use column::{Column, ColumnType};
pub use config::{ConnectionOptions, QueryOptions};
pub use connection::{Connection, Quoting, ResultSet, RowCells, ServerInfo};
pub use database::Database;
pub use error::{QueryError, QueryResult};
pub use exec::{
    CompositeEvents, Execution, ExecutionResult, NoopEvents, QueryEvent, QueryEvents, RawRow,
    StartAction, StatementKind, TracingEvents, TypedRow, TypedValue,
};
pub use ident::{FieldSpec, Selection, TableSpec, ValueExpr, quote_field, quote_table};
pub use memory::MemoryConnection;
pub use placeholder::{Template, resolve, resolve_clause};
pub use serialize::Serializer;
pub use value::Value;
pub use zone::DateZone;

/// Truncate `sql` to at most `max_bytes`, backing off to a UTF-8 boundary.
pub fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

#[cfg(test)]
mod tests {
    use super::truncate_sql_bytes;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_sql_bytes("SELECT 1", 100), "SELECT 1");
        assert_eq!(truncate_sql_bytes("SELECT 1", 6), "SELECT");
        // 'é' is two bytes
        assert_eq!(truncate_sql_bytes("caé", 3), "ca");
    }
}

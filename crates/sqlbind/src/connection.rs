//! Driver-facing traits.
//!
//! The engine never talks to a database directly. A driver supplies a
//! [`Connection`] (escaping, quoting characters, statement execution) and a
//! [`ResultSet`] cursor over raw rows.

use crate::column::Column;
use crate::config::ConnectionOptions;
use crate::error::QueryResult;
use serde::Serialize;

/// Quoting characters used by a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quoting {
    /// Delimits string literals.
    pub string: char,
    /// Delimits table names and aliases.
    pub table: char,
    /// Delimits field names and aliases.
    pub field: char,
}

impl Quoting {
    /// `'string'`, `` `table` ``, `` `field` ``
    pub const MYSQL: Quoting = Quoting {
        string: '\'',
        table: '`',
        field: '`',
    };

    /// `'string'`, `"table"`, `"field"`
    pub const ANSI: Quoting = Quoting {
        string: '\'',
        table: '"',
        field: '"',
    };
}

impl Default for Quoting {
    fn default() -> Self {
        Self::MYSQL
    }
}

/// One fetched row, borrowed from the cursor's internal buffer.
///
/// `None` is SQL NULL. Each slice carries its own length and may contain
/// zero bytes. The borrow ends before the cursor can advance.
pub type RowCells<'a> = Vec<Option<&'a [u8]>>;

/// A forward-only cursor over the rows of one statement.
pub trait ResultSet {
    /// Number of columns in every row.
    fn column_count(&self) -> usize;

    /// Metadata for column `index`, or `None` when out of range.
    fn column(&self, index: usize) -> Option<Column>;

    /// Whether another row is available.
    fn has_next(&self) -> bool;

    /// Advance to the next row.
    ///
    /// The returned cells may point into a buffer that the next call
    /// overwrites, so callers copy what they keep.
    fn next(&mut self) -> QueryResult<RowCells<'_>>;
}

/// A database connection supplied by a driver.
///
/// Methods take `&self` so a connection can be shared with a blocking worker
/// behind an `Arc`; drivers use interior mutability for their state.
pub trait Connection: Send + Sync {
    /// Apply settings before [`Connection::open`].
    fn configure(&self, options: &ConnectionOptions);

    /// Current settings.
    fn options(&self) -> ConnectionOptions;

    /// Open the connection.
    fn open(&self) -> QueryResult<()>;

    /// Close the connection. Closing a closed connection is a no-op.
    fn close(&self);

    fn is_opened(&self) -> bool;

    /// Server version string.
    fn version(&self) -> String;

    /// Escape a string for inclusion between string-quote characters.
    fn escape(&self, value: &str) -> String;

    /// Quoting characters for strings, tables and fields.
    fn quoting(&self) -> Quoting;

    /// Run a statement. Statements without a result set yield an empty
    /// cursor with zero columns.
    fn query(&self, sql: &str) -> QueryResult<Box<dyn ResultSet + '_>>;
}

/// Server details reported after a successful connect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    pub version: String,
    pub hostname: Option<String>,
    pub user: Option<String>,
    pub database: Option<String>,
}

impl ServerInfo {
    pub(crate) fn from_connection(conn: &dyn Connection) -> Self {
        let options = conn.options();
        Self {
            version: conn.version(),
            hostname: options.hostname,
            user: options.user,
            database: options.database,
        }
    }
}

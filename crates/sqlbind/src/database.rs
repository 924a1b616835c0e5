//! Connection-level client.

use crate::builder::QueryBuilder;
use crate::config::ConnectionOptions;
use crate::connection::{Connection, ServerInfo};
use crate::error::{QueryError, QueryResult};
use crate::ident::{self, TableSpec};
use std::sync::Arc;

/// A database handle: connects, quotes identifiers and hands out builders.
#[derive(Clone)]
pub struct Database {
    connection: Arc<dyn Connection>,
}

impl Database {
    pub fn new<C: Connection + 'static>(connection: C) -> Self {
        Self {
            connection: Arc::new(connection),
        }
    }

    pub fn from_arc(connection: Arc<dyn Connection>) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &Arc<dyn Connection> {
        &self.connection
    }

    /// Configure and open the connection on the calling thread.
    pub fn connect(&self, options: &ConnectionOptions) -> QueryResult<ServerInfo> {
        open(self.connection.as_ref(), options)
    }

    /// Configure and open the connection on a blocking worker.
    pub async fn connect_async(&self, options: &ConnectionOptions) -> QueryResult<ServerInfo> {
        let connection = Arc::clone(&self.connection);
        let options = options.clone();
        tokio::task::spawn_blocking(move || open(connection.as_ref(), &options))
            .await
            .map_err(|err| QueryError::connection(format!("Connect worker failed: {err}")))?
    }

    pub fn disconnect(&self) {
        self.connection.close();
        tracing::debug!(target: "sqlbind.sql", "disconnected");
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_opened()
    }

    /// Escape a string with the connection's routine, without quoting it.
    pub fn escape(&self, value: &str) -> String {
        self.connection.escape(value)
    }

    /// Quote a table name.
    pub fn table(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 2);
        ident::write_quoted(&mut out, self.connection.quoting().table, name, true);
        out
    }

    /// Quote a table reference, including `table AS alias` forms.
    pub fn table_spec(&self, spec: impl Into<TableSpec>) -> QueryResult<String> {
        ident::quote_table(self.connection.quoting(), &spec.into(), true)
    }

    /// Quote a field name.
    pub fn field(&self, name: &str) -> String {
        ident::quote_field(self.connection.quoting(), name)
    }

    /// A new, empty builder on this connection.
    pub fn query(&self) -> QueryBuilder {
        QueryBuilder::new(Arc::clone(&self.connection))
    }
}

fn open(connection: &dyn Connection, options: &ConnectionOptions) -> QueryResult<ServerInfo> {
    connection.configure(options);
    connection.open().map_err(|err| {
        let message = err.message();
        tracing::warn!(
            target: "sqlbind.sql",
            hostname = ?options.hostname,
            error = %message,
            "connect failed"
        );
        QueryError::Connection(message)
    })?;
    let info = ServerInfo::from_connection(connection);
    tracing::info!(
        target: "sqlbind.sql",
        version = %info.version,
        hostname = ?info.hostname,
        database = ?info.database,
        "connected"
    );
    Ok(info)
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("connected", &self.connection.is_opened())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryConnection;

    #[test]
    fn connect_reports_server_info() {
        let db = Database::new(MemoryConnection::new().with_version("8.0.1"));
        assert!(!db.is_connected());

        let info = db
            .connect(&ConnectionOptions::new().hostname("localhost").user("root").database("shop"))
            .unwrap();
        assert_eq!(info.version, "8.0.1");
        assert_eq!(info.hostname.as_deref(), Some("localhost"));
        assert_eq!(info.user.as_deref(), Some("root"));
        assert_eq!(info.database.as_deref(), Some("shop"));
        assert!(db.is_connected());

        db.disconnect();
        assert!(!db.is_connected());
    }

    #[test]
    fn connect_failure_is_connection_error() {
        let db = Database::new(MemoryConnection::new().fail_open("Access denied"));
        let err = db.connect(&ConnectionOptions::new()).unwrap_err();
        assert_eq!(err, QueryError::Connection("Access denied".into()));
        assert!(!db.is_connected());
    }

    #[tokio::test]
    async fn connect_async_opens_on_worker() {
        let db = Database::new(MemoryConnection::new());
        let info = db.connect_async(&ConnectionOptions::new().user("app")).await.unwrap();
        assert_eq!(info.user.as_deref(), Some("app"));
        assert!(db.is_connected());
    }

    #[test]
    fn quoting_helpers() {
        let db = Database::new(MemoryConnection::new());
        assert_eq!(db.table("users"), "`users`");
        assert_eq!(db.field("id"), "`id`");
        assert_eq!(db.escape("it's"), r"it\'s");
        assert_eq!(
            db.table_spec(TableSpec::alias("u", "users")).unwrap(),
            "`users` AS `u`"
        );
    }
}

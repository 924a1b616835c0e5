//! Execution pipeline.
//!
//! `Built -> Dispatched -> (RowsFetched | Failed) -> Finished`.
//!
//! The builder's buffer is resolved once against its bound values, offered
//! to the start hook, then sent to the connection. Rows are copied out of
//! the driver while fetching and cast only after the fetch completed, so a
//! failure mid-fetch produces no row notifications.

mod cast;
mod events;
mod raw;
mod tracing_events;

pub use cast::{TypedRow, TypedValue, cast_cell, materialize};
pub use events::{CompositeEvents, NoopEvents, QueryEvent, QueryEvents, StartAction};
pub use raw::RawRow;
pub use tracing_events::TracingEvents;

use crate::builder::QueryBuilder;
use crate::column::Column;
use crate::error::{QueryError, QueryResult};
use raw::Fetched;
use std::sync::Arc;
use std::time::Instant;

/// Rows and columns of a successful execution.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExecutionResult {
    pub rows: Vec<TypedRow>,
    pub columns: Vec<Column>,
}

/// Outcome of one execution.
#[derive(Debug, Clone, PartialEq)]
pub enum Execution {
    Completed(ExecutionResult),
    /// Failed after dispatch; the message was delivered to `error`.
    Failed(String),
    /// The start hook suppressed execution.
    Suppressed,
}

impl Execution {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// The result of a completed execution.
    pub fn into_result(self) -> QueryResult<ExecutionResult> {
        match self {
            Self::Completed(result) => Ok(result),
            Self::Failed(message) => Err(QueryError::Execution(message)),
            Self::Suppressed => Err(QueryError::execution("Execution was suppressed")),
        }
    }
}

/// Statement category, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Other,
}

impl StatementKind {
    /// Detect the category from the leading keyword.
    pub fn from_sql(sql: &str) -> Self {
        let trimmed = sql.trim_start().trim_start_matches('(').trim_start();
        let starts_with = |keyword: &str| {
            trimmed
                .get(..keyword.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(keyword))
        };
        if starts_with("SELECT") {
            Self::Select
        } else if starts_with("INSERT") {
            Self::Insert
        } else if starts_with("UPDATE") {
            Self::Update
        } else if starts_with("DELETE") {
            Self::Delete
        } else {
            Self::Other
        }
    }
}

/// Driver messages can be empty.
fn diagnostic(err: &QueryError) -> String {
    let message = err.message();
    if message.is_empty() {
        "(unknown error)".to_string()
    } else {
        message
    }
}

impl QueryBuilder {
    /// Execute on the calling thread.
    ///
    /// Returns `Err` only when the SQL cannot be resolved; nothing is
    /// dispatched or notified in that case. Failures after dispatch are
    /// delivered to `events` and returned as [`Execution::Failed`].
    pub fn execute(&mut self, events: &dyn QueryEvents) -> QueryResult<Execution> {
        let Some(sql) = self.prepare()? else {
            return Ok(Execution::Suppressed);
        };
        let started = Instant::now();
        let fetched = raw::fetch(self.connection.as_ref(), &sql);
        Ok(self.complete(&sql, started, fetched, events))
    }

    /// Execute without blocking the runtime.
    ///
    /// With the `async` option set (the default) the connection call and row
    /// copy run on a blocking worker; casting and notifications run on the
    /// awaiting task. Otherwise this behaves like [`QueryBuilder::execute`].
    pub async fn execute_async(&mut self, events: &dyn QueryEvents) -> QueryResult<Execution> {
        let Some(sql) = self.prepare()? else {
            return Ok(Execution::Suppressed);
        };
        let started = Instant::now();
        let fetched = if self.options.async_mode {
            let connection = Arc::clone(&self.connection);
            let worker_sql = sql.clone();
            tokio::task::spawn_blocking(move || raw::fetch(connection.as_ref(), &worker_sql))
                .await
                .unwrap_or_else(|err| Err(QueryError::execution(format!("Query worker failed: {err}"))))
        } else {
            raw::fetch(self.connection.as_ref(), &sql)
        };
        Ok(self.complete(&sql, started, fetched, events))
    }

    /// Resolve the buffer and run the start hook. `None` means suppressed.
    fn prepare(&self) -> QueryResult<Option<String>> {
        let sql = self.to_sql()?;
        let sql = match self.on_start.as_ref().map(|hook| hook(&sql)) {
            None | Some(StartAction::Continue) => sql,
            Some(StartAction::ModifySql(replacement)) => replacement,
            Some(StartAction::Suppress) => {
                tracing::debug!(target: "sqlbind.sql", "execution suppressed by start hook");
                return Ok(None);
            }
        };
        tracing::debug!(
            target: "sqlbind.sql",
            kind = ?StatementKind::from_sql(&sql),
            sql = %crate::truncate_sql_bytes(&sql, 200),
            "dispatching query"
        );
        Ok(Some(sql))
    }

    fn complete(
        &self,
        sql: &str,
        started: Instant,
        fetched: QueryResult<Fetched>,
        events: &dyn QueryEvents,
    ) -> Execution {
        let outcome = match fetched {
            Ok(Fetched { columns, rows }) => {
                let rows: Vec<TypedRow> = rows
                    .iter()
                    .map(|raw| materialize(raw, &columns, &self.options))
                    .collect();
                let total = rows.len();
                for (index, row) in rows.iter().enumerate() {
                    events.each_row(row, index, index + 1 == total);
                }
                tracing::debug!(
                    target: "sqlbind.sql",
                    kind = ?StatementKind::from_sql(sql),
                    rows = total,
                    columns = columns.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "query completed"
                );
                events.success(&rows, &columns);
                if let Some(hook) = &self.on_success {
                    hook(&rows, &columns);
                }
                Execution::Completed(ExecutionResult { rows, columns })
            }
            Err(err) => {
                let message = diagnostic(&err);
                tracing::warn!(
                    target: "sqlbind.sql",
                    kind = ?StatementKind::from_sql(sql),
                    sql = %crate::truncate_sql_bytes(sql, 200),
                    error = %message,
                    "query failed"
                );
                events.error(&message);
                Execution::Failed(message)
            }
        };
        events.finish();
        if let Some(hook) = &self.on_finish {
            hook();
        }
        outcome
    }
}

//! Incremental SQL builder.
//!
//! A [`QueryBuilder`] is a textual accumulator: each clause call appends to
//! one SQL buffer and returns the builder for chaining. Nothing checks that
//! the statement as a whole is well formed.
//!
//! ## Design
//!
//! - Quoting characters and string escaping come from the [`Connection`].
//! - Condition placeholders (`?`) are resolved immediately when the clause is
//!   added, though an escaped `\?` stays escaped; placeholders left in the
//!   buffer are resolved once at execution against the builder's bound values.
//! - A clause that fails leaves the buffer untouched.

pub mod delete;
pub mod insert;
pub mod select;
pub mod update;
pub mod where_builder;

pub use insert::InsertFields;
pub use select::Join;

use crate::column::Column;
use crate::config::QueryOptions;
use crate::connection::Connection;
use crate::error::QueryResult;
use crate::exec::{StartAction, TypedRow};
use crate::placeholder;
use crate::serialize::Serializer;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Called with the final SQL before dispatch.
pub type StartHook = Arc<dyn Fn(&str) -> StartAction + Send + Sync>;
/// Called after every execution that was dispatched.
pub type FinishHook = Arc<dyn Fn() + Send + Sync>;
/// Called with the rows and columns of a successful execution.
pub type SuccessHook = Arc<dyn Fn(&[TypedRow], &[Column]) + Send + Sync>;

/// Mutable SQL builder bound to a connection.
#[derive(Clone)]
pub struct QueryBuilder {
    pub(crate) connection: Arc<dyn Connection>,
    pub(crate) sql: String,
    pub(crate) values: Vec<Value>,
    pub(crate) options: QueryOptions,
    pub(crate) on_start: Option<StartHook>,
    pub(crate) on_finish: Option<FinishHook>,
    pub(crate) on_success: Option<SuccessHook>,
}

impl QueryBuilder {
    /// Create an empty builder with default options.
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self {
            connection,
            sql: String::new(),
            values: Vec::new(),
            options: QueryOptions::default(),
            on_start: None,
            on_finish: None,
            on_success: None,
        }
    }

    /// Replace the SQL buffer.
    pub fn sql(&mut self, sql: impl Into<String>) -> &mut Self {
        self.sql = sql.into();
        self
    }

    /// Set the values bound to placeholders left in the buffer.
    pub fn values(&mut self, values: Vec<Value>) -> &mut Self {
        self.values = values;
        self
    }

    /// Replace the execution options.
    pub fn options(&mut self, options: QueryOptions) -> &mut Self {
        self.options = options;
        self
    }

    /// Inspect or rewrite the final SQL, or suppress execution.
    pub fn on_start<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&str) -> StartAction + Send + Sync + 'static,
    {
        self.on_start = Some(Arc::new(hook));
        self
    }

    pub fn on_finish<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_finish = Some(Arc::new(hook));
        self
    }

    pub fn on_success<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&[TypedRow], &[Column]) + Send + Sync + 'static,
    {
        self.on_success = Some(Arc::new(hook));
        self
    }

    /// The SQL buffer as accumulated so far.
    pub fn buffer(&self) -> &str {
        &self.sql
    }

    /// Values bound at execution.
    pub fn bound_values(&self) -> &[Value] {
        &self.values
    }

    pub fn query_options(&self) -> &QueryOptions {
        &self.options
    }

    pub fn connection(&self) -> &Arc<dyn Connection> {
        &self.connection
    }

    /// The final SQL: the buffer with its placeholders resolved against the
    /// bound values.
    pub fn to_sql(&self) -> QueryResult<String> {
        placeholder::resolve(&self.sql, &self.values, &self.serializer())
    }

    pub(crate) fn serializer(&self) -> Serializer<'_> {
        Serializer::new(self.connection.as_ref(), self.options.date_zone)
    }

    pub(crate) fn push(&mut self, fragment: &str) -> &mut Self {
        self.sql.push_str(fragment);
        self
    }

    /// Append a raw fragment, separated by a space.
    pub fn add(&mut self, raw: &str) -> &mut Self {
        self.sql.push(' ');
        self.push(raw)
    }
}

impl fmt::Debug for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("sql", &self.sql)
            .field("values", &self.values)
            .field("options", &self.options)
            .field("on_start", &self.on_start.is_some())
            .field("on_finish", &self.on_finish.is_some())
            .field("on_success", &self.on_success.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests;

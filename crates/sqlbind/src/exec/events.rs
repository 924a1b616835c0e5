use super::cast::TypedRow;
use crate::column::Column;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Decision returned by a start hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartAction {
    /// Run the SQL as resolved.
    Continue,
    /// Run this SQL instead.
    ModifySql(String),
    /// Do not run anything. No further notifications are emitted.
    Suppress,
}

/// Receiver of execution lifecycle notifications.
///
/// For a dispatched execution the order is: `each_row` for every row, then
/// `success` or `error`, then `finish`. All methods default to no-ops.
pub trait QueryEvents: Send + Sync {
    /// One materialized row. `is_last` is set on the final row.
    fn each_row(&self, _row: &TypedRow, _index: usize, _is_last: bool) {}

    fn success(&self, _rows: &[TypedRow], _columns: &[Column]) {}

    /// Diagnostic message of a failed execution.
    fn error(&self, _message: &str) {}

    /// Always the last notification of a dispatched execution.
    fn finish(&self) {}
}

/// Ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEvents;

impl QueryEvents for NoopEvents {}

/// Fans notifications out to several sinks, in insertion order.
#[derive(Clone, Default)]
pub struct CompositeEvents {
    sinks: Vec<Arc<dyn QueryEvents>>,
}

impl CompositeEvents {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add<E: QueryEvents + 'static>(mut self, sink: E) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }

    pub fn add_arc(mut self, sink: Arc<dyn QueryEvents>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl QueryEvents for CompositeEvents {
    fn each_row(&self, row: &TypedRow, index: usize, is_last: bool) {
        for sink in &self.sinks {
            sink.each_row(row, index, is_last);
        }
    }

    fn success(&self, rows: &[TypedRow], columns: &[Column]) {
        for sink in &self.sinks {
            sink.success(rows, columns);
        }
    }

    fn error(&self, message: &str) {
        for sink in &self.sinks {
            sink.error(message);
        }
    }

    fn finish(&self) {
        for sink in &self.sinks {
            sink.finish();
        }
    }
}

/// An owned notification, for delivery over a channel.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryEvent {
    Row {
        row: TypedRow,
        index: usize,
        is_last: bool,
    },
    Success {
        rows: Vec<TypedRow>,
        columns: Vec<Column>,
    },
    Error(String),
    Finish,
}

/// Sends every notification as a [`QueryEvent`]. A closed receiver drops
/// them silently.
impl QueryEvents for UnboundedSender<QueryEvent> {
    fn each_row(&self, row: &TypedRow, index: usize, is_last: bool) {
        let _ = self.send(QueryEvent::Row {
            row: row.clone(),
            index,
            is_last,
        });
    }

    fn success(&self, rows: &[TypedRow], columns: &[Column]) {
        let _ = self.send(QueryEvent::Success {
            rows: rows.to_vec(),
            columns: columns.to_vec(),
        });
    }

    fn error(&self, message: &str) {
        let _ = self.send(QueryEvent::Error(message.to_string()));
    }

    fn finish(&self) {
        let _ = self.send(QueryEvent::Finish);
    }
}

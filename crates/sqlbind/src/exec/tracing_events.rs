use super::cast::TypedRow;
use super::events::QueryEvents;
use crate::column::Column;
use tracing::Level;

/// A `tracing`-based sink that logs lifecycle notifications.
///
/// Row notifications are logged at `TRACE` regardless of `level`; errors are
/// always logged at `WARN` or above.
#[derive(Debug, Clone)]
pub struct TracingEvents {
    /// Tracing event level for success and finish.
    pub level: Level,
    /// Truncate long error messages (in bytes). `None` means no truncation.
    pub max_message_length: Option<usize>,
    /// Label attached to every event.
    pub tag: Option<String>,
}

impl Default for TracingEvents {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            max_message_length: Some(200),
            tag: None,
        }
    }
}

/// Dispatch a tracing event at a runtime-determined level.
macro_rules! emit_at_level {
    ($level:expr, $($field:tt)*) => {
        match $level {
            Level::ERROR => tracing::error!($($field)*),
            Level::WARN  => tracing::warn!($($field)*),
            Level::INFO  => tracing::info!($($field)*),
            Level::DEBUG => tracing::debug!($($field)*),
            Level::TRACE => tracing::trace!($($field)*),
        }
    };
}

impl TracingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn max_message_length(mut self, len: usize) -> Self {
        self.max_message_length = Some(len);
        self
    }

    pub fn no_truncate(mut self) -> Self {
        self.max_message_length = None;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    fn truncate(&self, message: &str) -> String {
        match self.max_message_length {
            Some(max) if message.len() > max => {
                format!("{}...", crate::truncate_sql_bytes(message, max))
            }
            _ => message.to_string(),
        }
    }

    fn error_level(&self) -> Level {
        if self.level == Level::ERROR {
            Level::ERROR
        } else {
            Level::WARN
        }
    }
}

impl QueryEvents for TracingEvents {
    fn each_row(&self, row: &TypedRow, index: usize, is_last: bool) {
        let tag = self.tag.as_deref().unwrap_or("-");
        tracing::trace!(
            target: "sqlbind.sql",
            tag,
            index,
            is_last,
            fields = row.len(),
            "row"
        );
    }

    fn success(&self, rows: &[TypedRow], columns: &[Column]) {
        let tag = self.tag.as_deref().unwrap_or("-");
        emit_at_level!(
            self.level,
            target: "sqlbind.sql",
            tag,
            rows = rows.len(),
            columns = columns.len(),
            "query succeeded"
        );
    }

    fn error(&self, message: &str) {
        let tag = self.tag.as_deref().unwrap_or("-");
        let message = self.truncate(message);
        emit_at_level!(
            self.error_level(),
            target: "sqlbind.sql",
            tag,
            error = %message,
            "query failed"
        );
    }

    fn finish(&self) {
        let tag = self.tag.as_deref().unwrap_or("-");
        emit_at_level!(self.level, target: "sqlbind.sql", tag, "query finished");
    }
}

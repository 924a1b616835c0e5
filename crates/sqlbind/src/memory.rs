//! In-memory [`Connection`] for tests and examples.
//!
//! Every statement is recorded and answered with the same scripted result
//! set. Failures can be injected at open time, at dispatch, or while fetching
//! a given row.

use crate::column::Column;
use crate::config::ConnectionOptions;
use crate::connection::{Connection, Quoting, ResultSet, RowCells};
use crate::error::{QueryError, QueryResult};
use std::sync::Mutex;

#[derive(Debug, Clone, Default)]
struct Script {
    columns: Vec<Column>,
    rows: Vec<Vec<Option<Vec<u8>>>>,
    fail_fetch: Option<(usize, String)>,
    fail_query: Option<String>,
    fail_open: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    options: ConnectionOptions,
    opened: bool,
    executed: Vec<String>,
}

/// A scripted connection that never touches the network.
#[derive(Debug)]
pub struct MemoryConnection {
    quoting: Quoting,
    version: String,
    script: Script,
    state: Mutex<State>,
}

impl Default for MemoryConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryConnection {
    /// A connection with MySQL quoting and an empty result set.
    pub fn new() -> Self {
        Self {
            quoting: Quoting::MYSQL,
            version: "5.7.0-memory".to_string(),
            script: Script::default(),
            state: Mutex::new(State::default()),
        }
    }

    pub fn with_quoting(mut self, quoting: Quoting) -> Self {
        self.quoting = quoting;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Column metadata of the scripted result set.
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.script.columns = columns;
        self
    }

    /// Append a row of raw cells; `None` is NULL.
    pub fn with_row<I, C>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = Option<C>>,
        C: AsRef<[u8]>,
    {
        self.script.rows.push(
            cells
                .into_iter()
                .map(|c| c.map(|c| c.as_ref().to_vec()))
                .collect(),
        );
        self
    }

    /// Fail when fetching the row at `index` (zero-based).
    pub fn fail_fetch_at(mut self, index: usize, message: impl Into<String>) -> Self {
        self.script.fail_fetch = Some((index, message.into()));
        self
    }

    /// Reject every statement at dispatch.
    pub fn fail_query(mut self, message: impl Into<String>) -> Self {
        self.script.fail_query = Some(message.into());
        self
    }

    /// Refuse to open.
    pub fn fail_open(mut self, message: impl Into<String>) -> Self {
        self.script.fail_open = Some(message.into());
        self
    }

    /// Statements received so far, in order.
    pub fn executed(&self) -> Vec<String> {
        self.state.lock().unwrap().executed.clone()
    }

    /// The most recent statement.
    pub fn last_sql(&self) -> Option<String> {
        self.state.lock().unwrap().executed.last().cloned()
    }
}

impl Connection for MemoryConnection {
    fn configure(&self, options: &ConnectionOptions) {
        let mut state = self.state.lock().unwrap();
        state.options = std::mem::take(&mut state.options).merge(options);
    }

    fn options(&self) -> ConnectionOptions {
        self.state.lock().unwrap().options.clone()
    }

    fn open(&self) -> QueryResult<()> {
        if let Some(message) = &self.script.fail_open {
            return Err(QueryError::connection(message.clone()));
        }
        self.state.lock().unwrap().opened = true;
        Ok(())
    }

    fn close(&self) {
        self.state.lock().unwrap().opened = false;
    }

    fn is_opened(&self) -> bool {
        self.state.lock().unwrap().opened
    }

    fn version(&self) -> String {
        self.version.clone()
    }

    fn escape(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        for c in value.chars() {
            match c {
                '\0' => out.push_str("\\0"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\x1a' => out.push_str("\\Z"),
                '\\' | '\'' | '"' => {
                    out.push('\\');
                    out.push(c);
                }
                _ => out.push(c),
            }
        }
        out
    }

    fn quoting(&self) -> Quoting {
        self.quoting
    }

    fn query(&self, sql: &str) -> QueryResult<Box<dyn ResultSet + '_>> {
        self.state.lock().unwrap().executed.push(sql.to_string());
        if let Some(message) = &self.script.fail_query {
            return Err(QueryError::execution(message.clone()));
        }
        Ok(Box::new(MemoryResultSet {
            script: &self.script,
            position: 0,
            buffer: Vec::new(),
        }))
    }
}

/// Cursor over the scripted rows.
///
/// Cells of the current row are packed into one reused buffer, the way a
/// driver hands out pointers into its fetch buffer.
struct MemoryResultSet<'a> {
    script: &'a Script,
    position: usize,
    buffer: Vec<u8>,
}

impl ResultSet for MemoryResultSet<'_> {
    fn column_count(&self) -> usize {
        self.script.columns.len()
    }

    fn column(&self, index: usize) -> Option<Column> {
        self.script.columns.get(index).cloned()
    }

    fn has_next(&self) -> bool {
        self.position < self.script.rows.len()
    }

    fn next(&mut self) -> QueryResult<RowCells<'_>> {
        let script = self.script;
        if let Some((at, message)) = &script.fail_fetch {
            if *at == self.position {
                return Err(QueryError::execution(message.clone()));
            }
        }
        let row = script
            .rows
            .get(self.position)
            .ok_or_else(|| QueryError::execution("No more rows"))?;
        self.position += 1;

        self.buffer.clear();
        let mut spans = Vec::with_capacity(row.len());
        for cell in row {
            spans.push(cell.as_ref().map(|bytes| {
                let start = self.buffer.len();
                self.buffer.extend_from_slice(bytes);
                (start, self.buffer.len())
            }));
        }
        let buffer = &self.buffer;
        Ok(spans
            .into_iter()
            .map(|span| span.map(|(start, end)| &buffer[start..end]))
            .collect())
    }
}

//! Copying rows out of the driver.

use crate::column::Column;
use crate::connection::Connection;
use crate::error::{QueryError, QueryResult};
use bytes::Bytes;

/// One row of raw cells owned by the pipeline. `None` is NULL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    cells: Vec<Option<Bytes>>,
}

impl RawRow {
    pub fn new(cells: Vec<Option<Bytes>>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Option<Bytes>] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&Bytes> {
        self.cells.get(index).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Everything a statement produced, copied out of the driver.
#[derive(Debug, Clone, Default)]
pub(crate) struct Fetched {
    pub columns: Vec<Column>,
    pub rows: Vec<RawRow>,
}

/// Run `sql` and copy every row before the cursor advances.
///
/// Any failure discards the rows copied so far.
pub(crate) fn fetch(conn: &dyn Connection, sql: &str) -> QueryResult<Fetched> {
    let mut cursor = conn.query(sql)?;

    let count = cursor.column_count();
    let columns = (0..count)
        .map(|i| {
            cursor
                .column(i)
                .ok_or_else(|| QueryError::execution(format!("Missing metadata for column {i}")))
        })
        .collect::<QueryResult<Vec<_>>>()?;

    let mut rows = Vec::new();
    while cursor.has_next() {
        let cells = cursor.next()?;
        if cells.len() != count {
            return Err(QueryError::execution(format!(
                "Row {} has {} cells, expected {count}",
                rows.len(),
                cells.len()
            )));
        }
        rows.push(RawRow::new(
            cells
                .into_iter()
                .map(|cell| cell.map(Bytes::copy_from_slice))
                .collect(),
        ));
    }

    Ok(Fetched { columns, rows })
}

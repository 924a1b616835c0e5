//! Convenient imports for typical `sqlbind` usage.
//!
//! ```ignore
//! use sqlbind::prelude::*;
//! ```

pub use crate::values;
pub use crate::{
    ConnectionOptions, Database, Execution, FieldSpec, InsertFields, Join, QueryBuilder,
    QueryError, QueryEvents, QueryOptions, QueryResult, StartAction, TableSpec, TracingEvents,
    TypedRow, TypedValue, Value, ValueExpr,
};

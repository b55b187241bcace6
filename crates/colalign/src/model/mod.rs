//! Typed tables and columns.

mod column;
mod ingest;
mod table;

pub use column::{Column, ColumnData, ColumnKind};
pub use ingest::{IngestConfig, KindPolicy, infer_kind, ingest};
pub use table::Table;

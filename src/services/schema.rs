//! Sheet layout detection
//!
//! A job declares its column width once; detection happens before any row
//! processing and is never re-evaluated per row. Unexpected widths fail
//! fast instead of guessing a best-effort mapping.

use tracing::debug;

use crate::error::WorkerError;
use crate::types::SchemaPattern;

/// Classify a column width into one of the known sheet layouts.
pub fn detect(column_count: usize) -> Result<SchemaPattern, WorkerError> {
    let pattern = match column_count {
        3 => SchemaPattern::ThreeColumn,
        4 => SchemaPattern::FourColumn,
        other => return Err(WorkerError::UnsupportedSchema(other)),
    };
    debug!("Detected {} sheet layout", pattern.type_name());
    Ok(pattern)
}

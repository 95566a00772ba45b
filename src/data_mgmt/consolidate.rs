//! Consolidation of heterogeneous reading records into one table
//!
//! Every vendor (and every device) may report a different set of fields. The
//! table is an outer join by column name: one row per record, one column per
//! distinct field key, with missing values left as `None`.
//!
//! Column order is the four identity columns followed by field keys in the
//! order they are first seen, scanning records in sequence and each record's
//! fields in insertion order.
use ahash::AHashSet;

use super::models::{ReadingRecord, RtValue};
use crate::readers::FetchError;

pub const COL_SOURCE: &str = "Source";
pub const COL_DEVICE_ID: &str = "Device_ID";
pub const COL_TIMESTAMP: &str = "Timestamp_UTC";
pub const COL_ERROR: &str = "Error";

pub const LEADING_COLUMNS: [&str; 4] = [COL_SOURCE, COL_DEVICE_ID, COL_TIMESTAMP, COL_ERROR];

/// `None` means the record did not report this column
pub type Cell = Option<RtValue>;

/// Ordered set of output column names
#[derive(Debug, Default)]
pub struct ColumnRegistry {
    columns: Vec<String>,
    seen: AHashSet<String>,
}

impl ColumnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_leading_columns() -> Self {
        let mut registry = Self::new();
        for col in LEADING_COLUMNS {
            registry.register(col);
        }
        registry
    }

    /// Returns false if the column was already registered
    pub fn register(&mut self, column: &str) -> bool {
        if self.seen.contains(column) {
            return false;
        }
        self.seen.insert(column.to_string());
        self.columns.push(column.to_string());
        true
    }

    pub fn contains(&self, column: &str) -> bool {
        self.seen.contains(column)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<String> {
        self.columns
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }
}

pub fn consolidate(records: &[ReadingRecord]) -> Table {
    let registry = build_registry(records);
    let columns = registry.into_columns();
    let rows = records.iter().map(|rec| materialize_row(rec, &columns)).collect();
    Table { columns, rows }
}

fn build_registry(records: &[ReadingRecord]) -> ColumnRegistry {
    let mut registry = ColumnRegistry::with_leading_columns();
    for rec in records {
        let Some(fields) = rec.fields() else {
            continue;
        };
        for key in fields.keys() {
            if LEADING_COLUMNS.contains(&key) {
                log::warn!(
                    "{} device {}: field '{}' clashes with an identity column and is skipped",
                    rec.source,
                    rec.device_id,
                    key
                );
                continue;
            }
            registry.register(key);
        }
    }
    registry
}

fn materialize_row(rec: &ReadingRecord, columns: &[String]) -> Vec<Cell> {
    let mut row = vec![
        Some(RtValue::String(rec.source.to_string())),
        Some(RtValue::String(rec.device_id.clone())),
        rec.timestamp_utc.clone().map(RtValue::String),
        row_error(rec).map(RtValue::String),
    ];
    let fields = rec.fields();
    row.extend(
        columns[LEADING_COLUMNS.len()..]
            .iter()
            .map(|col| fields.and_then(|f| f.get_field(col)).cloned()),
    );
    row
}

// A success whose only fields were identity clashes carries no data in the row
fn row_error(rec: &ReadingRecord) -> Option<String> {
    match rec.fields() {
        Some(fields) if !fields.keys().any(|key| !LEADING_COLUMNS.contains(&key)) => {
            Some(FetchError::NoData.to_string())
        }
        _ => rec.error(),
    }
}

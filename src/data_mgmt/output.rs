//! CSV output of a consolidated table
//!
//! Absent cells become empty CSV fields. This is the only place where absence
//! loses its distinct representation, so a reported `0` stays `0`.
use std::io;
use std::path::Path;

use thiserror::Error;

use super::consolidate::{Cell, Table};
use super::models::ReadingRecord;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn from_records(records: &[ReadingRecord]) -> Self {
        let successful = records.iter().filter(|r| r.is_success()).count();
        RunSummary {
            total: records.len(),
            successful,
            failed: records.len() - successful,
        }
    }
}

fn cell_to_string(cell: &Cell) -> String {
    cell.as_ref().map(ToString::to_string).unwrap_or_default()
}

pub fn write_csv<W: io::Write>(table: &Table, writer: W) -> Result<(), OutputError> {
    let mut wtr = csv::Writer::from_writer(writer);
    write_table(table, &mut wtr)
}

pub fn write_csv_file(table: &Table, path: &Path) -> Result<(), OutputError> {
    let mut wtr = csv::Writer::from_path(path)?;
    write_table(table, &mut wtr)
}

fn write_table<W: io::Write>(table: &Table, wtr: &mut csv::Writer<W>) -> Result<(), OutputError> {
    wtr.write_record(table.columns())?;
    for row in table.rows() {
        wtr.write_record(row.iter().map(cell_to_string))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data_mgmt::consolidate::consolidate;
    use crate::data_mgmt::models::{RtValue, Source};
    use crate::readers::FetchError;

    fn sample_records() -> Vec<ReadingRecord> {
        vec![
            ReadingRecord::from_fields(
                Source::Awair,
                "123",
                Some("2024-01-01T00:00:00Z".into()),
                [("CO2_ppm", RtValue::Int(450)), ("PM10_µg/m³", RtValue::Int(0))]
                    .into_iter()
                    .collect(),
            ),
            ReadingRecord::from_fields(
                Source::Kaiterra,
                "abc",
                None,
                [("PM2.5_µg/m³", RtValue::Float(12.3))].into_iter().collect(),
            ),
            ReadingRecord::failed(Source::Kaiterra, "def", FetchError::NoData),
        ]
    }

    #[test]
    fn test_write_csv() {
        let table = consolidate(&sample_records());
        let mut buf = Vec::new();
        write_csv(&table, &mut buf).unwrap();

        let csv = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            [
                "Source,Device_ID,Timestamp_UTC,Error,CO2_ppm,PM10_µg/m³,PM2.5_µg/m³",
                "Awair,123,2024-01-01T00:00:00Z,,450,0,",
                "Kaiterra,abc,,,,,12.3",
                "Kaiterra,def,,no data extracted,,,",
            ]
        );
    }

    #[test]
    fn test_write_csv_quotes_commas() {
        let records = vec![ReadingRecord::failed(
            Source::Awair,
            "1",
            FetchError::Parse("expected `,` or `}` at line 1".into()),
        )];
        let mut buf = Vec::new();
        write_csv(&consolidate(&records), &mut buf).unwrap();

        let csv = String::from_utf8(buf).unwrap();
        assert!(csv.contains(r#""parse error: expected `,` or `}` at line 1""#));
    }

    #[test]
    fn test_write_csv_file() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("out.csv");
        write_csv_file(&consolidate(&sample_records()), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 4);
    }

    #[test]
    fn test_run_summary() {
        assert_eq!(
            RunSummary::from_records(&sample_records()),
            RunSummary {
                total: 3,
                successful: 2,
                failed: 1
            }
        );
        assert_eq!(RunSummary::from_records(&[]), RunSummary::default());
    }
}

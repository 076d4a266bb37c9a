// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CSV export of applied task logs.

use serde::Serialize;

use crate::models::TaskLogRecord;

/// Download name offered for exports.
pub const EXPORT_FILE_NAME: &str = "time_logs.csv";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No matching records to export")]
    Empty,

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer flush failed: {0}")]
    Io(#[from] std::io::Error),
}

/// The five exported columns, in output order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow<'a> {
    #[serde(rename = "User Name")]
    pub user_name: &'a str,
    #[serde(rename = "Date")]
    pub date: &'a str,
    #[serde(rename = "Project Name")]
    pub project_name: &'a str,
    #[serde(rename = "Description")]
    pub description: &'a str,
    #[serde(rename = "Time")]
    pub time: &'a str,
}

impl<'a> From<&'a TaskLogRecord> for ExportRow<'a> {
    fn from(record: &'a TaskLogRecord) -> Self {
        Self {
            user_name: &record.user_name,
            date: &record.date,
            project_name: &record.task_title,
            description: &record.description,
            time: &record.time,
        }
    }
}

/// Project records to export rows, keeping their order.
pub fn project(records: &[TaskLogRecord]) -> Vec<ExportRow<'_>> {
    records.iter().map(ExportRow::from).collect()
}

/// Encode rows as CSV with a header line.
///
/// Fields containing commas, quotes or newlines are quoted. Zero rows is an
/// error: there is nothing to offer for download.
pub fn encode_csv(rows: &[ExportRow<'_>]) -> Result<Vec<u8>, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    for row in rows {
        writer.serialize(row)?;
    }

    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(user_name: &str, description: &str) -> TaskLogRecord {
        TaskLogRecord {
            id: String::new(),
            user_id: "u1".to_string(),
            user_name: user_name.to_string(),
            task_title: "Release".to_string(),
            description: description.to_string(),
            date: "2024-01-02".to_string(),
            time: "09:00 AM".to_string(),
        }
    }

    #[test]
    fn test_header_and_column_order() {
        let records = vec![record("Ada", "smoke test")];
        let csv = String::from_utf8(encode_csv(&project(&records)).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "User Name,Date,Project Name,Description,Time");
        assert_eq!(lines[1], "Ada,2024-01-02,Release,smoke test,09:00 AM");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_fields_with_commas_and_quotes_are_quoted() {
        let records = vec![
            record("Ada", "fix, then verify"),
            record("Grace \"Amazing\" Hopper", "plain"),
        ];
        let csv = String::from_utf8(encode_csv(&project(&records)).unwrap()).unwrap();

        assert!(csv.contains("\"fix, then verify\""));
        assert!(csv.contains("\"Grace \"\"Amazing\"\" Hopper\""));
        assert!(csv.contains(",plain,"));
    }

    #[test]
    fn test_embedded_newline_stays_in_one_record() {
        let records = vec![record("Ada", "line one\nline two")];
        let bytes = encode_csv(&project(&records)).unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][3], "line one\nline two");
    }

    #[test]
    fn test_empty_export_is_rejected() {
        assert!(matches!(encode_csv(&[]), Err(ExportError::Empty)));
    }
}

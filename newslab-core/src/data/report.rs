//! Load errors and per-file load reports.
//!
//! Two failure classes: a [`LoadError`] aborts the load of one file (missing
//! column, unreadable file); a [`RejectReason`] skips one row and is counted
//! in the file's [`LoadReport`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors for a single input file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {source_name}: {source}")]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    #[error("{source_name}: missing required column '{column}'")]
    MissingColumn { source_name: String, column: String },
}

/// Why a single row was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The CSV layer could not decode the record.
    MalformedRecord,
    /// The record has fewer fields than the header requires.
    MissingField,
    BadDate,
    BadTimestamp,
    BadNumber,
    NonPositivePrice,
    NegativeVolume,
    InconsistentOhlc,
    DuplicateDate,
    EmptyHeadline,
    HeadlineTooLong,
    EmptySymbol,
}

/// Row accounting for one loaded file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    pub source: String,
    pub rows_read: usize,
    pub rows_accepted: usize,
    pub rejected: BTreeMap<RejectReason, usize>,
}

impl LoadReport {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn reject(&mut self, reason: RejectReason) {
        *self.rejected.entry(reason).or_insert(0) += 1;
    }

    pub fn accept(&mut self) {
        self.rows_accepted += 1;
    }

    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }

    pub fn rejected_for(&self, reason: RejectReason) -> usize {
        self.rejected.get(&reason).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_by_reason() {
        let mut report = LoadReport::new("AAPL.csv");
        report.rows_read = 4;
        report.accept();
        report.accept();
        report.reject(RejectReason::BadDate);
        report.reject(RejectReason::BadDate);
        assert_eq!(report.rejected_total(), 2);
        assert_eq!(report.rejected_for(RejectReason::BadDate), 2);
        assert_eq!(report.rejected_for(RejectReason::NegativeVolume), 0);
    }

    #[test]
    fn report_serializes_reason_keys() {
        let mut report = LoadReport::new("news.csv");
        report.reject(RejectReason::BadTimestamp);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"bad_timestamp\":1"));
    }

    #[test]
    fn missing_column_message_names_column() {
        let err = LoadError::MissingColumn {
            source_name: "MSFT.csv".into(),
            column: "close".into(),
        };
        assert_eq!(err.to_string(), "MSFT.csv: missing required column 'close'");
    }
}

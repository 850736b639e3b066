//! Header resolution for CSV inputs.
//!
//! Column presence is a hard contract. Matching is case-insensitive and
//! ignores surrounding whitespace and a UTF-8 byte-order mark, so
//! `Date,Open,High,Low,Close,Adj Close,Volume` satisfies the price schema.

use super::report::LoadError;
use csv::StringRecord;

/// Positions of the required columns, in the order they were requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndex {
    positions: Vec<usize>,
}

impl ColumnIndex {
    pub fn resolve(
        headers: &StringRecord,
        required: &[&str],
        source_name: &str,
    ) -> Result<Self, LoadError> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
        let positions = required
            .iter()
            .map(|name| {
                normalized
                    .iter()
                    .position(|h| h == name)
                    .ok_or_else(|| LoadError::MissingColumn {
                        source_name: source_name.to_string(),
                        column: (*name).to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { positions })
    }

    /// Field `slot` (index into the `required` list) of `record`.
    pub fn field<'r>(&self, record: &'r StringRecord, slot: usize) -> Option<&'r str> {
        self.positions
            .get(slot)
            .and_then(|&pos| record.get(pos))
            .map(str::trim)
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_ascii_lowercase()
}

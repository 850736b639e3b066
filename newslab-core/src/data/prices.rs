//! Price loader: one OHLCV CSV per symbol into an ordered `PriceBar` sequence.
//!
//! Bad rows are skipped and counted; only an unreadable file or a missing
//! required column fails the load.

use super::columns::ColumnIndex;
use super::report::{LoadError, LoadReport, RejectReason};
use super::timestamp::parse_date;
use crate::domain::PriceBar;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Required price columns, in slot order.
pub const PRICE_COLUMNS: [&str; 6] = ["date", "open", "high", "low", "close", "volume"];

/// Bars accepted from one file plus the row accounting.
#[derive(Debug, Clone)]
pub struct PriceLoad {
    pub bars: Vec<PriceBar>,
    pub report: LoadReport,
}

impl PriceLoad {
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }
}

/// Load a symbol's price file from disk.
pub fn load_prices(path: &Path, symbol: &str) -> Result<PriceLoad, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_prices(file, symbol, &path.display().to_string())
}

/// Load prices from any reader. `source_name` labels errors and the report.
pub fn read_prices<R: Read>(
    reader: R,
    symbol: &str,
    source_name: &str,
) -> Result<PriceLoad, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|source| LoadError::Csv {
        source_name: source_name.to_string(),
        source,
    })?;
    let columns = ColumnIndex::resolve(headers, &PRICE_COLUMNS, source_name)?;

    let mut report = LoadReport::new(source_name);
    let mut bars = Vec::new();

    for record in rdr.records() {
        report.rows_read += 1;
        let record = match record {
            Ok(r) => r,
            Err(_) => {
                report.reject(RejectReason::MalformedRecord);
                continue;
            }
        };
        match parse_row(&columns, &record, symbol) {
            Ok(bar) => bars.push(bar),
            Err(reason) => report.reject(reason),
        }
    }

    // Stable sort keeps file order among equal dates, so the first occurrence wins.
    bars.sort_by_key(|b| b.date);
    let mut seen = HashSet::with_capacity(bars.len());
    bars.retain(|b| {
        let fresh = seen.insert(b.date);
        if !fresh {
            report.reject(RejectReason::DuplicateDate);
        }
        fresh
    });
    report.rows_accepted = bars.len();

    if report.rejected_total() > 0 {
        tracing::warn!(
            source = source_name,
            rejected = report.rejected_total(),
            accepted = report.rows_accepted,
            "skipped malformed price rows"
        );
    }
    tracing::debug!(source = source_name, bars = bars.len(), "loaded prices");

    Ok(PriceLoad { bars, report })
}

fn parse_row(
    columns: &ColumnIndex,
    record: &csv::StringRecord,
    symbol: &str,
) -> Result<PriceBar, RejectReason> {
    let field = |slot: usize| columns.field(record, slot).ok_or(RejectReason::MissingField);

    let date = parse_date(field(0)?).ok_or(RejectReason::BadDate)?;
    let open = parse_price(field(1)?)?;
    let high = parse_price(field(2)?)?;
    let low = parse_price(field(3)?)?;
    let close = parse_price(field(4)?)?;
    let volume = parse_volume(field(5)?)?;

    let bar = PriceBar {
        symbol: symbol.to_string(),
        date,
        open,
        high,
        low,
        close,
        volume,
    };
    if !bar.is_sane() {
        return Err(RejectReason::InconsistentOhlc);
    }
    Ok(bar)
}

fn parse_price(raw: &str) -> Result<f64, RejectReason> {
    let value: f64 = raw.parse().map_err(|_| RejectReason::BadNumber)?;
    if !value.is_finite() {
        return Err(RejectReason::BadNumber);
    }
    if value <= 0.0 {
        return Err(RejectReason::NonPositivePrice);
    }
    Ok(value)
}

fn parse_volume(raw: &str) -> Result<u64, RejectReason> {
    if let Ok(v) = raw.parse::<u64>() {
        return Ok(v);
    }
    // Some exports write volume as a float ("1234.0") or with a sign.
    let value: f64 = raw.parse().map_err(|_| RejectReason::BadNumber)?;
    if !value.is_finite() {
        return Err(RejectReason::BadNumber);
    }
    if value < 0.0 {
        return Err(RejectReason::NegativeVolume);
    }
    Ok(value.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Date,Open,High,Low,Close,Adj Close,Volume,Dividends,Stock Splits\n";

    fn load(body: &str) -> PriceLoad {
        let csv = format!("{HEADER}{body}");
        read_prices(csv.as_bytes(), "AAPL", "AAPL.csv").unwrap()
    }

    #[test]
    fn loads_and_sorts_ascending() {
        let loaded = load(
            "2024-01-04,182.15,183.09,180.88,181.91,181.91,71983600,0,0\n\
             2024-01-02,187.15,188.44,183.89,185.64,185.64,82488700,0,0\n\
             2024-01-03,184.22,185.88,183.43,184.25,184.25,58414500,0,0\n",
        );
        let dates: Vec<String> = loaded.bars.iter().map(|b| b.date.to_string()).collect();
        assert_eq!(dates, ["2024-01-02", "2024-01-03", "2024-01-04"]);
        assert_eq!(loaded.report.rows_read, 3);
        assert_eq!(loaded.report.rows_accepted, 3);
        assert_eq!(loaded.bars[0].symbol, "AAPL");
    }

    #[test]
    fn rejects_bad_rows_without_failing() {
        let loaded = load(
            "2024-01-02,187.15,188.44,183.89,185.64,185.64,82488700,0,0\n\
             2024-01-03,0,185.88,183.43,184.25,184.25,58414500,0,0\n\
             2024-01-04,182.15,183.09,180.88,181.91,181.91,-5,0,0\n\
             not-a-date,182.15,183.09,180.88,181.91,181.91,100,0,0\n\
             2024-01-05,abc,183.09,180.88,181.91,181.91,100,0,0\n\
             2024-01-08,182.15,181.00,180.88,181.91,181.91,100,0,0\n",
        );
        assert_eq!(loaded.bars.len(), 1);
        let r = &loaded.report;
        assert_eq!(r.rows_read, 6);
        assert_eq!(r.rows_accepted, 1);
        assert_eq!(r.rejected_for(RejectReason::NonPositivePrice), 1);
        assert_eq!(r.rejected_for(RejectReason::NegativeVolume), 1);
        assert_eq!(r.rejected_for(RejectReason::BadDate), 1);
        assert_eq!(r.rejected_for(RejectReason::BadNumber), 1);
        assert_eq!(r.rejected_for(RejectReason::InconsistentOhlc), 1);
    }

    #[test]
    fn duplicate_date_keeps_first_occurrence() {
        let loaded = load(
            "2024-01-02,187.15,188.44,183.89,185.64,185.64,100,0,0\n\
             2024-01-02,150.00,151.00,149.00,150.50,150.50,100,0,0\n",
        );
        assert_eq!(loaded.bars.len(), 1);
        assert_eq!(loaded.bars[0].close, 185.64);
        assert_eq!(loaded.report.rejected_for(RejectReason::DuplicateDate), 1);
        assert_eq!(loaded.report.rows_accepted, 1);
    }

    #[test]
    fn tolerates_calendar_gaps() {
        let loaded = load(
            "2024-01-02,10,11,9,10.5,10.5,100,0,0\n\
             2024-01-09,10,11,9,10.5,10.5,100,0,0\n",
        );
        assert_eq!(loaded.bars.len(), 2);
    }

    #[test]
    fn float_volume_is_accepted() {
        let loaded = load("2024-01-02,10,11,9,10.5,10.5,1234.0,0,0\n");
        assert_eq!(loaded.bars[0].volume, 1234);
    }

    #[test]
    fn short_row_is_missing_field() {
        let loaded = load("2024-01-02,10,11\n");
        assert!(loaded.bars.is_empty());
        assert_eq!(loaded.report.rejected_for(RejectReason::MissingField), 1);
    }

    #[test]
    fn missing_close_column_is_schema_error() {
        let csv = "date,open,high,low,volume\n2024-01-02,10,11,9,100\n";
        let err = read_prices(csv.as_bytes(), "AAPL", "AAPL.csv").unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_prices(Path::new("/definitely/not/here.csv"), "AAPL").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}

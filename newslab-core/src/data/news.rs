//! Streaming news loader.
//!
//! The corpus runs to ~1.4M rows, so it is never materialized: a
//! [`NewsSource`] hands out fresh lazy [`NewsReader`] iterators, and
//! [`Deduplicated`] filters repeats while streaming.

use super::columns::ColumnIndex;
use super::report::{LoadError, LoadReport, RejectReason};
use super::timestamp::parse_timestamp;
use crate::domain::{ArticleKey, NewsArticle, MAX_HEADLINE_CHARS};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Required news columns, in slot order.
pub const NEWS_COLUMNS: [&str; 5] = ["headline", "url", "publisher", "date", "stock"];

const HEADLINE: usize = 0;
const URL: usize = 1;
const PUBLISHER: usize = 2;
const DATE: usize = 3;
const STOCK: usize = 4;

/// A restartable news corpus on disk.
#[derive(Debug, Clone)]
pub struct NewsSource {
    path: PathBuf,
    symbols: Option<HashSet<String>>,
}

impl NewsSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            symbols: None,
        }
    }

    /// Only yield articles whose symbol is in `symbols`.
    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = Some(symbols.into_iter().map(Into::into).collect());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh pass over the corpus.
    pub fn open(&self) -> Result<NewsReader<File>, LoadError> {
        let file = File::open(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        let mut reader = NewsReader::from_reader(file, &self.path.display().to_string())?;
        reader.symbols = self.symbols.clone();
        Ok(reader)
    }
}

/// Lazy iterator of validated articles from one pass over a news CSV.
///
/// Malformed rows are skipped and counted in [`NewsReader::report`].
pub struct NewsReader<R: Read> {
    records: csv::StringRecordsIntoIter<R>,
    columns: ColumnIndex,
    symbols: Option<HashSet<String>>,
    report: LoadReport,
    filtered: usize,
}

impl<R: Read> NewsReader<R> {
    pub fn from_reader(reader: R, source_name: &str) -> Result<Self, LoadError> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = rdr.headers().map_err(|source| LoadError::Csv {
            source_name: source_name.to_string(),
            source,
        })?;
        let columns = ColumnIndex::resolve(headers, &NEWS_COLUMNS, source_name)?;
        Ok(Self {
            records: rdr.into_records(),
            columns,
            symbols: None,
            report: LoadReport::new(source_name),
            filtered: 0,
        })
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Well-formed rows skipped by the symbol filter (not counted as rejections).
    pub fn filtered_out(&self) -> usize {
        self.filtered
    }

    fn parse_record(&self, record: &csv::StringRecord) -> Result<NewsArticle, RejectReason> {
        let field = |slot: usize| {
            self.columns
                .field(record, slot)
                .ok_or(RejectReason::MissingField)
        };

        let headline = field(HEADLINE)?;
        if headline.is_empty() {
            return Err(RejectReason::EmptyHeadline);
        }
        if headline.chars().count() > MAX_HEADLINE_CHARS {
            return Err(RejectReason::HeadlineTooLong);
        }
        let symbol = field(STOCK)?;
        if symbol.is_empty() {
            return Err(RejectReason::EmptySymbol);
        }
        let published_at = parse_timestamp(field(DATE)?).ok_or(RejectReason::BadTimestamp)?;

        Ok(NewsArticle {
            headline: headline.to_string(),
            publisher: field(PUBLISHER)?.to_string(),
            published_at,
            symbol: symbol.to_string(),
            url: field(URL)?.to_string(),
        })
    }
}

impl<R: Read> Iterator for NewsReader<R> {
    type Item = NewsArticle;

    fn next(&mut self) -> Option<NewsArticle> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(err) if err.is_io_error() => {
                    // The underlying reader failed; the stream cannot continue.
                    tracing::error!(source = %self.report.source, error = %err, "news read aborted");
                    self.report.rows_read += 1;
                    self.report.reject(RejectReason::MalformedRecord);
                    return None;
                }
                Err(_) => {
                    self.report.rows_read += 1;
                    self.report.reject(RejectReason::MalformedRecord);
                    continue;
                }
            };
            self.report.rows_read += 1;

            match self.parse_record(&record) {
                Ok(article) => {
                    if let Some(symbols) = &self.symbols {
                        if !symbols.contains(&article.symbol) {
                            self.filtered += 1;
                            continue;
                        }
                    }
                    self.report.accept();
                    return Some(article);
                }
                Err(reason) => self.report.reject(reason),
            }
        }
    }
}

/// Drops articles whose (headline, publisher, timestamp, symbol) key was
/// already seen, keeping the first occurrence in stream order.
pub struct Deduplicated<I> {
    inner: I,
    seen: HashSet<ArticleKey>,
    duplicates: usize,
}

impl<I: Iterator<Item = NewsArticle>> Deduplicated<I> {
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            seen: HashSet::new(),
            duplicates: 0,
        }
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn unique(&self) -> usize {
        self.seen.len()
    }

    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: Iterator<Item = NewsArticle>> Iterator for Deduplicated<I> {
    type Item = NewsArticle;

    fn next(&mut self) -> Option<NewsArticle> {
        for article in self.inner.by_ref() {
            if self.seen.insert(article.key()) {
                return Some(article);
            }
            self.duplicates += 1;
        }
        None
    }
}

//! Input loading: per-symbol price CSVs and the streaming news corpus.

pub mod columns;
pub mod news;
pub mod prices;
pub mod report;
pub mod timestamp;

pub use columns::ColumnIndex;
pub use news::{Deduplicated, NewsReader, NewsSource};
pub use prices::{load_prices, read_prices, PriceLoad};
pub use report::{LoadError, LoadReport, RejectReason};
pub use timestamp::parse_timestamp;

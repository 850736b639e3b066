//! Serializable analysis configuration.
//!
//! Loaded from TOML; every section and field has a default, so an empty
//! file describes the standard six-symbol run.

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use newslab_core::analytics::AnalyticsConfig;
use newslab_core::correlation::CorrelationConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub const DEFAULT_SYMBOLS: [&str; 6] = ["AAPL", "AMZN", "GOOG", "META", "MSFT", "NVDA"];

/// Placeholder replaced by the ticker in `price_file_pattern`.
pub const SYMBOL_PLACEHOLDER: &str = "{symbol}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// News headline CSV.
    pub news: PathBuf,
    /// Directory holding one OHLCV CSV per symbol.
    pub price_dir: PathBuf,
    pub price_file_pattern: String,
    pub symbols: Vec<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            news: PathBuf::from("data/raw_analyst_ratings.csv"),
            price_dir: PathBuf::from("data/yfinance_data"),
            price_file_pattern: format!("{SYMBOL_PLACEHOLDER}_historical_data.csv"),
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DataConfig {
    pub fn price_path(&self, symbol: &str) -> PathBuf {
        self.price_dir
            .join(self.price_file_pattern.replace(SYMBOL_PLACEHOLDER, symbol))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub sma_window: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self { sma_window: 40 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    /// Optional `word<TAB>valence` file merged over the built-in lexicon.
    pub lexicon_overrides: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarKind {
    /// Rule-based NYSE holidays.
    #[default]
    Nyse,
    /// Trading days observed in the loaded price files.
    Sessions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub kind: CalendarKind,
    /// IANA zone of the exchange.
    pub timezone: String,
    /// Local close, `HH:MM`.
    pub market_close: String,
    /// Extra full-day closures (`YYYY-MM-DD`) on top of the calendar's own.
    pub closures: Vec<NaiveDate>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            kind: CalendarKind::Nyse,
            timezone: "America/New_York".into(),
            market_close: "16:00".into(),
            closures: Vec::new(),
        }
    }
}

impl CalendarConfig {
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::Invalid(format!("unknown timezone '{}'", self.timezone)))
    }

    pub fn close_time(&self) -> Result<NaiveTime, ConfigError> {
        NaiveTime::parse_from_str(&self.market_close, "%H:%M").map_err(|_| {
            ConfigError::Invalid(format!(
                "market_close must be HH:MM, got '{}'",
                self.market_close
            ))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("results"),
        }
    }
}

/// Complete configuration for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub data: DataConfig,
    pub indicators: IndicatorConfig,
    pub sentiment: SentimentConfig,
    pub calendar: CalendarConfig,
    pub correlation: CorrelationConfig,
    pub analytics: AnalyticsConfig,
    pub output: OutputConfig,
}

impl AnalysisConfig {
    /// Load and validate a config from a TOML file. Relative paths inside
    /// the file stay relative to the working directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.indicators.sma_window == 0 {
            return Err(ConfigError::Invalid("sma_window must be >= 1".into()));
        }
        if self.data.symbols.is_empty() {
            return Err(ConfigError::Invalid("symbols must not be empty".into()));
        }
        if let Some(bad) = self.data.symbols.iter().find(|s| s.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("blank symbol {bad:?}")));
        }
        if !self.data.price_file_pattern.contains(SYMBOL_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "price_file_pattern must contain {SYMBOL_PLACEHOLDER}"
            )));
        }
        if self.correlation.lags.is_empty() {
            return Err(ConfigError::Invalid("correlation lags must not be empty".into()));
        }
        self.calendar.tz()?;
        self.calendar.close_time()?;
        Ok(())
    }

    /// Deterministic identifier of the run settings (BLAKE3 of the JSON form).
    pub fn config_hash(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

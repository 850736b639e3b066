//! End-to-end pipeline: prices, news, sentiment, aggregation, correlation.
//!
//! The news corpus is streamed exactly once. Every article is normalized and
//! scored; corpus analytics see the whole stream, daily aggregation only the
//! configured symbols. Per-symbol work runs on the rayon pool.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use newslab_core::aggregate::{by_date, DailySentimentBuilder};
use newslab_core::analytics::{AnalyticsConfig, CorpusAccumulator, CorpusSummary};
use newslab_core::calendar::{NyseCalendar, SessionAttributor, SessionCalendar, TradingCalendar};
use newslab_core::correlation::{correlate_symbol, CorrelationConfig};
use newslab_core::data::{Deduplicated, LoadReport, NewsSource};
use newslab_core::domain::{
    CorrelationResult, Crossover, DailyReturn, DailySentimentAggregate, MovingAverageSeries,
    NormalizedArticle, PriceBar, SentimentScore,
};
use newslab_core::indicators::{daily_returns, detect_crossovers, Sma};
use newslab_core::sentiment::{Lexicon, SentimentScorer};
use newslab_core::text::Normalizer;

use crate::config::{AnalysisConfig, CalendarConfig, CalendarKind};
use crate::data_loader::{dataset_hash, load_universe, SymbolPrices};

pub const SCHEMA_VERSION: u32 = 1;

/// News-stream accounting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsStats {
    pub report: LoadReport,
    /// Rows dropped by a symbol filter on the source.
    pub filtered_out: usize,
    pub duplicates: usize,
    pub unique: usize,
    /// Scored articles for configured symbols whose session was unknown.
    pub unattributed: usize,
}

/// Everything computed for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolAnalysis {
    pub symbol: String,
    pub price_report: LoadReport,
    pub bar_count: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub moving_average: MovingAverageSeries,
    pub crossovers: Vec<Crossover>,
    pub returns: Vec<DailyReturn>,
    pub sentiment_days: usize,
    pub correlations: Vec<CorrelationResult>,
}

/// Output of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub schema_version: u32,
    pub generated_at: DateTime<Utc>,
    pub config_hash: String,
    pub dataset_hash: String,
    pub config: AnalysisConfig,
    pub symbols: Vec<SymbolAnalysis>,
    pub missing_symbols: Vec<String>,
    pub daily_sentiment: Vec<DailySentimentAggregate>,
    pub news: NewsStats,
    pub corpus: CorpusSummary,
}

impl PipelineResult {
    pub fn correlations(&self) -> impl Iterator<Item = &CorrelationResult> {
        self.symbols.iter().flat_map(|s| s.correlations.iter())
    }
}

/// Scorer from the built-in lexicon plus any configured overrides.
pub fn build_scorer(lexicon_overrides: Option<&Path>) -> Result<SentimentScorer> {
    let lexicon = match lexicon_overrides {
        Some(path) => Lexicon::with_overrides(path)
            .with_context(|| format!("failed to load lexicon overrides {}", path.display()))?,
        None => Lexicon::new(),
    };
    Ok(SentimentScorer::new(lexicon))
}

/// Trading calendar per config. `Sessions` uses the union of loaded dates.
/// Configured closures are removed from either calendar.
pub fn build_calendar(
    config: &CalendarConfig,
    prices: &[SymbolPrices],
) -> Box<dyn TradingCalendar> {
    let closures = &config.closures;
    match config.kind {
        CalendarKind::Nyse => {
            Box::new(NyseCalendar::new().with_closures(closures.iter().copied()))
        }
        CalendarKind::Sessions => Box::new(SessionCalendar::from_dates(
            prices
                .iter()
                .flat_map(|p| p.load.bars.iter().map(|b| b.date))
                .filter(|d| !closures.contains(d)),
        )),
    }
}

pub fn build_attributor<C: TradingCalendar>(
    calendar: C,
    config: &CalendarConfig,
) -> Result<SessionAttributor<C>> {
    Ok(SessionAttributor::new(calendar)
        .with_timezone(config.tz()?)
        .with_close(config.close_time()?))
}

/// Stream the news source once: dedup, normalize, score, and accumulate
/// corpus analytics. `sink` sees every unique article with its score.
pub fn stream_news<F>(
    source: &NewsSource,
    scorer: &SentimentScorer,
    analytics: &AnalyticsConfig,
    mut sink: F,
) -> Result<(CorpusSummary, NewsStats)>
where
    F: FnMut(&NormalizedArticle, &SentimentScore),
{
    let reader = source
        .open()
        .with_context(|| format!("failed to open news {}", source.path().display()))?;
    let normalizer = Normalizer::default();
    let mut corpus = CorpusAccumulator::new();
    let mut dedup = Deduplicated::new(reader);

    let mut next_id: u64 = 0;
    for article in dedup.by_ref() {
        let normalized = normalizer.normalize(article);
        let score = scorer.score(next_id, &normalized.article.headline);
        next_id += 1;
        corpus.add(&normalized, Some(&score));
        sink(&normalized, &score);
    }

    let duplicates = dedup.duplicates();
    let unique = dedup.unique();
    let reader = dedup.into_inner();
    let stats = NewsStats {
        report: reader.report().clone(),
        filtered_out: reader.filtered_out(),
        duplicates,
        unique,
        unattributed: 0,
    };
    tracing::info!(
        rows = stats.report.rows_read,
        rejected = stats.report.rejected_total(),
        duplicates,
        unique,
        "news stream processed"
    );
    Ok((corpus.finish(analytics), stats))
}

/// Indicators, returns, and lagged correlations for one symbol.
pub fn analyze_symbol(
    symbol: &str,
    bars: &[PriceBar],
    price_report: &LoadReport,
    daily: &[DailySentimentAggregate],
    sma_window: usize,
    correlation: &CorrelationConfig,
) -> SymbolAnalysis {
    let moving_average = Sma::new(sma_window).compute(bars);
    let crossovers = detect_crossovers(bars, &moving_average);
    let returns = daily_returns(bars);
    let sentiment = by_date(daily, symbol);
    let correlations = correlate_symbol(symbol, &returns, &sentiment, correlation);

    tracing::info!(
        symbol,
        bars = bars.len(),
        crossovers = crossovers.len(),
        sentiment_days = sentiment.len(),
        "symbol analyzed"
    );

    SymbolAnalysis {
        symbol: symbol.to_string(),
        price_report: price_report.clone(),
        bar_count: bars.len(),
        first_date: bars.first().map(|b| b.date),
        last_date: bars.last().map(|b| b.date),
        moving_average,
        crossovers,
        returns,
        sentiment_days: sentiment.len(),
        correlations,
    }
}

/// Run every stage for `config`.
pub fn run_pipeline(config: &AnalysisConfig) -> Result<PipelineResult> {
    config.validate().context("invalid configuration")?;

    let scorer = build_scorer(config.sentiment.lexicon_overrides.as_deref())?;

    let prices = load_universe(&config.data).context("failed to load price data")?;
    if prices.symbols.is_empty() {
        anyhow::bail!(
            "no price files found under {} for {:?}",
            config.data.price_dir.display(),
            config.data.symbols
        );
    }

    let calendar = build_calendar(&config.calendar, &prices.symbols);
    let attributor = build_attributor(calendar, &config.calendar)?;
    let mut builder = DailySentimentBuilder::new(attributor);

    let wanted: HashSet<&str> = prices.symbols.iter().map(|p| p.symbol.as_str()).collect();
    let source = NewsSource::new(&config.data.news);
    let (corpus, mut news) = stream_news(&source, &scorer, &config.analytics, |article, score| {
        let a = &article.article;
        if wanted.contains(a.symbol.as_str()) {
            builder.add(&a.symbol, a.published_at, score);
        }
    })?;
    news.unattributed = builder.unattributed();
    if news.unattributed > 0 {
        tracing::warn!(count = news.unattributed, "articles fell past the calendar horizon");
    }
    let daily_sentiment = builder.finish();

    let symbols: Vec<SymbolAnalysis> = prices
        .symbols
        .par_iter()
        .map(|p| {
            analyze_symbol(
                &p.symbol,
                &p.load.bars,
                &p.load.report,
                &daily_sentiment,
                config.indicators.sma_window,
                &config.correlation,
            )
        })
        .collect();

    let inputs = std::iter::once(config.data.news.as_path())
        .chain(prices.symbols.iter().map(|p| p.path.as_path()));
    let dataset_hash = dataset_hash(inputs).context("failed to hash input files")?;

    Ok(PipelineResult {
        schema_version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        config_hash: config.config_hash(),
        dataset_hash,
        config: config.clone(),
        symbols,
        missing_symbols: prices.missing,
        daily_sentiment,
        news,
        corpus,
    })
}

//! Reporting and export: CSV tables, a JSON manifest, and a Markdown report.
//!
//! Every table is rendered to a `String` first so it can be tested without
//! touching disk; [`write_outputs`] then drops the whole set into one
//! directory. The manifest carries a `schema_version`; newer versions are
//! rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use newslab_core::analytics::{CorpusSummary, OrganizationCount, PublisherCount, Trigram, WordCount};
use newslab_core::domain::{
    CategoryCounts, CorrelationOutcome, CorrelationResult, CrossDirection, Crossover, DailyReturn,
    DailySentimentAggregate, MovingAverageSeries, SentimentCategory, SentimentGroup,
};

use crate::pipeline::{PipelineResult, SCHEMA_VERSION};

pub const DAILY_SENTIMENT_CSV: &str = "daily_sentiment.csv";
pub const CORRELATIONS_CSV: &str = "correlations.csv";
pub const MOVING_AVERAGE_CSV: &str = "moving_average.csv";
pub const CROSSOVERS_CSV: &str = "crossovers.csv";
pub const RETURNS_CSV: &str = "returns.csv";
pub const WORD_FREQUENCIES_CSV: &str = "word_frequencies.csv";
pub const TRIGRAMS_CSV: &str = "trigrams.csv";
pub const PUBLISHERS_CSV: &str = "publishers.csv";
pub const ORGANIZATIONS_CSV: &str = "organizations.csv";
pub const CATEGORY_DISTRIBUTION_CSV: &str = "category_distribution.csv";
pub const MANIFEST_JSON: &str = "manifest.json";
pub const REPORT_MD: &str = "report.md";

fn opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(String::new, |v| format!("{v:.precision$}"))
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String> {
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── JSON manifest ──────────────────────────────────────────────────

pub fn export_json(result: &PipelineResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize PipelineResult to JSON")
}

/// Deserialize a manifest, rejecting schema versions newer than this build.
pub fn import_json(json: &str) -> Result<PipelineResult> {
    let result: PipelineResult =
        serde_json::from_str(json).context("failed to deserialize PipelineResult from JSON")?;
    if result.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            result.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(result)
}

pub fn load_manifest(dir: &Path) -> Result<PipelineResult> {
    let path = dir.join(MANIFEST_JSON);
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}

// ─── CSV tables ─────────────────────────────────────────────────────

/// Columns: symbol, date, mean_compound, article_count, then one count
/// column per category.
pub fn export_daily_sentiment_csv(aggregates: &[DailySentimentAggregate]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    let mut header = vec!["symbol", "date", "mean_compound", "article_count"];
    header.extend(SentimentCategory::ALL.iter().map(|c| c.as_str()));
    wtr.write_record(&header)?;

    for a in aggregates {
        let mut row = vec![
            a.symbol.clone(),
            a.date.to_string(),
            format!("{:.4}", a.mean_compound),
            a.article_count.to_string(),
        ];
        row.extend(a.categories.iter().map(|(_, n)| n.to_string()));
        wtr.write_record(&row)?;
    }
    finish(wtr)
}

/// Columns: symbol, lag, sample_size, status, coefficient, t_statistic,
/// p_value, confidence. Numeric cells are empty for insufficient samples.
pub fn export_correlations_csv<'a>(
    results: impl IntoIterator<Item = &'a CorrelationResult>,
) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "symbol",
        "lag",
        "sample_size",
        "status",
        "coefficient",
        "t_statistic",
        "p_value",
        "confidence",
    ])?;

    for r in results {
        let (status, coefficient, t, p, confidence) = match &r.outcome {
            CorrelationOutcome::Value {
                coefficient,
                significance,
            } => (
                "value",
                format!("{coefficient:.6}"),
                format!("{:.6}", significance.t_statistic),
                format!("{:.6}", significance.p_value),
                if r.is_low_confidence() {
                    "low_confidence"
                } else {
                    "sufficient"
                },
            ),
            CorrelationOutcome::InsufficientSample => (
                "insufficient_sample",
                String::new(),
                String::new(),
                String::new(),
                "",
            ),
        };
        wtr.write_record([
            r.symbol.as_str(),
            &r.lag.to_string(),
            &r.sample_size.to_string(),
            status,
            &coefficient,
            &t,
            &p,
            confidence,
        ])?;
    }
    finish(wtr)
}

/// Columns: symbol, date, window, sma. Warmup rows have an empty `sma`.
pub fn export_moving_average_csv<'a>(
    series: impl IntoIterator<Item = &'a MovingAverageSeries>,
) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["symbol", "date", "window", "sma"])?;
    for s in series {
        let window = s.window.to_string();
        for p in &s.points {
            wtr.write_record([
                s.symbol.as_str(),
                &p.date.to_string(),
                &window,
                &opt(p.value, 4),
            ])?;
        }
    }
    finish(wtr)
}

pub fn export_crossovers_csv<'a>(
    crossovers: impl IntoIterator<Item = (&'a str, &'a [Crossover])>,
) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["symbol", "bar_index", "date", "direction"])?;
    for (symbol, list) in crossovers {
        for c in list {
            let direction = match c.direction {
                CrossDirection::Above => "above",
                CrossDirection::Below => "below",
            };
            wtr.write_record([symbol, &c.index.to_string(), &c.date.to_string(), direction])?;
        }
    }
    finish(wtr)
}

/// Columns: symbol, date, pct_change. The first bar has an empty change.
pub fn export_returns_csv<'a>(
    returns: impl IntoIterator<Item = &'a DailyReturn>,
) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["symbol", "date", "pct_change"])?;
    for r in returns {
        wtr.write_record([r.symbol.as_str(), &r.date.to_string(), &opt(r.pct_change, 6)])?;
    }
    finish(wtr)
}

pub fn export_word_frequencies_csv(words: &[WordCount]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["word", "count"])?;
    for w in words {
        wtr.write_record([w.word.as_str(), &w.count.to_string()])?;
    }
    finish(wtr)
}

pub fn export_trigrams_csv(trigrams: &[Trigram]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["trigram", "count", "pmi"])?;
    for t in trigrams {
        wtr.write_record([t.words.join(" "), t.count.to_string(), format!("{:.4}", t.pmi)])?;
    }
    finish(wtr)
}

pub fn export_publishers_csv(publishers: &[PublisherCount]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["publisher", "articles"])?;
    for p in publishers {
        wtr.write_record([p.publisher.as_str(), &p.articles.to_string()])?;
    }
    finish(wtr)
}

pub fn export_organizations_csv(organizations: &[OrganizationCount]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["organization", "articles"])?;
    for o in organizations {
        wtr.write_record([o.organization.as_str(), &o.articles.to_string()])?;
    }
    finish(wtr)
}

/// Columns: category, group, articles, share.
pub fn export_category_distribution_csv(counts: &CategoryCounts) -> Result<String> {
    let total = counts.total();
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["category", "group", "articles", "share"])?;
    for (category, n) in counts.iter() {
        let share = if total == 0 {
            0.0
        } else {
            n as f64 / total as f64
        };
        wtr.write_record([
            category.as_str(),
            category.group().as_str(),
            &n.to_string(),
            &format!("{share:.4}"),
        ])?;
    }
    finish(wtr)
}

// ─── Markdown report ────────────────────────────────────────────────

pub fn generate_report(result: &PipelineResult) -> String {
    let mut md = String::with_capacity(4096);
    md.push_str("# News Sentiment Report\n\n");

    md.push_str("## Metadata\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Generated | {} |\n", result.generated_at.to_rfc3339()));
    md.push_str(&format!("| Config Hash | {} |\n", result.config_hash));
    md.push_str(&format!("| Dataset Hash | {} |\n", result.dataset_hash));
    md.push_str(&format!(
        "| SMA Window | {} |\n",
        result.config.indicators.sma_window
    ));
    md.push_str(&format!(
        "| Calendar | {:?} ({} close {}) |\n",
        result.config.calendar.kind,
        result.config.calendar.timezone,
        result.config.calendar.market_close
    ));
    md.push('\n');

    let n = &result.news;
    md.push_str("## News Corpus\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Rows Read | {} |\n", n.report.rows_read));
    md.push_str(&format!("| Rows Rejected | {} |\n", n.report.rejected_total()));
    md.push_str(&format!("| Duplicates | {} |\n", n.duplicates));
    md.push_str(&format!("| Unique Articles | {} |\n", n.unique));
    md.push_str(&format!("| Unattributed | {} |\n", n.unattributed));
    if let Some(len) = &result.corpus.length {
        md.push_str(&format!(
            "| Headline Length | mean {:.1}, median {:.0}, max {} |\n",
            len.mean, len.median, len.max
        ));
    }
    for group in [
        SentimentGroup::Positive,
        SentimentGroup::Neutral,
        SentimentGroup::Negative,
    ] {
        md.push_str(&format!(
            "| {} Headlines | {} |\n",
            capitalize(group.as_str()),
            result.corpus.group_count(group)
        ));
    }
    md.push('\n');
    if !n.report.rejected.is_empty() {
        md.push_str("Rejected rows by reason:\n\n");
        for (reason, count) in &n.report.rejected {
            md.push_str(&format!("- {reason:?}: {count}\n"));
        }
        md.push('\n');
    }

    md.push_str("## Symbols\n\n");
    md.push_str("| Symbol | Bars | Rejected | Period | Sentiment Days | Crossovers |\n");
    md.push_str("| --- | --- | --- | --- | --- | --- |\n");
    for s in &result.symbols {
        let period = match (s.first_date, s.last_date) {
            (Some(a), Some(b)) => format!("{a} to {b}"),
            _ => "-".to_string(),
        };
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            s.symbol,
            s.bar_count,
            s.price_report.rejected_total(),
            period,
            s.sentiment_days,
            s.crossovers.len()
        ));
    }
    md.push('\n');
    if !result.missing_symbols.is_empty() {
        md.push_str(&format!(
            "Missing price files: {}\n\n",
            result.missing_symbols.join(", ")
        ));
    }

    md.push_str("## Sentiment vs Returns\n\n");
    md.push_str("| Symbol | Lag | n | r | p | Note |\n");
    md.push_str("| --- | --- | --- | --- | --- | --- |\n");
    for r in result.correlations() {
        let (coef, p, note) = match &r.outcome {
            CorrelationOutcome::Value {
                coefficient,
                significance,
            } => (
                format!("{coefficient:.3}"),
                format!("{:.4}", significance.p_value),
                if r.is_low_confidence() { "low confidence" } else { "" },
            ),
            CorrelationOutcome::InsufficientSample => {
                ("-".to_string(), "-".to_string(), "insufficient sample")
            }
        };
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            r.symbol, r.lag, r.sample_size, coef, p, note
        ));
    }
    md.push('\n');

    md.push_str(&top_words_section(&result.corpus));

    md.push_str("## Publication Hours (UTC)\n\n");
    md.push_str("| Hour | Articles |\n");
    md.push_str("| --- | --- |\n");
    for (hour, count) in result.corpus.hourly_counts.iter().enumerate() {
        if *count > 0 {
            md.push_str(&format!("| {hour:02} | {count} |\n"));
        }
    }
    md.push('\n');

    md
}

fn top_words_section(corpus: &CorpusSummary) -> String {
    let mut md = String::new();
    if corpus.top_words.is_empty() && corpus.top_publishers.is_empty() {
        return md;
    }
    md.push_str("## Corpus Highlights\n\n");
    if !corpus.top_words.is_empty() {
        let words: Vec<String> = corpus
            .top_words
            .iter()
            .take(10)
            .map(|w| format!("{} ({})", w.word, w.count))
            .collect();
        md.push_str(&format!("- Top words: {}\n", words.join(", ")));
    }
    if !corpus.trigrams.is_empty() {
        let trigrams: Vec<String> = corpus
            .trigrams
            .iter()
            .take(5)
            .map(|t| t.words.join(" "))
            .collect();
        md.push_str(&format!("- Top trigrams: {}\n", trigrams.join("; ")));
    }
    if !corpus.top_publishers.is_empty() {
        let pubs: Vec<String> = corpus
            .top_publishers
            .iter()
            .take(5)
            .map(|p| format!("{} ({})", p.publisher, p.articles))
            .collect();
        md.push_str(&format!("- Top publishers: {}\n", pubs.join(", ")));
    }
    md.push('\n');
    md
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Write every output table, the manifest, and the report into `dir`.
/// Returns the paths written, in a fixed order.
pub fn write_outputs(result: &PipelineResult, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output dir: {}", dir.display()))?;

    let mut files: Vec<(&str, String)> = vec![
        (
            DAILY_SENTIMENT_CSV,
            export_daily_sentiment_csv(&result.daily_sentiment)?,
        ),
        (CORRELATIONS_CSV, export_correlations_csv(result.correlations())?),
        (
            MOVING_AVERAGE_CSV,
            export_moving_average_csv(result.symbols.iter().map(|s| &s.moving_average))?,
        ),
        (
            CROSSOVERS_CSV,
            export_crossovers_csv(
                result
                    .symbols
                    .iter()
                    .map(|s| (s.symbol.as_str(), s.crossovers.as_slice())),
            )?,
        ),
        (
            RETURNS_CSV,
            export_returns_csv(result.symbols.iter().flat_map(|s| s.returns.iter()))?,
        ),
        (
            WORD_FREQUENCIES_CSV,
            export_word_frequencies_csv(&result.corpus.top_words)?,
        ),
        (TRIGRAMS_CSV, export_trigrams_csv(&result.corpus.trigrams)?),
        (
            PUBLISHERS_CSV,
            export_publishers_csv(&result.corpus.top_publishers)?,
        ),
        (
            ORGANIZATIONS_CSV,
            export_organizations_csv(&result.corpus.organizations)?,
        ),
        (
            CATEGORY_DISTRIBUTION_CSV,
            export_category_distribution_csv(&result.corpus.categories)?,
        ),
        (MANIFEST_JSON, export_json(result)?),
    ];
    files.push((REPORT_MD, generate_report(result)));

    let mut written = Vec::with_capacity(files.len());
    for (name, content) in files {
        let path = dir.join(name);
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }
    tracing::info!(dir = %dir.display(), files = written.len(), "outputs written");
    Ok(written)
}

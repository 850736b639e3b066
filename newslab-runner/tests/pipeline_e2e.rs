//! End-to-end: config file → pipeline → output directory.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use newslab_runner::export::{
    CORRELATIONS_CSV, DAILY_SENTIMENT_CSV, MANIFEST_JSON, REPORT_MD, TRIGRAMS_CSV,
};
use newslab_runner::{load_manifest, run_pipeline, write_outputs, AnalysisConfig, CalendarKind};

// June 2024 NYSE sessions (no holidays in this span).
const SESSIONS: [u32; 10] = [3, 4, 5, 6, 7, 10, 11, 12, 13, 14];

const HEADLINES: [&str; 10] = [
    "Apple shares rally on strong demand",
    "Apple stock plunges after weak guidance",
    "Apple to hold annual meeting",
    "Apple soars to record high",
    "Apple faces lawsuit over App Store",
    "Apple gains after analyst upgrade",
    "Apple slumps as iPhone sales fall",
    "Apple beats estimates",
    "Apple misses revenue target",
    "Apple surges on growth outlook",
];

fn write_prices(dir: &Path, symbol: &str, base: f64) {
    let mut csv = String::from("Date,Open,High,Low,Close,Adj Close,Volume\n");
    let closes = [0.0, 1.5, -0.5, 2.0, 1.0, -1.5, 0.5, 2.5, -1.0, 3.0];
    for (day, delta) in SESSIONS.iter().zip(closes) {
        let close = base + delta;
        csv.push_str(&format!(
            "2024-06-{day:02},{o:.2},{h:.2},{l:.2},{close:.2},{close:.2},1000000\n",
            o = close - 0.2,
            h = close + 1.0,
            l = close - 1.0,
        ));
    }
    fs::write(dir.join(format!("{symbol}_historical_data.csv")), csv).unwrap();
}

fn write_news(path: &Path) {
    let mut csv = String::from(",headline,url,publisher,date,stock\n");
    let mut row = 0;
    for (day, headline) in SESSIONS.iter().zip(HEADLINES) {
        csv.push_str(&format!(
            "{row},{headline},https://example.com/{row},Benzinga Newsdesk,2024-06-{day:02} 10:00:00-04:00,AAPL\n"
        ));
        row += 1;
    }
    // After the close on Friday: lands on Monday 2024-06-10.
    csv.push_str(&format!(
        "{row},Apple extends rally in late trading,https://example.com/{row},tips@benzinga.com,2024-06-07 17:00:00-04:00,AAPL\n"
    ));
    row += 1;
    // Exact duplicate of the first row.
    csv.push_str(&format!(
        "{row},{},https://example.com/0,Benzinga Newsdesk,2024-06-03 10:00:00-04:00,AAPL\n",
        HEADLINES[0]
    ));
    row += 1;
    // Symbol outside the configured universe: corpus only.
    csv.push_str(&format!(
        "{row},Tesla stock plunges,https://example.com/{row},news@reuters.com,2024-06-04 09:00:00-04:00,TSLA\n"
    ));
    row += 1;
    // Unparseable timestamp.
    csv.push_str(&format!(
        "{row},Apple gains,https://example.com/{row},Benzinga Newsdesk,yesterday,AAPL\n"
    ));
    fs::write(path, csv).unwrap();
}

fn setup(dir: &Path, calendar: &str) -> AnalysisConfig {
    let prices = dir.join("prices");
    fs::create_dir_all(&prices).unwrap();
    write_prices(&prices, "AAPL", 190.0);
    write_prices(&prices, "MSFT", 420.0);
    write_news(&dir.join("news.csv"));

    let toml = format!(
        r#"
[data]
news = '{news}'
price_dir = '{prices}'
symbols = ["AAPL", "MSFT", "GOOG"]

[indicators]
sma_window = 3

[calendar]
kind = "{calendar}"

[analytics]
trigram_min_freq = 1
top_trigrams = 5

[output]
dir = '{out}'
"#,
        news = dir.join("news.csv").display(),
        prices = prices.display(),
        out = dir.join("results").display(),
    );
    let config_path = dir.join("newslab.toml");
    fs::write(&config_path, toml).unwrap();
    AnalysisConfig::from_file(&config_path).unwrap()
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

#[test]
fn full_run_produces_every_table() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path(), "nyse");
    assert_eq!(config.calendar.kind, CalendarKind::Nyse);

    let result = run_pipeline(&config).unwrap();

    // Universe: GOOG has no file.
    let symbols: Vec<_> = result.symbols.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["AAPL", "MSFT"]);
    assert_eq!(result.missing_symbols, vec!["GOOG"]);

    // News accounting.
    assert_eq!(result.news.report.rows_read, 14);
    assert_eq!(result.news.report.rejected_total(), 1);
    assert_eq!(result.news.duplicates, 1);
    assert_eq!(result.news.unique, 12);
    assert_eq!(result.news.unattributed, 0);
    assert_eq!(result.corpus.articles, 12);

    // Aggregation covers configured symbols only.
    assert!(result.daily_sentiment.iter().all(|a| a.symbol == "AAPL"));
    assert_eq!(result.daily_sentiment.len(), 10);
    let monday = result
        .daily_sentiment
        .iter()
        .find(|a| a.date == date(10))
        .unwrap();
    assert_eq!(monday.article_count, 2);

    // Correlations: one row per lag per loaded symbol.
    let aapl = &result.symbols[0];
    assert_eq!(aapl.bar_count, 10);
    assert_eq!(aapl.correlations.len(), 7);
    let lag0 = aapl.correlations.iter().find(|c| c.lag == 0).unwrap();
    assert_eq!(lag0.sample_size, 9);
    assert!(lag0.coefficient().is_some());
    assert!(lag0.is_low_confidence());

    let msft = &result.symbols[1];
    assert_eq!(msft.sentiment_days, 0);
    assert!(msft.correlations.iter().all(|c| c.coefficient().is_none()));

    assert_eq!(result.dataset_hash.len(), 64);
    assert_eq!(result.config_hash, config.config_hash());

    let written = write_outputs(&result, &config.output.dir).unwrap();
    assert_eq!(written.len(), 12);
    for path in &written {
        assert!(path.is_file(), "{} missing", path.display());
    }

    let correlations = fs::read_to_string(config.output.dir.join(CORRELATIONS_CSV)).unwrap();
    assert_eq!(correlations.lines().count(), 1 + 14);
    let daily = fs::read_to_string(config.output.dir.join(DAILY_SENTIMENT_CSV)).unwrap();
    assert!(daily.contains("AAPL,2024-06-10,"));
    let trigrams = fs::read_to_string(config.output.dir.join(TRIGRAMS_CSV)).unwrap();
    assert!(trigrams.lines().count() > 1);
    let report = fs::read_to_string(config.output.dir.join(REPORT_MD)).unwrap();
    assert!(report.contains("## Sentiment vs Returns"));

    let manifest = load_manifest(&config.output.dir).unwrap();
    assert_eq!(manifest.dataset_hash, result.dataset_hash);
    assert!(config.output.dir.join(MANIFEST_JSON).is_file());
}

#[test]
fn sessions_calendar_matches_nyse_on_clean_data() {
    let dir = tempfile::tempdir().unwrap();
    let nyse = run_pipeline(&setup(dir.path(), "nyse")).unwrap();
    let sessions = run_pipeline(&setup(dir.path(), "sessions")).unwrap();

    let dates = |r: &newslab_runner::PipelineResult| {
        r.daily_sentiment
            .iter()
            .map(|a| (a.date, a.article_count))
            .collect::<Vec<_>>()
    };
    assert_eq!(dates(&nyse), dates(&sessions));
    assert_ne!(nyse.config_hash, sessions.config_hash);
    assert_eq!(nyse.dataset_hash, sessions.dataset_hash);
}

#[test]
fn dataset_hash_changes_with_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path(), "nyse");
    let before = run_pipeline(&config).unwrap().dataset_hash;
    write_prices(&dir.path().join("prices"), "MSFT", 421.0);
    let after = run_pipeline(&config).unwrap().dataset_hash;
    assert_ne!(before, after);
}

#[test]
fn no_price_files_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path(), "nyse");
    let mut only_missing = config.clone();
    only_missing.data.symbols = vec!["GOOG".into()];
    let err = run_pipeline(&only_missing).unwrap_err();
    assert!(err.to_string().contains("no price files"));
}

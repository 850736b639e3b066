//! NewsLab CLI — pipeline runs, headline scoring, corpus and calendar inspection.
//!
//! Commands:
//! - `run`: execute the full pipeline from a TOML config and write outputs
//! - `score`: print compound score and category for each headline
//! - `corpus`: corpus analytics over a news CSV, printed as tables
//! - `calendar`: trading-day status, next session, and a year's holidays

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use newslab_core::analytics::AnalyticsConfig;
use newslab_core::calendar::{NyseCalendar, TradingCalendar};
use newslab_core::data::NewsSource;
use newslab_core::domain::SentimentCategory;
use newslab_runner::{build_scorer, run_pipeline, stream_news, write_outputs, AnalysisConfig};

const DEFAULT_LOG_FILTER: &str = "newslab=info";

#[derive(Parser)]
#[command(
    name = "newslab",
    about = "NewsLab CLI — financial news sentiment vs. stock returns"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline from a TOML config file.
    Run {
        /// Path to a TOML config file. Omit to use the built-in defaults.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the output directory from the config.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Score one or more headlines.
    Score {
        #[arg(required = true)]
        headlines: Vec<String>,

        /// Tab-separated `word<TAB>valence` overrides.
        #[arg(long)]
        lexicon: Option<PathBuf>,
    },
    /// Corpus analytics over a news CSV.
    Corpus {
        /// News headline CSV.
        #[arg(long)]
        news: PathBuf,

        /// Restrict to these symbols.
        #[arg(long, num_args = 1..)]
        symbols: Vec<String>,

        /// Rows per table.
        #[arg(long, default_value_t = 20)]
        top: usize,

        /// Minimum trigram frequency.
        #[arg(long, default_value_t = 20)]
        min_freq: u64,
    },
    /// Trading-day status of a date (YYYY-MM-DD) on the NYSE calendar.
    Calendar {
        date: String,

        /// Also list that year's holidays.
        #[arg(long, default_value_t = false)]
        holidays: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output_dir } => run_cmd(config, output_dir),
        Commands::Score { headlines, lexicon } => score_cmd(&headlines, lexicon),
        Commands::Corpus {
            news,
            symbols,
            top,
            min_freq,
        } => corpus_cmd(news, symbols, top, min_freq),
        Commands::Calendar { date, holidays } => calendar_cmd(&date, holidays),
    }
}

fn run_cmd(config_path: Option<PathBuf>, output_dir: Option<PathBuf>) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(dir) = output_dir {
        config.output.dir = dir;
    }
    tracing::info!(
        config = %config_path.as_deref().map_or_else(|| "<defaults>".to_string(), |p| p.display().to_string()),
        symbols = config.data.symbols.len(),
        "starting run"
    );

    let result = run_pipeline(&config)?;

    println!(
        "News: {} rows, {} rejected, {} duplicates, {} unique",
        result.news.report.rows_read,
        result.news.report.rejected_total(),
        result.news.duplicates,
        result.news.unique
    );
    println!();
    println!(
        "{:<8} {:>4} {:>6} {:>10} {:>10}  Note",
        "Symbol", "Lag", "n", "r", "p"
    );
    for r in result.correlations() {
        match r.significance() {
            Some(sig) => println!(
                "{:<8} {:>4} {:>6} {:>10.4} {:>10.4}  {}",
                r.symbol,
                r.lag,
                r.sample_size,
                r.coefficient().unwrap_or(f64::NAN),
                sig.p_value,
                if r.is_low_confidence() { "low confidence" } else { "" }
            ),
            None => println!(
                "{:<8} {:>4} {:>6} {:>10} {:>10}  insufficient sample",
                r.symbol, r.lag, r.sample_size, "-", "-"
            ),
        }
    }
    if !result.missing_symbols.is_empty() {
        println!();
        println!("Missing price files: {}", result.missing_symbols.join(", "));
    }

    let written = write_outputs(&result, &config.output.dir)?;
    println!();
    println!(
        "Wrote {} files to {}",
        written.len(),
        config.output.dir.display()
    );
    Ok(())
}

fn score_cmd(headlines: &[String], lexicon: Option<PathBuf>) -> Result<()> {
    let scorer = build_scorer(lexicon.as_deref())?;
    for headline in headlines {
        let compound = scorer.compound(headline);
        let category = SentimentCategory::from_compound(compound);
        println!("{compound:>8.4}  {:<14} {headline}", category.as_str());
    }
    Ok(())
}

fn corpus_cmd(news: PathBuf, symbols: Vec<String>, top: usize, min_freq: u64) -> Result<()> {
    let mut source = NewsSource::new(news);
    if !symbols.is_empty() {
        source = source.with_symbols(symbols);
    }
    let analytics = AnalyticsConfig {
        top_words: top,
        top_publishers: top,
        trigram_min_freq: min_freq,
        top_trigrams: top,
    };
    let scorer = build_scorer(None)?;
    let (summary, stats) = stream_news(&source, &scorer, &analytics, |_, _| {})?;

    println!(
        "Articles: {} unique ({} rows, {} rejected, {} duplicates)",
        summary.articles,
        stats.report.rows_read,
        stats.report.rejected_total(),
        stats.duplicates
    );
    if let Some(len) = &summary.length {
        println!(
            "Headline length: mean {:.1}, std {:.1}, min {}, p25 {:.0}, median {:.0}, p75 {:.0}, max {}",
            len.mean, len.std, len.min, len.p25, len.median, len.p75, len.max
        );
    }

    println!();
    println!("{:<14} {:>10}", "Category", "Articles");
    for (category, n) in summary.categories.iter() {
        println!("{:<14} {:>10}", category.as_str(), n);
    }

    println!();
    println!("{:<24} {:>10}", "Word", "Count");
    for w in &summary.top_words {
        println!("{:<24} {:>10}", w.word, w.count);
    }

    println!();
    println!("{:<40} {:>8} {:>8}", "Trigram", "Count", "PMI");
    for t in &summary.trigrams {
        println!("{:<40} {:>8} {:>8.3}", t.words.join(" "), t.count, t.pmi);
    }

    println!();
    println!("{:<40} {:>10}", "Publisher", "Articles");
    for p in &summary.top_publishers {
        println!("{:<40} {:>10}", p.publisher, p.articles);
    }

    if !summary.organizations.is_empty() {
        println!();
        println!("{:<40} {:>10}", "Organization", "Articles");
        for o in summary.organizations.iter().take(top) {
            println!("{:<40} {:>10}", o.organization, o.articles);
        }
    }

    println!();
    println!("{:<6} {:>10}", "Hour", "Articles");
    for (hour, n) in summary.hourly_counts.iter().enumerate() {
        println!("{hour:02}:00  {n:>10}");
    }
    Ok(())
}

fn calendar_cmd(date: &str, holidays: bool) -> Result<()> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{date}', expected YYYY-MM-DD"))?;
    let calendar = NyseCalendar::new();

    let status = if calendar.is_trading_day(date) {
        "trading day"
    } else if calendar.is_holiday(date) {
        "holiday"
    } else {
        "weekend"
    };
    println!("{date} ({}): {status}", date.weekday());
    match calendar.next_trading_day(date) {
        Some(next) => println!("Next trading day: {next} ({})", next.weekday()),
        None => println!("Next trading day: unknown"),
    }

    if holidays {
        println!();
        println!("NYSE holidays {}:", date.year());
        for day in NyseCalendar::holidays(date.year()) {
            println!("  {day} ({})", day.weekday());
        }
    }
    Ok(())
}

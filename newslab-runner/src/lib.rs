//! NewsLab Runner — pipeline orchestration, configuration, and export.
//!
//! This crate builds on `newslab-core` to provide:
//! - TOML configuration with per-section defaults and validation
//! - Parallel price loading and BLAKE3 dataset fingerprinting
//! - The end-to-end pipeline from raw CSVs to correlation tables
//! - CSV, JSON manifest, and Markdown report export

pub mod config;
pub mod data_loader;
pub mod export;
pub mod pipeline;

pub use config::{
    AnalysisConfig, CalendarConfig, CalendarKind, ConfigError, DataConfig, IndicatorConfig,
    OutputConfig, SentimentConfig,
};
pub use data_loader::{dataset_hash, load_universe, LoadedPrices, SymbolPrices};
pub use export::{generate_report, load_manifest, write_outputs};
pub use pipeline::{
    analyze_symbol, build_attributor, build_calendar, build_scorer, run_pipeline, stream_news,
    NewsStats, PipelineResult, SymbolAnalysis, SCHEMA_VERSION,
};

//! Price-file resolution, parallel loading, and dataset fingerprinting.
//!
//! Each configured symbol maps to one CSV via `price_file_pattern`. Symbols
//! load independently on the rayon pool. A missing file is not fatal: the
//! symbol is skipped with a warning and listed in `missing`. A file that
//! exists but violates the schema is an error.

use crate::config::DataConfig;
use newslab_core::data::{load_prices, LoadError, PriceLoad};
use rayon::prelude::*;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Prices for one symbol plus where they came from.
#[derive(Debug, Clone)]
pub struct SymbolPrices {
    pub symbol: String,
    pub path: PathBuf,
    pub load: PriceLoad,
}

#[derive(Debug)]
pub struct LoadedPrices {
    /// In configured symbol order.
    pub symbols: Vec<SymbolPrices>,
    /// Symbols with no price file.
    pub missing: Vec<String>,
}

/// Load every configured symbol's prices in parallel.
pub fn load_universe(data: &DataConfig) -> Result<LoadedPrices, LoadError> {
    let outcomes: Vec<(String, PathBuf, Option<Result<PriceLoad, LoadError>>)> = data
        .symbols
        .par_iter()
        .map(|symbol| {
            let path = data.price_path(symbol);
            if !path.exists() {
                return (symbol.clone(), path, None);
            }
            let loaded = load_prices(&path, symbol);
            (symbol.clone(), path, Some(loaded))
        })
        .collect();

    let mut symbols = Vec::with_capacity(outcomes.len());
    let mut missing = Vec::new();
    for (symbol, path, outcome) in outcomes {
        match outcome {
            None => {
                tracing::warn!(%symbol, path = %path.display(), "price file not found, skipping symbol");
                missing.push(symbol);
            }
            Some(result) => {
                let load = result?;
                tracing::info!(
                    %symbol,
                    bars = load.bars.len(),
                    rejected = load.report.rejected_total(),
                    "loaded prices"
                );
                symbols.push(SymbolPrices { symbol, path, load });
            }
        }
    }
    Ok(LoadedPrices { symbols, missing })
}

/// BLAKE3 over the bytes of every input file, in the given order. Each
/// file's contribution is prefixed by its length so boundaries are fixed.
pub fn dataset_hash<'a>(paths: impl IntoIterator<Item = &'a Path>) -> io::Result<String> {
    let mut hasher = blake3::Hasher::new();
    for path in paths {
        let len = std::fs::metadata(path)?.len();
        hasher.update(&len.to_le_bytes());
        let mut file = File::open(path)?;
        io::copy(&mut file, &mut hasher)?;
    }
    Ok(hasher.finalize().to_hex().to_string())
}

//! Command-line surface: argument validation and the symbol/year query.

use crate::error::ProfitError;
use crate::feed::PriceFeed;
use crate::models::ProfitResult;
use crate::scanner::try_compute_max_profit;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

#[derive(Debug, Parser)]
#[command(
    name = "stock-profit",
    about = "Best single buy/sell of a stock within a calendar year",
    version
)]
pub struct Cli {
    /// Stock symbol, resolved to <SYMBOL>.csv
    #[arg(value_parser = validate_symbol)]
    pub symbol: String,

    /// Calendar year to scan (1900-2100)
    #[arg(value_parser = validate_year, allow_negative_numbers = true)]
    pub year: i32,

    /// Read <SYMBOL>.csv from this directory instead of the configured feed
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub fn validate_symbol(s: &str) -> Result<String, ProfitError> {
    let symbol = s.trim();
    if symbol.is_empty() {
        return Err(ProfitError::InvalidArguments(
            "stock name cannot be empty".into(),
        ));
    }
    if symbol.contains(['/', '\\']) || symbol.contains("..") {
        return Err(ProfitError::InvalidArguments(format!(
            "stock name {:?} must not contain path components",
            symbol
        )));
    }
    Ok(symbol.to_string())
}

pub fn validate_year(s: &str) -> Result<i32, ProfitError> {
    let year: i32 = s
        .trim()
        .parse()
        .map_err(|_| ProfitError::InvalidArguments(format!("invalid year {:?}", s)))?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(ProfitError::InvalidArguments(format!(
            "year must be between {} and {}, got {}",
            MIN_YEAR, MAX_YEAR, year
        )));
    }
    Ok(year)
}

/// Fetch `symbol` from `feed` and scan `year`.
///
/// A year with no rows is reported as a zero-profit result with no buy or
/// sell fields; every other failure is returned.
pub async fn query(
    feed: &dyn PriceFeed,
    symbol: &str,
    year: i32,
) -> Result<ProfitResult, ProfitError> {
    let records = feed.fetch_daily_prices(symbol).await?;
    let source = records.source().to_string();
    debug!("Scanning {} for {}", source, year);

    match try_compute_max_profit(records, year) {
        Ok(result) => {
            if !result.is_profitable() {
                info!("No profit for {} in {}", symbol, year);
            }
            Ok(result)
        }
        Err(ProfitError::NoDataForYear(y)) => {
            info!("{} has no rows for {}, reporting zero profit", source, y);
            Ok(ProfitResult::default())
        }
        Err(e) => Err(e),
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Daily price record ────────────────────────────────────────────────────────

/// One trading day, as delivered by a price feed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PriceRecord {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
        }
    }
}

// ── Scan result ───────────────────────────────────────────────────────────────

/// Outcome of a (symbol, year) query.
///
/// When `profit > 0` every buy/sell field is set, the sell date follows the
/// buy date and `profit == sell_price - buy_price`. When `profit == 0` the
/// sell fields are absent and the buy fields name the lowest low of the year.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfitResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buy_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buy_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sell_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sell_price: Option<f64>,
    pub profit: f64,
}

impl ProfitResult {
    pub fn is_profitable(&self) -> bool {
        self.profit > 0.0
    }
}

// ── Raw CSV row ───────────────────────────────────────────────────────────────

/// Price CSV: Date, Open, High, Low, Close
#[derive(Debug, Clone, Default)]
pub struct RawPriceRow {
    pub date: Option<String>,
    pub open: Option<String>,
    pub high: Option<String>,
    pub low: Option<String>,
    pub close: Option<String>,
}

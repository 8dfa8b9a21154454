use crate::error::ProfitError;
use crate::models::{PriceRecord, RawPriceRow};
use chrono::NaiveDate;

// ── Parsers ───────────────────────────────────────────────────────────────────

/// Parse a price field. Only plain, finite, non-negative numbers are accepted.
/// "101.25" → 101.25 | "  99 " → 99.0 | "n/a", "-3", "NaN" → MalformedRecord
pub fn parse_price(s: &str, field: &str, line: u64) -> Result<f64, ProfitError> {
    let s = s.trim();
    let value: f64 = s
        .parse()
        .map_err(|_| ProfitError::malformed(line, format!("{} is not a number: {:?}", field, s)))?;

    if !value.is_finite() || value < 0.0 {
        return Err(ProfitError::malformed(
            line,
            format!("{} must be a finite non-negative price: {:?}", field, s),
        ));
    }
    Ok(value)
}

/// Parse an ISO calendar date ("2023-01-31").
pub fn parse_date(s: &str, line: u64) -> Result<NaiveDate, ProfitError> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| ProfitError::malformed(line, format!("bad date {:?}: {}", s, e)))
}

pub fn normalise_symbol(s: &str) -> String {
    s.trim().to_uppercase()
}

// ── CSV row → PriceRecord ─────────────────────────────────────────────────────

pub fn raw_row_to_record(row: &RawPriceRow, line: u64) -> Result<PriceRecord, ProfitError> {
    fn field<'a>(value: &'a Option<String>, name: &str, line: u64) -> Result<&'a str, ProfitError> {
        value
            .as_deref()
            .ok_or_else(|| ProfitError::malformed(line, format!("missing {} column", name)))
    }

    let date = parse_date(field(&row.date, "Date", line)?, line)?;

    Ok(PriceRecord::new(
        date,
        parse_price(field(&row.open, "Open", line)?, "Open", line)?,
        parse_price(field(&row.high, "High", line)?, "High", line)?,
        parse_price(field(&row.low, "Low", line)?, "Low", line)?,
        parse_price(field(&row.close, "Close", line)?, "Close", line)?,
    ))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

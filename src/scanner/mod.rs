//! Single-pass maximum profit scan over a daily price series.
//!
//! For each in-year record, in input order:
//!   1. sell check: `high - candidate_low`, kept only on strict improvement
//!   2. candidate update: a strictly lower `low` becomes the new buy candidate
//!
//! The sell check always runs against the candidate from *earlier* days, so a
//! day never buys and sells against itself. Strict comparisons make the
//! earliest qualifying sell day (and buy day) win ties.

use crate::error::ProfitError;
use crate::models::{PriceRecord, ProfitResult};
use chrono::{Datelike, NaiveDate};

/// Best transaction for `year` over already-parsed records.
///
/// Records from other years are skipped. Fails with
/// [`ProfitError::NoDataForYear`] when nothing falls in `year`.
pub fn compute_max_profit<'a, I>(records: I, year: i32) -> Result<ProfitResult, ProfitError>
where
    I: IntoIterator<Item = &'a PriceRecord>,
{
    try_compute_max_profit(records.into_iter().copied().map(Ok), year)
}

/// Same scan over a fallible feed. The first `Err` aborts the scan and is
/// returned as-is; no partial result is produced.
pub fn try_compute_max_profit<I>(records: I, year: i32) -> Result<ProfitResult, ProfitError>
where
    I: IntoIterator<Item = Result<PriceRecord, ProfitError>>,
{
    let mut state: Option<ScanState> = None;

    for record in records {
        let record = record?;
        if record.date.year() != year {
            continue;
        }
        match state.as_mut() {
            Some(s) => s.observe(&record),
            None => state = Some(ScanState::seed(&record)),
        }
    }

    state
        .map(ScanState::finish)
        .ok_or(ProfitError::NoDataForYear(year))
}

#[derive(Debug, Clone, Copy)]
struct Trade {
    buy_date: NaiveDate,
    buy_price: f64,
    sell_date: NaiveDate,
    sell_price: f64,
    profit: f64,
}

#[derive(Debug)]
struct ScanState {
    candidate_date: NaiveDate,
    candidate_price: f64,
    best: Option<Trade>,
}

impl ScanState {
    fn seed(first: &PriceRecord) -> Self {
        Self {
            candidate_date: first.date,
            candidate_price: first.low,
            best: None,
        }
    }

    fn best_profit(&self) -> f64 {
        self.best.map_or(0.0, |t| t.profit)
    }

    fn observe(&mut self, record: &PriceRecord) {
        let profit = record.high - self.candidate_price;
        if profit > self.best_profit() {
            self.best = Some(Trade {
                buy_date: self.candidate_date,
                buy_price: self.candidate_price,
                sell_date: record.date,
                sell_price: record.high,
                profit,
            });
        }

        if record.low < self.candidate_price {
            self.candidate_price = record.low;
            self.candidate_date = record.date;
        }
    }

    fn finish(self) -> ProfitResult {
        match self.best {
            Some(t) => ProfitResult {
                buy_date: Some(t.buy_date),
                buy_price: Some(t.buy_price),
                sell_date: Some(t.sell_date),
                sell_price: Some(t.sell_price),
                profit: t.profit,
            },
            // No profitable pair: report the year's lowest low for diagnostics.
            None => ProfitResult {
                buy_date: Some(self.candidate_date),
                buy_price: Some(self.candidate_price),
                sell_date: None,
                sell_price: None,
                profit: 0.0,
            },
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::prelude::*;
    use rand::rngs::StdRng;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn rec(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> PriceRecord {
        PriceRecord::new(date, open, high, low, close)
    }

    /// Only high/low matter to the scan.
    fn hl(date: NaiveDate, high: f64, low: f64) -> PriceRecord {
        rec(date, low, high, low, low)
    }

    #[test]
    fn test_rising_series() {
        let rows = vec![
            rec(d(2023, 1, 1), 100.0, 105.0, 99.0, 102.0),
            rec(d(2023, 1, 2), 102.0, 110.0, 101.0, 108.0),
            rec(d(2023, 1, 3), 108.0, 115.0, 107.0, 111.0),
        ];
        let r = compute_max_profit(&rows, 2023).unwrap();

        assert_eq!(r.buy_date, Some(d(2023, 1, 1)));
        assert_eq!(r.buy_price, Some(99.0));
        assert_eq!(r.sell_date, Some(d(2023, 1, 3)));
        assert_eq!(r.sell_price, Some(115.0));
        assert!((r.profit - 16.0).abs() < 1e-4);
    }

    #[test]
    fn test_falling_or_flat_series_has_no_profit() {
        let rows = vec![
            hl(d(2023, 1, 1), 100.0, 99.0),
            hl(d(2023, 1, 2), 99.0, 99.0),
            hl(d(2023, 1, 3), 97.0, 96.0),
        ];
        let r = compute_max_profit(&rows, 2023).unwrap();

        assert_eq!(r.profit, 0.0);
        assert!(!r.is_profitable());
        assert_eq!(r.buy_price, Some(96.0));
        assert_eq!(r.buy_date, Some(d(2023, 1, 3)));
        assert_eq!(r.sell_date, None);
        assert_eq!(r.sell_price, None);
    }

    #[test]
    fn test_single_day_cannot_buy_and_sell() {
        let rows = vec![hl(d(2023, 1, 1), 105.0, 99.0)];
        let r = compute_max_profit(&rows, 2023).unwrap();

        assert_eq!(r.profit, 0.0);
        assert_eq!(r.buy_date, Some(d(2023, 1, 1)));
        assert_eq!(r.buy_price, Some(99.0));
        assert_eq!(r.sell_date, None);
        assert_eq!(r.sell_price, None);
    }

    #[test]
    fn test_candidate_moves_to_later_lower_low() {
        let rows = vec![
            hl(d(2023, 1, 1), 100.0, 99.0),
            hl(d(2023, 1, 2), 110.0, 101.0),
            hl(d(2023, 1, 3), 115.0, 90.0),
            hl(d(2023, 1, 4), 120.0, 100.0),
        ];
        let r = compute_max_profit(&rows, 2023).unwrap();

        assert_eq!(r.buy_date, Some(d(2023, 1, 3)));
        assert_eq!(r.buy_price, Some(90.0));
        assert_eq!(r.sell_date, Some(d(2023, 1, 4)));
        assert_eq!(r.sell_price, Some(120.0));
        assert_eq!(r.profit, 30.0);
    }

    #[test]
    fn test_sell_check_uses_prior_candidate() {
        // Day 2 both sells against day 1 and seeds a lower candidate.
        let rows = vec![
            hl(d(2023, 1, 1), 12.0, 10.0),
            hl(d(2023, 1, 2), 30.0, 1.0),
            hl(d(2023, 1, 3), 5.0, 4.0),
        ];
        let r = compute_max_profit(&rows, 2023).unwrap();

        assert_eq!(r.buy_date, Some(d(2023, 1, 1)));
        assert_eq!(r.sell_date, Some(d(2023, 1, 2)));
        assert_eq!(r.profit, 20.0);
    }

    #[test]
    fn test_equal_profit_keeps_earliest_sell() {
        let rows = vec![
            hl(d(2023, 1, 1), 10.0, 10.0),
            hl(d(2023, 1, 2), 20.0, 15.0),
            hl(d(2023, 1, 3), 20.0, 15.0),
        ];
        let r = compute_max_profit(&rows, 2023).unwrap();
        assert_eq!(r.sell_date, Some(d(2023, 1, 2)));
    }

    #[test]
    fn test_equal_low_keeps_earliest_buy() {
        let rows = vec![
            hl(d(2023, 1, 1), 10.0, 10.0),
            hl(d(2023, 1, 2), 12.0, 10.0),
            hl(d(2023, 1, 3), 20.0, 11.0),
        ];
        let r = compute_max_profit(&rows, 2023).unwrap();
        assert_eq!(r.buy_date, Some(d(2023, 1, 1)));
        assert_eq!(r.sell_date, Some(d(2023, 1, 3)));
        assert_eq!(r.profit, 10.0);
    }

    #[test]
    fn test_other_years_are_ignored() {
        let rows = vec![
            hl(d(2022, 12, 30), 500.0, 1.0),
            hl(d(2023, 1, 2), 110.0, 100.0),
            hl(d(2023, 6, 1), 130.0, 105.0),
            hl(d(2024, 1, 2), 900.0, 0.5),
        ];
        let r = compute_max_profit(&rows, 2023).unwrap();

        assert_eq!(r.buy_date, Some(d(2023, 1, 2)));
        assert_eq!(r.buy_price, Some(100.0));
        assert_eq!(r.sell_price, Some(130.0));
        assert_eq!(r.profit, 30.0);
    }

    #[test]
    fn test_no_data_for_year() {
        let rows = vec![hl(d(2022, 5, 1), 10.0, 9.0)];
        assert!(matches!(
            compute_max_profit(&rows, 2023),
            Err(ProfitError::NoDataForYear(2023))
        ));
        assert!(matches!(
            compute_max_profit(&Vec::<PriceRecord>::new(), 2023),
            Err(ProfitError::NoDataForYear(2023))
        ));
    }

    #[test]
    fn test_malformed_record_aborts_scan() {
        let feed = vec![
            Ok(hl(d(2023, 1, 1), 10.0, 5.0)),
            Ok(hl(d(2023, 1, 2), 50.0, 6.0)),
            Err(ProfitError::malformed(4, "High is not a number: \"x\"")),
            Ok(hl(d(2023, 1, 4), 90.0, 6.0)),
        ];
        let err = try_compute_max_profit(feed, 2023).unwrap_err();
        assert!(matches!(err, ProfitError::MalformedRecord { line: 4, .. }));
    }

    fn brute_force(rows: &[PriceRecord]) -> f64 {
        let mut best = 0.0_f64;
        for i in 0..rows.len() {
            for j in (i + 1)..rows.len() {
                let p = rows[j].high - rows[i].low;
                if p > best {
                    best = p;
                }
            }
        }
        best
    }

    #[test]
    fn test_matches_brute_force_on_random_series() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..500 {
            let len = rng.random_range(2..40usize);
            let start = d(2021, 1, 1);
            let rows: Vec<PriceRecord> = (0..len)
                .map(|i| {
                    let low: f64 = rng.random_range(1.0..200.0);
                    let high = low + rng.random_range(0.0..20.0);
                    hl(start + chrono::Days::new(i as u64), high, low)
                })
                .collect();

            let r = compute_max_profit(&rows, 2021).unwrap();
            assert_eq!(r.profit, brute_force(&rows));

            if r.is_profitable() {
                let (buy, sell) = (r.buy_date.unwrap(), r.sell_date.unwrap());
                assert!(sell > buy);
                assert_eq!(r.profit, r.sell_price.unwrap() - r.buy_price.unwrap());
            } else {
                let min_low = rows.iter().map(|x| x.low).fold(f64::INFINITY, f64::min);
                assert_eq!(r.buy_price, Some(min_low));
                assert!(r.sell_date.is_none());
            }
        }
    }
}

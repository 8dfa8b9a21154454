//! CSV reader for daily price series (`Date,Open,High,Low,Close`).
//!
//! Parsing is lazy: [`PriceRecords`] yields one record per row so a scan can
//! stop at the first malformed row without materialising the rest. Read
//! errors (I/O, invalid UTF-8) are logged and end the series early.

pub mod cleaner;

use crate::error::ProfitError;
use crate::models::{PriceRecord, RawPriceRow};
use chrono::NaiveDate;
use csv::StringRecord;
use std::io::Read;
use std::iter::FusedIterator;
use tracing::{debug, warn};

use self::cleaner::{normalise_symbol, raw_row_to_record};

/// Resource name a symbol resolves to: "msft" → "MSFT.csv".
pub fn resource_name(symbol: &str) -> String {
    format!("{}.csv", normalise_symbol(symbol))
}

/// Lazily parsed price records from a CSV source.
pub struct PriceRecords<R> {
    reader: csv::Reader<R>,
    source: String,
    pending: Option<StringRecord>,
    last_date: Option<NaiveDate>,
    yielded: usize,
    done: bool,
}

impl<R: Read> PriceRecords<R> {
    /// Reads the header and peeks the first data row.
    ///
    /// Fails with [`ProfitError::EmptySource`] when either is missing and
    /// [`ProfitError::UnreadableHeader`] when the header cannot be decoded.
    pub fn new(rdr: R, source: impl Into<String>) -> Result<Self, ProfitError> {
        let source = source.into();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(rdr);

        let has_header = match reader.headers() {
            Ok(h) => !h.is_empty(),
            Err(e) => {
                return Err(ProfitError::UnreadableHeader {
                    name: source,
                    reason: e.to_string(),
                });
            }
        };

        let mut first = StringRecord::new();
        let has_row = has_header
            && match reader.read_record(&mut first) {
                Ok(found) => found,
                Err(e) => {
                    warn!("{}: unreadable first row: {}", source, e);
                    false
                }
            };

        if !has_row {
            return Err(ProfitError::EmptySource(source));
        }

        debug!("{}: header ok, reading rows", source);

        Ok(Self {
            reader,
            source,
            pending: Some(first),
            last_date: None,
            yielded: 0,
            done: false,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of records yielded so far.
    pub fn yielded(&self) -> usize {
        self.yielded
    }

    fn next_row(&mut self) -> Option<StringRecord> {
        if let Some(row) = self.pending.take() {
            return Some(row);
        }

        let mut row = StringRecord::new();
        match self.reader.read_record(&mut row) {
            Ok(true) => Some(row),
            Ok(false) => None,
            Err(e) => {
                // Lenient: keep what was read, callers see a short series.
                warn!(
                    "{}: read error after {} records, treating as end of data: {}",
                    self.source, self.yielded, e
                );
                None
            }
        }
    }
}

impl<R: Read> Iterator for PriceRecords<R> {
    type Item = Result<PriceRecord, ProfitError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let Some(row) = self.next_row() else {
            self.done = true;
            debug!("{}: {} records read", self.source, self.yielded);
            return None;
        };

        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let raw = RawPriceRow {
            date: row.get(0).map(|s| s.to_string()),
            open: row.get(1).map(|s| s.to_string()),
            high: row.get(2).map(|s| s.to_string()),
            low: row.get(3).map(|s| s.to_string()),
            close: row.get(4).map(|s| s.to_string()),
        };

        match raw_row_to_record(&raw, line) {
            Ok(record) => {
                if let Some(prev) = self.last_date {
                    if record.date < prev {
                        warn!(
                            "{}: line {} date {} precedes {}, input is not chronological",
                            self.source, line, record.date, prev
                        );
                    }
                }
                self.last_date = Some(record.date);
                self.yielded += 1;
                Some(Ok(record))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> FusedIterator for PriceRecords<R> {}

// ── Tests ─────────────────────────────────────────────────────────────────────

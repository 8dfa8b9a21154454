//! Failure signals raised while resolving, reading and scanning a price series.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfitError {
    /// Bad command-line input, detected before any I/O.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The `<SYMBOL>.csv` resource does not exist.
    #[error("price source not found: {0}")]
    RecordSourceNotFound(String),

    /// No header, or a header with no rows after it.
    #[error("price source {0} is empty or missing header")]
    EmptySource(String),

    /// The header row exists but cannot be decoded.
    #[error("failed to read header of {name}: {reason}")]
    UnreadableHeader { name: String, reason: String },

    #[error("no price data for year {0}")]
    NoDataForYear(i32),

    /// A row whose date or price fields cannot be parsed. Aborts the scan.
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to fetch {name}: {source}")]
    Http {
        name: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to fetch {name}: HTTP {status}")]
    HttpStatus { name: String, status: u16 },

    #[error("failed to open {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl ProfitError {
    pub fn malformed(line: u64, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

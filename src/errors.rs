use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while reading statements or normalizing their records
#[derive(Error, Debug)]
pub enum StatementError {
    /// Generic failure while parsing statement content (detail in the message)
    #[error("Parse failed: {0}")]
    ParseFailed(String),

    /// The statement format is not supported by the library
    #[error("Unsupported file format")]
    UnsupportedFormat,

    /// Reading the statement from disk failed
    #[error("Failed to read file content: {0}")]
    ReadContentFailed(#[from] std::io::Error),

    /// The builder was called without content or a file path
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    // ── Date resolution ───────────────────────────────────────────────────────

    /// The value is not a `(YY)?MMDD` digit string; the raw input is kept
    #[error("Invalid date digits: {0:?}")]
    DateInvalidFormat(String),

    /// The digits parse but no calendar date can be built from them
    #[error("Date {year:04}-{month:02}-{day:02} does not exist")]
    DateOutOfRange { year: i32, month: u32, day: u32 },

    /// None of the date fallbacks produced a usable date for a record
    #[error("No usable date for record (date {date:?}, entry date {entry_date:?})")]
    UnresolvableDate {
        date: String,
        entry_date: Option<String>,
    },

    // ── Amounts ───────────────────────────────────────────────────────────────

    /// Credit/debit marker that is neither credit nor debit
    #[error("Invalid transaction sign: {0}")]
    InvalidSign(String),

    /// The amount does not fit into signed milliunits
    #[error("Amount {0} cannot be represented in milliunits")]
    AmountOutOfRange(Decimal),
}

pub type StatementResult<T> = Result<T, StatementError>;

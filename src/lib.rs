//! Normalize bank statement transactions (FinTS/MT940) into canonical,
//! deduplicatable ledger transactions.
//!
//! ```rust,ignore
//! use fints_normalizer::{Normalizer, ParserBuilder};
//!
//! let records = ParserBuilder::new()
//!     .content(&statement)
//!     .parse()?;
//!
//! let normalizer = Normalizer::new(today);
//! let transactions = normalizer.normalize_batch(&records, &"checking".into());
//! ```

mod builder;
mod normalizer;
mod types;

pub mod dates;
pub mod errors;
pub mod parsers;

pub use builder::{FileFormat, ParsedRecord, ParserBuilder};
pub use dates::{DateDigits, DateResolver};
pub use errors::{StatementError, StatementResult};
pub use normalizer::{
    IMPORT_ID_LEN, Normalizer, NormalizerBuilder, NormalizerConfig, amount_milliunits, import_id,
    payee_name,
};
pub use parsers::prelude::*;
pub use types::{AccountRef, CanonicalTransaction, RawTransactionRecord, Sign};

//! Date disambiguation for bank-supplied `(YY)?MMDD` digit strings.
//!
//! Banks send value dates as `YYMMDD` and entry dates as `MMDD` without a
//! year, and some of them emit days that do not exist (Feb 30). The
//! [`DateResolver`] turns those strings into valid [`chrono::NaiveDate`]s
//! relative to an injected "today".

mod digits;
mod reconciler;
mod resolver;

pub use digits::DateDigits;
pub use resolver::DateResolver;

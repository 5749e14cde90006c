use crate::errors::{StatementError, StatementResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw date digits as delivered by the bank (`YYMMDD`, `YYYYMMDD` or `MMDD`).
///
/// The value is kept verbatim; nothing is validated until it is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateDigits(String);

impl DateDigits {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for DateDigits {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DateDigits {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for DateDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Year group plus month and day, not yet checked against the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateParts<'a> {
    pub(crate) year: Option<&'a str>,
    pub(crate) month: u32,
    pub(crate) day: u32,
}

/// Splits `(YY)?MMDD` digits. The last four digits are month and day, at
/// most two digits before them form the year group and anything further
/// left (the century of `YYYYMMDD`) is dropped.
pub(crate) fn split_digits(raw: &str) -> StatementResult<DateParts<'_>> {
    let clean = raw.trim();

    if !(4..=8).contains(&clean.len()) || !clean.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StatementError::DateInvalidFormat(raw.to_string()));
    }

    let (head, month_day) = clean.split_at(clean.len() - 4);
    let year = &head[head.len().saturating_sub(2)..];

    let month = month_day[0..2]
        .parse()
        .map_err(|_| StatementError::DateInvalidFormat(raw.to_string()))?;
    let day = month_day[2..4]
        .parse()
        .map_err(|_| StatementError::DateInvalidFormat(raw.to_string()))?;

    Ok(DateParts {
        year: (!year.is_empty()).then_some(year),
        month,
        day,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1231", None, 12, 31)]
    #[case("71231", Some("7"), 12, 31)]
    #[case("231231", Some("23"), 12, 31)]
    #[case("9231231", Some("23"), 12, 31)]
    #[case("19991231", Some("99"), 12, 31)]
    #[case("20240230", Some("24"), 2, 30)]
    #[case(" 240102 ", Some("24"), 1, 2)]
    #[case("241300", Some("24"), 13, 0)]
    fn test_split_digits(
        #[case] input: &str,
        #[case] year: Option<&str>,
        #[case] month: u32,
        #[case] day: u32,
    ) {
        let parts = split_digits(input).unwrap();
        assert_eq!(parts, DateParts { year, month, day });
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("123")]
    #[case("123456789")]
    #[case("2024-02-30")]
    #[case("24O230")]
    #[case("abcd")]
    fn test_split_digits_invalid(#[case] input: &str) {
        let result = split_digits(input);
        assert!(matches!(
            result,
            Err(StatementError::DateInvalidFormat(raw)) if raw == input
        ));
    }

    #[test]
    fn test_date_digits_serialization() {
        let digits = DateDigits::from("240229");
        let json = serde_json::to_string(&digits).unwrap();
        assert_eq!(json, "\"240229\"");

        let deserialized: DateDigits = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, digits);
    }

    #[test]
    fn test_date_digits_blank() {
        assert!(DateDigits::from("  ").is_blank());
        assert!(!DateDigits::from("0102").is_blank());
    }
}

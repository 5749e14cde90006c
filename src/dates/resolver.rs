use super::digits::split_digits;
use crate::errors::{StatementError, StatementResult};
use chrono::NaiveDate;

/// What to do when the day does not exist in the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DayOverflow {
    /// Use the last day of the month instead.
    Clamp,
    /// Fail with [`StatementError::DateOutOfRange`].
    Reject,
}

/// Resolves bank date digits into calendar dates.
///
/// Two-digit years are always read as `20YY`. When the digits carry no year
/// the two-digit year of `today` is used, so `today` must be the date the
/// statement was fetched, not the date of the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateResolver {
    today: NaiveDate,
}

impl DateResolver {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Resolves `digits`, clamping a non-existent day to the last day of the
    /// month. `explicit_year` replaces whatever year the digits carry.
    pub fn resolve(&self, digits: &str, explicit_year: Option<i32>) -> StatementResult<NaiveDate> {
        self.resolve_with(digits, explicit_year, DayOverflow::Clamp)
    }

    /// Like [`resolve`](Self::resolve) but a non-existent day is an error.
    pub fn resolve_strict(
        &self,
        digits: &str,
        explicit_year: Option<i32>,
    ) -> StatementResult<NaiveDate> {
        self.resolve_with(digits, explicit_year, DayOverflow::Reject)
    }

    pub(crate) fn resolve_with(
        &self,
        digits: &str,
        explicit_year: Option<i32>,
        overflow: DayOverflow,
    ) -> StatementResult<NaiveDate> {
        let parts = split_digits(digits)?;
        let year = match explicit_year {
            Some(year) => year,
            None => self.century_year(parts.year, digits)?,
        };

        if let Some(date) = NaiveDate::from_ymd_opt(year, parts.month, parts.day) {
            return Ok(date);
        }

        let out_of_range = StatementError::DateOutOfRange {
            year,
            month: parts.month,
            day: parts.day,
        };

        match overflow {
            DayOverflow::Reject => Err(out_of_range),
            DayOverflow::Clamp => {
                let last = last_day_of_month(year, parts.month).ok_or(out_of_range)?;
                log::warn!("date {digits:?} has no day {}, using {last}", parts.day);
                Ok(last)
            }
        }
    }

    /// `"20"` followed by the year group, or by today's two-digit year.
    fn century_year(&self, group: Option<&str>, digits: &str) -> StatementResult<i32> {
        let year = match group {
            Some(group) => format!("20{group}"),
            None => format!("20{}", self.today.format("%y")),
        };

        year.parse()
            .map_err(|_| StatementError::DateInvalidFormat(digits.to_string()))
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) {
        return None;
    }

    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }?;

    first_of_next.pred_opt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use rstest::rstest;

    fn resolver() -> DateResolver {
        DateResolver::new(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
    }

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[rstest]
    #[case("231231", ymd(2023, 12, 31))]
    #[case("240229", ymd(2024, 2, 29))]
    #[case("000101", ymd(2000, 1, 1))]
    #[case("991231", ymd(2099, 12, 31))]
    #[case("20250101", ymd(2025, 1, 1))]
    #[case("0704", ymd(2025, 7, 4))]
    fn test_resolve_valid(#[case] digits: &str, #[case] expected: NaiveDate) {
        assert_eq!(resolver().resolve(digits, None).unwrap(), expected);
    }

    #[test]
    fn test_resolve_eight_digits_keeps_only_last_two_year_digits() {
        let date = resolver().resolve("19991231", None).unwrap();
        assert_eq!(date, ymd(2099, 12, 31));
    }

    #[test]
    fn test_resolve_single_digit_year_group_is_concatenated() {
        let date = resolver().resolve("71231", None).unwrap();
        assert_eq!(date.year(), 207);
    }

    #[rstest]
    #[case("20240230", ymd(2024, 2, 29))]
    #[case("20230230", ymd(2023, 2, 28))]
    #[case("230229", ymd(2023, 2, 28))]
    #[case("240431", ymd(2024, 4, 30))]
    #[case("241131", ymd(2024, 11, 30))]
    #[case("240100", ymd(2024, 1, 31))]
    #[case("241299", ymd(2024, 12, 31))]
    fn test_resolve_clamps_to_last_day_of_month(#[case] digits: &str, #[case] expected: NaiveDate) {
        assert_eq!(resolver().resolve(digits, None).unwrap(), expected);
    }

    #[test]
    fn test_resolve_explicit_year_overrides_digits() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("240102", Some(2023)).unwrap(), ymd(2023, 1, 2));
        assert_eq!(resolver.resolve("0229", Some(2023)).unwrap(), ymd(2023, 2, 28));
        assert_eq!(resolver.resolve("0229", Some(2024)).unwrap(), ymd(2024, 2, 29));
    }

    #[test]
    fn test_resolve_missing_year_uses_injected_today() {
        let resolver = DateResolver::new(ymd(2031, 1, 5));
        assert_eq!(resolver.resolve("1224", None).unwrap(), ymd(2031, 12, 24));
        assert_eq!(resolver.today(), ymd(2031, 1, 5));
    }

    #[rstest]
    #[case("241301")]
    #[case("240015")]
    #[case("20249901")]
    fn test_resolve_month_out_of_range(#[case] digits: &str) {
        let result = resolver().resolve(digits, None);
        assert!(matches!(result, Err(StatementError::DateOutOfRange { .. })));
    }

    #[rstest]
    #[case("")]
    #[case("not a date")]
    #[case("2024-02-29")]
    #[case("123")]
    fn test_resolve_invalid_format_keeps_raw_input(#[case] digits: &str) {
        match resolver().resolve(digits, None) {
            Err(StatementError::DateInvalidFormat(raw)) => assert_eq!(raw, digits),
            other => panic!("expected DateInvalidFormat, got {other:?}"),
        }
    }

    #[rstest]
    #[case("20240230")]
    #[case("230229")]
    #[case("240431")]
    fn test_resolve_strict_rejects_overflowing_day(#[case] digits: &str) {
        let result = resolver().resolve_strict(digits, None);
        assert!(matches!(result, Err(StatementError::DateOutOfRange { .. })));
    }

    #[test]
    fn test_resolve_strict_accepts_valid_date() {
        assert_eq!(resolver().resolve_strict("240229", None).unwrap(), ymd(2024, 2, 29));
    }

    #[rstest]
    #[case(2024, 2, Some(ymd(2024, 2, 29)))]
    #[case(2023, 2, Some(ymd(2023, 2, 28)))]
    #[case(2024, 12, Some(ymd(2024, 12, 31)))]
    #[case(2024, 0, None)]
    #[case(2024, 13, None)]
    fn test_last_day_of_month(
        #[case] year: i32,
        #[case] month: u32,
        #[case] expected: Option<NaiveDate>,
    ) {
        assert_eq!(last_day_of_month(year, month), expected);
    }
}

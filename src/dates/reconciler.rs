use super::resolver::{DateResolver, DayOverflow};
use crate::errors::StatementResult;
use chrono::{Datelike, NaiveDate};

impl DateResolver {
    /// Infers the year of an entry (booking) date that may carry no year.
    ///
    /// The entry date takes the year of the primary date, except when the
    /// primary date falls in January and the entry month is later: then the
    /// entry was booked in December of the previous year.
    ///
    /// Returns `Ok(None)` when there is no entry date. Malformed digits in
    /// either value surface as errors, which callers are expected to treat
    /// as "no entry date".
    pub fn reconcile_entry_date(
        &self,
        primary: &str,
        entry: Option<&str>,
    ) -> StatementResult<Option<NaiveDate>> {
        self.reconcile_with(primary, entry, DayOverflow::Clamp)
    }

    /// Like [`reconcile_entry_date`](Self::reconcile_entry_date) without
    /// clamping non-existent days.
    pub fn reconcile_entry_date_strict(
        &self,
        primary: &str,
        entry: Option<&str>,
    ) -> StatementResult<Option<NaiveDate>> {
        self.reconcile_with(primary, entry, DayOverflow::Reject)
    }

    fn reconcile_with(
        &self,
        primary: &str,
        entry: Option<&str>,
        overflow: DayOverflow,
    ) -> StatementResult<Option<NaiveDate>> {
        let Some(entry) = entry.filter(|e| !e.trim().is_empty()) else {
            return Ok(None);
        };

        let primary = self.resolve_with(primary, None, overflow)?;
        let candidate = self.resolve_with(entry, Some(primary.year()), overflow)?;

        if primary.month() == 1 && primary.month() < candidate.month() {
            return self
                .resolve_with(entry, Some(primary.year() - 1), overflow)
                .map(Some);
        }

        Ok(Some(candidate))
    }
}

use crate::{
    dates::{DateDigits, DateResolver},
    errors::{StatementError, StatementResult},
    types::{AccountRef, CanonicalTransaction, RawTransactionRecord},
};
use chrono::{Local, NaiveDate, NaiveTime};
use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Length of [`CanonicalTransaction::import_id`] in hex characters.
pub const IMPORT_ID_LEN: usize = 36;

/// Tunables of the normalizer, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Case-sensitive memo substrings that mark a cash withdrawal.
    pub cash_markers: Vec<String>,
    /// Joins description and additional information in the memo.
    pub memo_separator: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            cash_markers: vec!["Atm".to_string(), "ATM".to_string(), "Bargeld".to_string()],
            memo_separator: " / ".to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct NormalizerBuilder {
    today: Option<NaiveDate>,
    config: NormalizerConfig,
}

impl NormalizerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The date statements were fetched on. Defaults to the local date.
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn config(mut self, config: NormalizerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn cash_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.cash_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn memo_separator(mut self, separator: &str) -> Self {
        self.config.memo_separator = separator.to_string();
        self
    }

    pub fn build(self) -> Normalizer {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        Normalizer {
            resolver: DateResolver::new(today),
            config: self.config,
        }
    }
}

/// Turns [`RawTransactionRecord`]s into [`CanonicalTransaction`]s.
///
/// Normalization is pure: the same record and the same `today` always give
/// the same transaction, import id included.
#[derive(Debug, Clone)]
pub struct Normalizer {
    resolver: DateResolver,
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(today: NaiveDate) -> Self {
        NormalizerBuilder::new().today(today).build()
    }

    pub fn builder() -> NormalizerBuilder {
        NormalizerBuilder::new()
    }

    pub fn resolver(&self) -> &DateResolver {
        &self.resolver
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    pub fn normalize(
        &self,
        record: &RawTransactionRecord,
        account_ref: &AccountRef,
    ) -> StatementResult<CanonicalTransaction> {
        let date = self.transaction_date(record)?;
        let primary_date = self.resolver.resolve(record.date.as_str(), None)?;
        let memo = self.memo(record);

        let transaction = CanonicalTransaction {
            account_ref: account_ref.clone(),
            date,
            payee_name: payee_name(record),
            payee_iban: record.counterparty_iban.clone(),
            is_cash_withdrawal: self.is_cash_withdrawal(memo.as_deref()),
            memo,
            amount_milliunits: amount_milliunits(record)?,
            import_id: import_id(
                primary_date,
                record.amount,
                record.counterparty_name.as_deref(),
            ),
        };

        log::debug!(
            "normalized {} {} into {}",
            record.date,
            record.amount,
            transaction.import_id
        );
        Ok(transaction)
    }

    /// Normalizes every record; a failing record does not stop the others.
    pub fn normalize_batch<'a, I>(
        &self,
        records: I,
        account_ref: &AccountRef,
    ) -> Vec<StatementResult<CanonicalTransaction>>
    where
        I: IntoIterator<Item = &'a RawTransactionRecord>,
    {
        records
            .into_iter()
            .map(|record| self.normalize(record, account_ref))
            .collect()
    }

    /// Normalizes every record and drops the ones that fail, logging why.
    pub fn normalize_valid<'a, I>(
        &self,
        records: I,
        account_ref: &AccountRef,
    ) -> Vec<CanonicalTransaction>
    where
        I: IntoIterator<Item = &'a RawTransactionRecord>,
    {
        records
            .into_iter()
            .filter_map(|record| match self.normalize(record, account_ref) {
                Ok(transaction) => Some(transaction),
                Err(err) => {
                    log::warn!("skipping record dated {:?}: {err}", record.date.as_str());
                    None
                }
            })
            .collect()
    }

    /// The booking date of a record.
    ///
    /// Tries, in order: the dates exactly as written (no clamping), the
    /// reconciled entry date with clamping, and the clamped primary date.
    pub fn transaction_date(&self, record: &RawTransactionRecord) -> StatementResult<NaiveDate> {
        let date = record.date.as_str();
        let entry = record
            .entry_date
            .as_ref()
            .filter(|entry| !entry.is_blank())
            .map(DateDigits::as_str);

        match self.strict_date(date, entry) {
            Ok(resolved) => return Ok(resolved),
            Err(err) => log::warn!("dates {date:?}/{entry:?} are not exact ({err}), recovering"),
        }

        match self.resolver.reconcile_entry_date(date, entry) {
            Ok(Some(resolved)) => return Ok(resolved),
            Ok(None) => {}
            Err(err) => log::warn!("ignoring entry date {entry:?}: {err}"),
        }

        self.resolver.resolve(date, None).map_err(|err| {
            log::warn!("no usable date for record: {err}");
            StatementError::UnresolvableDate {
                date: date.to_string(),
                entry_date: entry.map(str::to_string),
            }
        })
    }

    fn strict_date(&self, date: &str, entry: Option<&str>) -> StatementResult<NaiveDate> {
        match self.resolver.reconcile_entry_date_strict(date, entry)? {
            Some(resolved) => Ok(resolved),
            None => self.resolver.resolve_strict(date, None),
        }
    }

    /// Description and additional information joined by the memo separator,
    /// then trimmed; `None` when both are missing or blank.
    pub fn memo(&self, record: &RawTransactionRecord) -> Option<String> {
        let parts: Vec<&str> = [
            record.description.as_deref(),
            record.additional_information.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect();

        let memo = parts.join(&self.config.memo_separator);
        let memo = memo.trim();
        (!memo.is_empty()).then(|| memo.to_string())
    }

    pub fn is_cash_withdrawal(&self, memo: Option<&str>) -> Option<bool> {
        memo.map(|memo| {
            self.config
                .cash_markers
                .iter()
                .any(|marker| memo.contains(marker.as_str()))
        })
    }
}

/// Counterparty name without surrounding whitespace. A blank name stays
/// `Some("")`; only a missing one is `None`.
pub fn payee_name(record: &RawTransactionRecord) -> Option<String> {
    record
        .counterparty_name
        .as_deref()
        .map(|name| name.trim().to_string())
}

/// Signed amount in thousandths, rounded half away from zero.
pub fn amount_milliunits(record: &RawTransactionRecord) -> StatementResult<i64> {
    record
        .amount
        .checked_mul(record.sign.factor())
        .and_then(|signed| signed.checked_mul(Decimal::ONE_THOUSAND))
        .map(|milli| milli.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|milli| milli.to_i64())
        .ok_or(StatementError::AmountOutOfRange(record.amount))
}

/// Content hash used by the ledger to skip transactions it already has.
///
/// Hashes the date as a UTC-midnight Unix timestamp, the amount and the raw
/// counterparty name, and keeps the first [`IMPORT_ID_LEN`] hex digits.
/// Identical triples collide.
pub fn import_id(date: NaiveDate, amount: Decimal, name: Option<&str>) -> String {
    let timestamp = date.and_time(NaiveTime::MIN).and_utc().timestamp();

    let mut hasher = Sha256::new();
    hasher.update(timestamp.to_string());
    hasher.update(amount_to_string(amount));
    hasher.update(name.unwrap_or_default());

    let mut id = hex::encode(hasher.finalize());
    id.truncate(IMPORT_ID_LEN);
    id
}

/// Shortest decimal form with at least one fractional digit (`12.5`,
/// `100.0`), which keeps ids stable with ones generated from float amounts.
fn amount_to_string(amount: Decimal) -> String {
    let normalized = amount.normalize();
    if normalized.scale() == 0 {
        format!("{normalized}.0")
    } else {
        normalized.to_string()
    }
}

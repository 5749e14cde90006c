use crate::{
    builder::ParsedRecord, dates::DateDigits, errors::StatementError, parsers::prelude::*,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a booking relative to the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Credit,
    Debit,
}

impl Sign {
    pub fn factor(self) -> Decimal {
        match self {
            Sign::Credit => Decimal::ONE,
            Sign::Debit => Decimal::NEGATIVE_ONE,
        }
    }
}

impl TryFrom<i8> for Sign {
    type Error = StatementError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Sign::Credit),
            -1 => Ok(Sign::Debit),
            other => Err(StatementError::InvalidSign(other.to_string())),
        }
    }
}

/// Opaque account identifier of the target ledger, stamped onto every
/// normalized transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountRef(String);

impl AccountRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AccountRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for AccountRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for AccountRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A statement transaction as the bank delivered it, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransactionRecord {
    pub date: DateDigits,
    #[serde(default)]
    pub entry_date: Option<DateDigits>,
    /// Unsigned magnitude; the direction lives in `sign`.
    pub amount: Decimal,
    pub sign: Sign,
    #[serde(default)]
    pub counterparty_name: Option<String>,
    #[serde(default)]
    pub counterparty_iban: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub additional_information: Option<String>,
}

impl RawTransactionRecord {
    pub fn new(date: impl Into<DateDigits>, amount: Decimal, sign: Sign) -> Self {
        Self {
            date: date.into(),
            entry_date: None,
            amount,
            sign,
            counterparty_name: None,
            counterparty_iban: None,
            description: None,
            additional_information: None,
        }
    }
}

impl TryFrom<ParsedRecord> for RawTransactionRecord {
    type Error = StatementError;

    fn try_from(parsed: ParsedRecord) -> Result<Self, Self::Error> {
        Ok(match parsed {
            ParsedRecord::Mt940(mt940) => mt940.into(),
            ParsedRecord::Csv(csv) => csv.into(),
        })
    }
}

impl From<Mt940Transaction> for RawTransactionRecord {
    fn from(stmt: Mt940Transaction) -> Self {
        let details = stmt.details.unwrap_or_default();
        RawTransactionRecord {
            date: stmt.value_date,
            entry_date: stmt.entry_date,
            amount: stmt.amount,
            sign: stmt.funds_code.sign(),
            counterparty_name: details.name,
            counterparty_iban: details.iban,
            description: details.description,
            additional_information: details.information,
        }
    }
}

impl From<CsvRecord> for RawTransactionRecord {
    fn from(record: CsvRecord) -> Self {
        RawTransactionRecord {
            date: record.date,
            entry_date: record.entry_date,
            amount: record.amount,
            sign: record.sign,
            counterparty_name: record.name,
            counterparty_iban: record.iban,
            description: record.description,
            additional_information: record.information,
        }
    }
}

/// A transaction ready for import into the budgeting ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalTransaction {
    pub account_ref: AccountRef,
    pub date: NaiveDate,
    pub payee_name: Option<String>,
    pub payee_iban: Option<String>,
    pub memo: Option<String>,
    pub amount_milliunits: i64,
    /// `None` when there is no memo to classify.
    pub is_cash_withdrawal: Option<bool>,
    pub import_id: String,
}

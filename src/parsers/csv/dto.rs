use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::CsvSign;
use crate::{dates::DateDigits, types::Sign};

#[derive(Debug, Deserialize)]
pub struct CsvRecordRaw {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "EntryDate", default)]
    pub entry_date: Option<String>,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Sign", default)]
    pub sign: Option<String>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "IBAN", default)]
    pub iban: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Information", default)]
    pub information: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvRecord {
    pub date: DateDigits,
    pub entry_date: Option<DateDigits>,
    /// Always the unsigned magnitude.
    pub amount: Decimal,
    pub sign: Sign,
    pub name: Option<String>,
    pub iban: Option<String>,
    pub description: Option<String>,
    pub information: Option<String>,
}

impl TryFrom<CsvRecordRaw> for CsvRecord {
    type Error = String;

    fn try_from(raw: CsvRecordRaw) -> Result<Self, Self::Error> {
        let amount = raw
            .amount
            .trim()
            .parse::<Decimal>()
            .map_err(|e| format!("Invalid amount: {}", e))?;

        let sign = match raw.sign.filter(|s| !s.trim().is_empty()) {
            Some(sign) => CsvSign::from(sign).parse().map_err(|e| e.to_string())?,
            None if amount.is_sign_negative() => Sign::Debit,
            None => Sign::Credit,
        };

        Ok(CsvRecord {
            date: raw.date.trim().into(),
            entry_date: raw
                .entry_date
                .map(|d| DateDigits::from(d.trim()))
                .filter(|d| !d.is_blank()),
            amount: amount.abs(),
            sign,
            name: raw.name,
            iban: raw.iban,
            description: raw.description,
            information: raw.information,
        })
    }
}

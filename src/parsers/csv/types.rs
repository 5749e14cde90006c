use crate::{errors::StatementError, types::Sign};
use serde::{Deserialize, Serialize};

/// Credit/debit marker from a CSV export.
///
/// Exports disagree on how to spell the direction, so several forms are
/// accepted (case-insensitive):
/// - `credit` / `debit`
/// - `C` / `D`
/// - `+1` / `-1`, `1`
/// - `+` / `-`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvSign(String);

impl CsvSign {
    pub fn parse(&self) -> Result<Sign, StatementError> {
        match self.0.trim().to_lowercase().as_str() {
            "credit" | "c" | "+1" | "1" | "+" => Ok(Sign::Credit),
            "debit" | "d" | "-1" | "-" => Ok(Sign::Debit),
            _ => Err(StatementError::InvalidSign(self.0.clone())),
        }
    }
}

impl From<String> for CsvSign {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CsvSign {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<CsvSign> for Sign {
    type Error = StatementError;

    fn try_from(sign: CsvSign) -> Result<Self, Self::Error> {
        sign.parse()
    }
}

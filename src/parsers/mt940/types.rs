use crate::types::Sign;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Debit/credit mark of an MT940 `:61:` statement line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundsCode {
    #[serde(rename = "C")]
    Credit,
    #[serde(rename = "D")]
    Debit,
    /// Reversal of a credit, i.e. money leaves the account.
    #[serde(rename = "RC")]
    ReversalOfCredit,
    /// Reversal of a debit, i.e. money comes back.
    #[serde(rename = "RD")]
    ReversalOfDebit,
}

impl FundsCode {
    pub fn sign(self) -> Sign {
        match self {
            FundsCode::Credit | FundsCode::ReversalOfDebit => Sign::Credit,
            FundsCode::Debit | FundsCode::ReversalOfCredit => Sign::Debit,
        }
    }

    /// Reads the funds code at the start of `input`, returning the rest.
    pub(super) fn split_prefix(input: &str) -> Option<(Self, &str)> {
        const CODES: [(&str, FundsCode); 4] = [
            ("RC", FundsCode::ReversalOfCredit),
            ("RD", FundsCode::ReversalOfDebit),
            ("C", FundsCode::Credit),
            ("D", FundsCode::Debit),
        ];

        CODES
            .iter()
            .find_map(|(code, funds)| input.strip_prefix(code).map(|rest| (*funds, rest)))
    }
}

/// MT940 amounts use a comma as decimal separator and may end with it (`100,`).
pub(super) fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let normalized = raw.replace(',', ".");
    let normalized = normalized.trim_end_matches('.');

    if normalized.is_empty() || raw.matches(',').count() > 1 {
        return Err(format!("Invalid amount: {raw:?}"));
    }

    Decimal::from_str(normalized).map_err(|e| format!("Invalid amount {raw:?}: {e}"))
}

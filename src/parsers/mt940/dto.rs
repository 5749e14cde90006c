use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{FundsCode, parse_amount};
use crate::dates::DateDigits;

/// One `:61:` statement line together with its `:86:` details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mt940Transaction {
    pub value_date: DateDigits,
    pub entry_date: Option<DateDigits>,
    pub funds_code: FundsCode,
    pub amount: Decimal,
    pub transaction_type: Option<String>,
    pub reference: Option<String>,
    pub bank_reference: Option<String>,
    pub supplementary: Option<String>,
    pub details: Option<Mt940Details>,
}

/// `:86:` information to account owner, split into its `?NN` sub-fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mt940Details {
    /// Business transaction code in front of the first `?`.
    pub transaction_code: Option<String>,
    /// `?00` posting text.
    pub description: Option<String>,
    /// `?20`..`?29` remittance information.
    pub information: Option<String>,
    /// `?31` counterparty IBAN (or account number).
    pub iban: Option<String>,
    /// `?32` and `?33` counterparty name.
    pub name: Option<String>,
}

impl Mt940Transaction {
    /// Parses the content of a `:61:` field. A second line, if any, is the
    /// supplementary details subfield.
    pub(super) fn from_statement_line(content: &str) -> Result<Self, String> {
        let (line, supplementary) = match content.split_once('\n') {
            Some((line, rest)) => (line.trim(), non_empty(rest)),
            None => (content.trim(), None),
        };

        let value_date = line
            .get(0..6)
            .filter(|d| all_digits(d))
            .ok_or_else(|| format!("Invalid :61: value date in {line:?}"))?;
        let mut rest = &line[6..];

        let entry_date = rest.get(0..4).filter(|d| all_digits(d));
        if entry_date.is_some() {
            rest = &rest[4..];
        }

        let (funds_code, after_code) = FundsCode::split_prefix(rest)
            .ok_or_else(|| format!("Invalid :61: funds code in {line:?}"))?;
        rest = after_code;

        // third character of the currency code, optional
        if rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
            rest = &rest[1..];
        }

        let amount_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == ','))
            .unwrap_or(rest.len());
        let amount = parse_amount(&rest[..amount_end])?;
        rest = &rest[amount_end..];

        let transaction_type = rest.get(0..4).and_then(non_empty);
        rest = rest.get(4..).unwrap_or("");

        let (reference, bank_reference) = match rest.split_once("//") {
            Some((reference, bank_reference)) => (non_empty(reference), non_empty(bank_reference)),
            None => (non_empty(rest), None),
        };

        Ok(Mt940Transaction {
            value_date: value_date.into(),
            entry_date: entry_date.map(DateDigits::from),
            funds_code,
            amount,
            transaction_type,
            reference,
            bank_reference,
            supplementary,
            details: None,
        })
    }
}

impl Mt940Details {
    /// Parses the content of a `:86:` field. Text that does not start with a
    /// business code and `?` is unstructured and becomes the description.
    pub(super) fn parse(content: &str) -> Self {
        let text = content.replace('\n', "");

        // structured details open with a three digit business code
        let structured = text.get(0..3).is_some_and(all_digits) && text[3..].starts_with('?');
        if !structured {
            return Mt940Details {
                description: non_empty(&text),
                ..Default::default()
            };
        }

        let mut subfields = text.split('?');
        let code = subfields.next().unwrap_or_default();

        let mut details = Mt940Details {
            transaction_code: non_empty(code),
            ..Default::default()
        };
        let mut information = String::new();
        let mut name = Vec::new();

        for subfield in subfields {
            let Some(key) = subfield
                .get(0..2)
                .filter(|k| all_digits(k))
                .and_then(|k| k.parse::<u8>().ok())
            else {
                continue;
            };
            let value = &subfield[2..];

            match key {
                0 => details.description = non_empty(value),
                20..=29 => information.push_str(value),
                31 => details.iban = non_empty(value),
                32 | 33 => name.extend(non_empty(value)),
                _ => {}
            }
        }

        details.information = non_empty(&information);
        details.name = non_empty(&name.join(" "));
        details
    }
}

fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

use super::dto::{Mt940Details, Mt940Transaction};
use crate::parsers::traits::Parser;

pub struct Mt940Parser;

impl Parser for Mt940Parser {
    type Output = Mt940Transaction;

    const EXTENSIONS: &'static [&'static str] = &["sta", "mt940", "940"];

    fn is_supported(filename: Option<&str>, content: &str) -> bool {
        if filename.is_some_and(Self::has_extension) {
            return true;
        }

        content.contains(":20:") && content.contains(":61:")
    }

    fn parse(content: &str) -> Result<Vec<Self::Output>, String> {
        let fields = split_fields(content);

        if !fields.iter().any(|(tag, _)| tag == "20" || tag == "61") {
            return Err("Missing :20: tag".to_string());
        }

        let mut transactions: Vec<Mt940Transaction> = Vec::new();

        for (tag, value) in fields {
            match tag.as_str() {
                "61" => transactions.push(Mt940Transaction::from_statement_line(&value)?),
                "86" => match transactions.last_mut() {
                    Some(last) if last.details.is_none() => {
                        last.details = Some(Mt940Details::parse(&value));
                    }
                    _ => log::debug!("ignoring :86: without a preceding :61:"),
                },
                _ => {}
            }
        }

        log::debug!("parsed {} MT940 statement lines", transactions.len());
        Ok(transactions)
    }
}

/// Splits MT940 text into `(tag, value)` pairs. Lines that do not open a new
/// tag continue the previous field; a lone `-` closes the statement block.
fn split_fields(content: &str) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = Vec::new();
    let mut open = false;

    for line in content.lines() {
        let line = line.trim_end();

        if let Some((tag, value)) = split_tag(line) {
            fields.push((tag.to_string(), value.to_string()));
            open = true;
        } else if line.trim() == "-" || line.trim_start().starts_with("-}") {
            open = false;
        } else if open && !line.trim().is_empty() {
            if let Some((_, value)) = fields.last_mut() {
                value.push('\n');
                value.push_str(line);
            }
        }
    }

    fields
}

fn split_tag(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix(':')?;
    let (tag, value) = rest.split_once(':')?;

    let valid = (2..=3).contains(&tag.len())
        && tag.get(0..2)?.bytes().all(|b| b.is_ascii_digit())
        && tag.bytes().all(|b| b.is_ascii_alphanumeric());

    valid.then_some((tag, value))
}

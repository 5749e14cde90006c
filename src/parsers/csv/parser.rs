use super::dto::{CsvRecord, CsvRecordRaw};
use crate::parsers::traits::Parser;
use csv::ReaderBuilder;

pub struct CsvParser;

impl Parser for CsvParser {
    type Output = CsvRecord;

    const EXTENSIONS: &'static [&'static str] = &["csv"];

    fn is_supported(filename: Option<&str>, content: &str) -> bool {
        let first_line = content.lines().next().unwrap_or("");
        let looks_like_csv = first_line.contains("Date") && first_line.contains("Amount");

        // With a filename both the extension and the header have to match
        match filename {
            Some(name) => Self::has_extension(name) && looks_like_csv,
            None => looks_like_csv,
        }
    }

    fn parse(content: &str) -> Result<Vec<Self::Output>, String> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(content.as_bytes());

        let mut records = Vec::new();

        for (line, result) in reader.deserialize::<CsvRecordRaw>().enumerate() {
            let raw = result.map_err(|e| format!("CSV deserialize error: {}", e))?;
            let record: CsvRecord = raw
                .try_into()
                .map_err(|e| format!("Record {}: {}", line + 1, e))?;
            records.push(record);
        }

        log::debug!("parsed {} CSV records", records.len());
        Ok(records)
    }
}

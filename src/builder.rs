use std::fs;

use crate::{errors::StatementError, parsers::prelude::*, types::RawTransactionRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ParsedRecord {
    Mt940(Mt940Transaction),
    Csv(CsvRecord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    #[serde(rename = "mt940")]
    Mt940,
    #[serde(rename = "csv")]
    Csv,
}

impl FileFormat {
    fn parse_raw(&self, content: &str) -> Result<Vec<ParsedRecord>, StatementError> {
        match self {
            FileFormat::Mt940 => {
                let transactions =
                    Mt940Parser::parse(content).map_err(StatementError::ParseFailed)?;
                Ok(transactions.into_iter().map(ParsedRecord::Mt940).collect())
            }
            FileFormat::Csv => {
                let records = CsvParser::parse(content).map_err(StatementError::ParseFailed)?;
                Ok(records.into_iter().map(ParsedRecord::Csv).collect())
            }
        }
    }

    fn parse<T>(&self, content: &str) -> Result<Vec<T>, StatementError>
    where
        T: TryFrom<ParsedRecord, Error = StatementError>,
    {
        self.parse_raw(content)?
            .into_iter()
            .map(T::try_from)
            .collect()
    }

    /// Picks the format for a statement.
    ///
    /// Each parser's own check runs first, MT940 before CSV: MT940 accepts
    /// its extension or a `:20:`/`:61:` body, CSV needs its header (and the
    /// `.csv` extension when a filename is given). Only when no check matches
    /// does the extension alone decide.
    fn detect(filename: Option<&str>, content: Option<&str>) -> Result<Self, StatementError> {
        if let Some(content) = content {
            if Mt940Parser::is_supported(filename, content) {
                return Ok(FileFormat::Mt940);
            }
            if CsvParser::is_supported(filename, content) {
                return Ok(FileFormat::Csv);
            }
        }

        if let Some(filename) = filename {
            if Mt940Parser::has_extension(filename) {
                return Ok(FileFormat::Mt940);
            }
            if CsvParser::has_extension(filename) {
                return Ok(FileFormat::Csv);
            }
        }

        Err(StatementError::UnsupportedFormat)
    }
}

#[derive(Default)]
pub struct ParserBuilder {
    content: Option<String>,
    filepath: Option<String>,
    format: Option<FileFormat>,
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn filename(mut self, filename: &str) -> Self {
        self.filepath = Some(filename.to_string());
        self
    }

    pub fn format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn parse(self) -> Result<Vec<RawTransactionRecord>, StatementError> {
        self.parse_into::<RawTransactionRecord>()
    }

    pub fn parse_into<T>(self) -> Result<Vec<T>, StatementError>
    where
        T: TryFrom<ParsedRecord, Error = StatementError>,
    {
        let format = self.format.map(Ok).unwrap_or_else(|| {
            FileFormat::detect(self.filepath.as_deref(), self.content.as_deref())
        })?;

        let content = self.content.map(Ok).unwrap_or_else(|| {
            self.filepath
                .ok_or(StatementError::MissingContentAndFilepath)
                .and_then(|path| fs::read_to_string(path).map_err(Into::into))
        })?;

        format.parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sign;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const SAMPLE_MT940: &str = "\
:20:STARTUMSE
:25:12030000/0000202051
:61:2401020102DR12,50NDDTNONREF
:86:106?00KARTENZAHLUNG?20Baeckerei Sonne?32Sonne GmbH
-
";

    const SAMPLE_CSV: &str = "Date,EntryDate,Amount,Sign,Name\n240102,0102,12.50,debit,Sonne GmbH\n";

    #[test]
    fn test_builder_missing_content() {
        let result: Result<Vec<RawTransactionRecord>, _> = ParserBuilder::new().parse();
        assert!(matches!(result, Err(StatementError::UnsupportedFormat)));
    }

    #[test]
    fn test_builder_new() {
        let builder = ParserBuilder::new();
        assert!(builder.content.is_none());
        assert!(builder.filepath.is_none());
        assert!(builder.format.is_none());
    }

    #[test]
    fn test_builder_chaining() {
        let builder = ParserBuilder::new()
            .content("content")
            .filename("file.sta")
            .format(FileFormat::Mt940);

        assert_eq!(builder.content.as_deref(), Some("content"));
        assert_eq!(builder.filepath.as_deref(), Some("file.sta"));
        assert_eq!(builder.format, Some(FileFormat::Mt940));
    }

    #[rstest]
    #[case(SAMPLE_MT940, Some(FileFormat::Mt940), None)]
    #[case(SAMPLE_MT940, None, None)]
    #[case(SAMPLE_MT940, None, Some("statement.sta"))]
    #[case(SAMPLE_CSV, Some(FileFormat::Csv), None)]
    #[case(SAMPLE_CSV, None, None)]
    #[case(SAMPLE_CSV, None, Some("statement.csv"))]
    fn test_parse_with_different_detection_methods(
        #[case] content: &str,
        #[case] format: Option<FileFormat>,
        #[case] filename: Option<&str>,
    ) {
        let mut builder = ParserBuilder::new().content(content);

        if let Some(fmt) = format {
            builder = builder.format(fmt);
        }
        if let Some(fname) = filename {
            builder = builder.filename(fname);
        }

        let records = builder.parse().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date.as_str(), "240102");
        assert_eq!(records[0].sign, Sign::Debit);
        assert_eq!(records[0].amount, Decimal::from_str("12.50").unwrap());
        assert_eq!(records[0].counterparty_name.as_deref(), Some("Sonne GmbH"));
    }

    #[rstest]
    #[case(None, Some(SAMPLE_MT940), Ok(FileFormat::Mt940))]
    #[case(None, Some(SAMPLE_CSV), Ok(FileFormat::Csv))]
    #[case(Some("statement.sta"), None, Ok(FileFormat::Mt940))]
    #[case(Some("statement.940"), None, Ok(FileFormat::Mt940))]
    #[case(Some("statement.CSV"), None, Ok(FileFormat::Csv))]
    #[case(Some("statement.txt"), Some(SAMPLE_MT940), Ok(FileFormat::Mt940))]
    #[case(Some("statement.txt"), Some("not a statement"), Err(()))]
    #[case(Some("statement.qfx"), None, Err(()))]
    #[case(None, None, Err(()))]
    // content wins over a mismatching extension
    #[case(Some("statement.csv"), Some(SAMPLE_MT940), Ok(FileFormat::Mt940))]
    // MT940 is checked first and accepts its own extension
    #[case(Some("statement.sta"), Some(SAMPLE_CSV), Ok(FileFormat::Mt940))]
    // CSV header without the .csv extension is not enough
    #[case(Some("export.txt"), Some(SAMPLE_CSV), Err(()))]
    // unrecognised content falls back to the extension
    #[case(Some("statement.csv"), Some("no header"), Ok(FileFormat::Csv))]
    fn test_file_format_detect(
        #[case] filename: Option<&str>,
        #[case] content: Option<&str>,
        #[case] expected: Result<FileFormat, ()>,
    ) {
        let result = FileFormat::detect(filename, content);
        match expected {
            Ok(format) => assert_eq!(result.unwrap(), format),
            Err(()) => assert!(matches!(result, Err(StatementError::UnsupportedFormat))),
        }
    }

    #[test]
    fn test_parse_raw_keeps_format_records() {
        let parsed = FileFormat::Mt940.parse_raw(SAMPLE_MT940).unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(matches!(&parsed[0], ParsedRecord::Mt940(txn) if txn.reference.as_deref() == Some("NONREF")));

        let parsed = FileFormat::Csv.parse_raw(SAMPLE_CSV).unwrap();
        assert!(matches!(&parsed[0], ParsedRecord::Csv(record) if record.sign == Sign::Debit));
    }

    #[test]
    fn test_parse_no_content_no_filepath() {
        let result = ParserBuilder::new().format(FileFormat::Mt940).parse();
        assert!(matches!(result, Err(StatementError::MissingContentAndFilepath)));
    }

    #[test]
    fn test_parse_missing_file() {
        let result = ParserBuilder::new()
            .filename("/nonexistent/statement.sta")
            .parse();
        assert!(matches!(result, Err(StatementError::ReadContentFailed(_))));
    }

    #[rstest]
    #[case(FileFormat::Mt940, "invalid MT940 content")]
    #[case(FileFormat::Mt940, ":20:X\n:61:240102C1,00,00NTRF\n")]
    #[case(FileFormat::Csv, "Date,Amount\n240102,invalid")]
    fn test_parse_invalid_content(#[case] format: FileFormat, #[case] content: &str) {
        let result = ParserBuilder::new().content(content).format(format).parse();
        assert!(matches!(result, Err(StatementError::ParseFailed(_))));
    }

    #[test]
    fn test_file_format_serialization() {
        let json = serde_json::to_string(&FileFormat::Mt940).unwrap();
        assert_eq!(json, "\"mt940\"");

        let deserialized: FileFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(deserialized, FileFormat::Csv);
    }

    #[test]
    fn test_parsed_record_serialization() {
        let parsed = FileFormat::Csv.parse_raw(SAMPLE_CSV).unwrap().remove(0);
        let json = serde_json::to_string(&parsed).unwrap();
        assert!(json.contains("Csv"));

        let deserialized: ParsedRecord = serde_json::from_str(&json).unwrap();
        let record: RawTransactionRecord = deserialized.try_into().unwrap();
        assert_eq!(record.counterparty_name.as_deref(), Some("Sonne GmbH"));
    }
}

use fints_normalizer::{FileFormat, Normalizer, NormalizerConfig, ParserBuilder};

const CSV_DATA: &str = r#"Date,EntryDate,Amount,Sign,Name,IBAN,Description,Information
240102,1231,12.50,debit,Sonne GmbH,DE02120300000000202051,KARTENZAHLUNG,Baeckerei Sonne
240103,0103,1500.00,credit,ACME AG,,GUTSCHRIFT,Gehalt Januar
240230,0230,100.00,debit,,,Bargeldauszahlung,Atm 0815
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config: NormalizerConfig =
        serde_json::from_str(r#"{ "cash_markers": ["Atm", "Bargeld", "Geldautomat"] }"#)?;

    let normalizer = Normalizer::builder()
        .today(chrono::NaiveDate::from_ymd_opt(2024, 3, 1).ok_or("invalid date")?)
        .config(config)
        .build();

    let records = ParserBuilder::new()
        .content(CSV_DATA)
        .format(FileFormat::Csv)
        .parse()?;

    let transactions = normalizer.normalize_valid(&records, &"budget-checking".into());
    println!("{}", serde_json::to_string_pretty(&transactions)?);

    Ok(())
}

use fints_normalizer::{AccountRef, Normalizer, ParserBuilder};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let file_path = if args.len() > 1 {
        &args[1]
    } else {
        println!("Using example MT940 data from demos/sample.sta\n");
        "demos/sample.sta"
    };
    let account = AccountRef::from(args.get(2).map(String::as_str).unwrap_or("checking"));

    let records = ParserBuilder::new().filename(file_path).parse()?;
    let normalizer = Normalizer::builder().build();

    println!("Found {} records\n", records.len());

    for (i, result) in normalizer
        .normalize_batch(&records, &account)
        .into_iter()
        .enumerate()
    {
        println!("Transaction {}:", i + 1);
        match result {
            Ok(tx) => {
                println!("  Date: {}", tx.date);
                println!("  Amount (milliunits): {}", tx.amount_milliunits);
                if let Some(payee) = &tx.payee_name {
                    println!("  Payee: {}", payee);
                }
                if let Some(memo) = &tx.memo {
                    println!("  Memo: {}", memo);
                }
                if let Some(cash) = tx.is_cash_withdrawal {
                    println!("  Cash withdrawal: {}", cash);
                }
                println!("  Import ID: {}", tx.import_id);
            }
            Err(err) => println!("  Skipped: {}", err),
        }
        println!();
    }

    Ok(())
}

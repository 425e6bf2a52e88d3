//! CSV input for batch classification and advisor summaries
//!
//! Two small formats:
//! - transaction exports: `description[,amount]` rows fed to the classifier
//! - spending summaries: `category,amount` rows fed to the advisor

use std::io::Read;

use csv::ReaderBuilder;

use crate::error::{Error, Result};
use crate::models::{Category, TransactionRecord};

/// Parse transaction rows for batch classification
///
/// Expects a header row with a `description` column and an optional
/// `amount` column. Blank amounts deserialize to None.
pub fn read_transaction_records<R: Read>(reader: R) -> Result<Vec<TransactionRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: TransactionRecord = result?;
        records.push(record);
    }
    Ok(records)
}

/// Parse a `category,amount` spending summary for the advisor
pub fn read_spending_summary<R: Read>(reader: R) -> Result<Vec<(Category, f64)>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut totals = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let category_str = record
            .get(0)
            .ok_or_else(|| Error::InvalidData("Missing category column".into()))?;
        let amount_str = record
            .get(1)
            .ok_or_else(|| Error::InvalidData("Missing amount column".into()))?;

        let category: Category = category_str
            .parse()
            .map_err(Error::InvalidData)?;
        let amount: f64 = amount_str
            .parse()
            .map_err(|_| Error::InvalidData(format!("Invalid amount: {}", amount_str)))?;

        totals.push((category, amount));
    }
    Ok(totals)
}

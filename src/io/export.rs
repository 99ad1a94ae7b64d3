use anyhow::Result;
use std::io::Write;

use crate::application::Ledger;
use crate::domain::{CategoryFilter, format_cents};
use crate::storage::KeyValueStore;

/// Exporter for writing ledger data to CSV or JSON
pub struct Exporter<'a, S> {
    ledger: &'a Ledger<S>,
}

impl<'a, S: KeyValueStore> Exporter<'a, S> {
    pub fn new(ledger: &'a Ledger<S>) -> Self {
        Self { ledger }
    }

    /// Export all records as a JSON array in the stored shape and order.
    /// The output can be fed back through `Importer::import_json`.
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<usize> {
        let transactions = self.ledger.transactions();
        serde_json::to_writer_pretty(&mut writer, transactions)?;
        writeln!(writer)?;
        Ok(transactions.len())
    }

    /// Export the records matching `filter` to CSV, newest first.
    pub fn export_csv<W: Write>(&self, writer: W, filter: &CategoryFilter) -> Result<usize> {
        let transactions = self.ledger.list(filter);
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "date", "type", "category", "description", "amount"])?;

        for transaction in &transactions {
            let date = transaction.date.format("%Y-%m-%d").to_string();
            let amount = format_cents(transaction.amount);
            csv_writer.write_record([
                transaction.id.as_str(),
                date.as_str(),
                transaction.kind.as_str(),
                transaction.category.as_str(),
                transaction.description.as_str(),
                amount.as_str(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(transactions.len())
    }
}

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::io::Read;

use crate::application::Ledger;
use crate::domain::Transaction;
use crate::storage::KeyValueStore;

/// Options for import operations
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Validate and count, but leave the ledger untouched
    pub dry_run: bool,
    /// Silently skip records whose id already exists instead of reporting them
    pub skip_duplicates: bool,
}

/// Result of an import operation
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<ImportError>,
}

/// A record that could not be imported
#[derive(Debug, Clone)]
pub struct ImportError {
    /// Zero-based position in the input array
    pub index: usize,
    pub id: Option<String>,
    pub error: String,
}

/// Importer for reading stored-shape JSON snapshots into a ledger
pub struct Importer<'a, S> {
    ledger: &'a mut Ledger<S>,
}

impl<'a, S: KeyValueStore> Importer<'a, S> {
    pub fn new(ledger: &'a mut Ledger<S>) -> Self {
        Self { ledger }
    }

    /// Import a JSON array of transaction records.
    ///
    /// Each record is checked on its own; bad records are reported and
    /// skipped while the rest go in with a single ledger write.
    pub async fn import_json<R: Read>(
        &mut self,
        reader: R,
        options: ImportOptions,
    ) -> Result<ImportResult> {
        let values: Vec<serde_json::Value> =
            serde_json::from_reader(reader).context("Input is not a JSON array")?;

        let mut seen: HashSet<String> = self
            .ledger
            .transactions()
            .iter()
            .map(|t| t.id.clone())
            .collect();

        let mut accepted = Vec::new();
        let mut result = ImportResult::default();

        for (index, value) in values.into_iter().enumerate() {
            let id = value.get("id").and_then(|v| v.as_str()).map(String::from);

            let transaction: Transaction = match serde_json::from_value(value) {
                Ok(t) => t,
                Err(e) => {
                    result.errors.push(ImportError {
                        index,
                        id,
                        error: format!("Malformed record: {}", e),
                    });
                    continue;
                }
            };

            if let Err(e) = transaction.check() {
                result.errors.push(ImportError {
                    index,
                    id,
                    error: format!("Invalid record: {}", e),
                });
                continue;
            }

            if !seen.insert(transaction.id.clone()) {
                if options.skip_duplicates {
                    result.skipped += 1;
                } else {
                    result.errors.push(ImportError {
                        index,
                        id,
                        error: "Duplicate id".to_string(),
                    });
                }
                continue;
            }

            accepted.push(transaction);
        }

        for error in &result.errors {
            log::warn!("Skipping record {}: {}", error.index, error.error);
        }

        result.imported = if options.dry_run {
            accepted.len()
        } else {
            self.ledger.merge(accepted).await?
        };

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategoryFilter;
    use crate::storage::MemoryStore;

    const SNAPSHOT: &str = r#"[
        {"id":"1705312800000","description":"Coffee","amount":-4.5,"type":"expense","category":"food","date":"2024-01-15"},
        {"id":"1704067200000","description":"Paycheck","amount":2000,"type":"income","category":"other","date":"2024-01-01"}
    ]"#;

    async fn empty_ledger() -> Ledger<MemoryStore> {
        Ledger::load(MemoryStore::new()).await.unwrap()
    }

    #[tokio::test]
    async fn test_import_valid_snapshot() {
        let mut ledger = empty_ledger().await;

        let result = Importer::new(&mut ledger)
            .import_json(SNAPSHOT.as_bytes(), ImportOptions::default())
            .await
            .unwrap();

        assert_eq!(result.imported, 2);
        assert!(result.errors.is_empty());
        assert_eq!(ledger.summary().total_balance, 199550);
        assert_eq!(ledger.list(&CategoryFilter::All)[0].id, "1705312800000");
    }

    #[tokio::test]
    async fn test_dry_run_leaves_ledger_untouched() {
        let mut ledger = empty_ledger().await;

        let result = Importer::new(&mut ledger)
            .import_json(
                SNAPSHOT.as_bytes(),
                ImportOptions {
                    dry_run: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(result.imported, 2);
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn test_bad_records_are_reported_and_skipped() {
        let mut ledger = empty_ledger().await;
        let input = r#"[
            {"id":"ok","description":"Book","amount":-12,"type":"expense","category":"education","date":"2024-02-01"},
            {"id":"sign","description":"Refund","amount":5,"type":"expense","category":"other","date":"2024-02-01"},
            {"id":"blank","description":"","amount":5,"type":"income","category":"other","date":"2024-02-01"},
            {"id":"date","description":"x","amount":5,"type":"income","category":"other","date":"soon"},
            {"id":"huge","description":"Lottery","amount":20000000000000,"type":"income","category":"other","date":"2024-02-01"}
        ]"#;

        let result = Importer::new(&mut ledger)
            .import_json(input.as_bytes(), ImportOptions::default())
            .await
            .unwrap();

        assert_eq!(result.imported, 1);
        let failed: Vec<Option<String>> = result.errors.iter().map(|e| e.id.clone()).collect();
        assert_eq!(
            failed,
            vec![
                Some("sign".to_string()),
                Some("blank".to_string()),
                Some("date".to_string()),
                Some("huge".to_string())
            ]
        );
        assert_eq!(ledger.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicates() {
        let mut ledger = empty_ledger().await;
        Importer::new(&mut ledger)
            .import_json(SNAPSHOT.as_bytes(), ImportOptions::default())
            .await
            .unwrap();

        let reported = Importer::new(&mut ledger)
            .import_json(SNAPSHOT.as_bytes(), ImportOptions::default())
            .await
            .unwrap();
        assert_eq!(reported.imported, 0);
        assert_eq!(reported.errors.len(), 2);

        let skipped = Importer::new(&mut ledger)
            .import_json(
                SNAPSHOT.as_bytes(),
                ImportOptions {
                    skip_duplicates: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(skipped.skipped, 2);
        assert!(skipped.errors.is_empty());
        assert_eq!(ledger.len(), 2);
    }

    #[tokio::test]
    async fn test_non_array_input_fails() {
        let mut ledger = empty_ledger().await;
        let result = Importer::new(&mut ledger)
            .import_json(r#"{"transactions": []}"#.as_bytes(), ImportOptions::default())
            .await;
        assert!(result.is_err());
    }
}

use anyhow::Context;

use crate::domain::{
    CategoryFilter, InvalidInput, Summary, Transaction, TransactionInput, new_transaction_id,
    newest_first, summarize,
};
use crate::storage::{KeyValueStore, TRANSACTIONS_KEY};

use super::LedgerError;

/// The transaction ledger.
///
/// Holds every record in storage order (most recently added first) and writes
/// the whole list back to the store after each mutation. A failed write leaves
/// the in-memory state as it was before the call.
///
/// Totals are kept alongside the records; a mutation whose totals would not
/// fit in `Cents` is rejected before anything is written.
pub struct Ledger<S> {
    store: S,
    transactions: Vec<Transaction>,
    summary: Summary,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Load the ledger from `store`. An empty store gives an empty ledger.
    pub async fn load(store: S) -> Result<Self, LedgerError> {
        let transactions = match store.get(TRANSACTIONS_KEY).await? {
            Some(json) => serde_json::from_str::<Vec<Transaction>>(&json)
                .context("Stored transactions are not valid JSON")?,
            None => Vec::new(),
        };
        let summary = summarize(&transactions)
            .context("Stored transactions total more than can be represented")?;
        log::info!("Loaded {} transaction(s)", transactions.len());

        Ok(Self {
            store,
            transactions,
            summary,
        })
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// All records in storage order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    // ========================
    // Mutations
    // ========================

    /// Record a new transaction.
    pub async fn add(&mut self, input: TransactionInput) -> Result<Transaction, LedgerError> {
        input.validate()?;

        let transaction = Transaction::from_input(new_transaction_id(), input);

        let mut next = Vec::with_capacity(self.transactions.len() + 1);
        next.push(transaction.clone());
        next.extend(self.transactions.iter().cloned());
        self.commit(next).await?;

        log::debug!(
            "Added transaction {} ({} {})",
            transaction.id,
            transaction.kind,
            transaction.amount
        );
        Ok(transaction)
    }

    /// Replace every field of an existing transaction except its id.
    pub async fn update(
        &mut self,
        id: &str,
        input: TransactionInput,
    ) -> Result<Transaction, LedgerError> {
        input.validate()?;

        let index = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;

        let transaction = Transaction::from_input(id.to_string(), input);

        let mut next = self.transactions.clone();
        next[index] = transaction.clone();
        self.commit(next).await?;

        log::debug!("Updated transaction {}", id);
        Ok(transaction)
    }

    /// Remove a transaction. Removing an unknown id is not an error; the
    /// ledger is written back either way. Returns the removed record, if any.
    pub async fn delete(&mut self, id: &str) -> Result<Option<Transaction>, LedgerError> {
        let removed = self.get(id).cloned();

        let next: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.id != id)
            .cloned()
            .collect();
        self.commit(next).await?;

        match &removed {
            Some(_) => log::debug!("Deleted transaction {}", id),
            None => log::debug!("Delete of unknown transaction {} ignored", id),
        }
        Ok(removed)
    }

    /// Handle a form submission: update the record being edited, or add a new
    /// one when nothing is being edited.
    pub async fn submit(
        &mut self,
        editing: Option<&str>,
        input: TransactionInput,
    ) -> Result<Transaction, LedgerError> {
        match editing {
            Some(id) => self.update(id, input).await,
            None => self.add(input).await,
        }
    }

    /// Append already-built records after the existing ones, with a single
    /// write. Callers are responsible for id uniqueness and record validity.
    pub async fn merge(&mut self, records: Vec<Transaction>) -> Result<usize, LedgerError> {
        let count = records.len();
        if count == 0 {
            return Ok(0);
        }

        let mut next = self.transactions.clone();
        next.extend(records);
        self.commit(next).await?;

        log::info!("Merged {} transaction(s)", count);
        Ok(count)
    }

    // ========================
    // Queries
    // ========================

    /// Records matching `filter`, newest date first. Records sharing a date
    /// keep storage order, so the most recently added comes first.
    pub fn list(&self, filter: &CategoryFilter) -> Vec<Transaction> {
        newest_first(&self.transactions, filter)
    }

    /// Income, expense and balance totals over the whole ledger.
    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Write `next` to the store, then adopt it as the current state.
    async fn commit(&mut self, next: Vec<Transaction>) -> Result<(), LedgerError> {
        let summary = summarize(&next).ok_or(InvalidInput::TotalsOutOfRange)?;
        let json = serde_json::to_string(&next).context("Failed to encode transactions")?;
        self.store.set(TRANSACTIONS_KEY, &json).await?;
        self.transactions = next;
        self.summary = summary;
        Ok(())
    }
}

// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use chrono::NaiveDate;
use pocketbook::{
    Category, KeyValueStore, Ledger, MemoryStore, SqliteStore, TransactionInput, TransactionType,
};
use tempfile::TempDir;

/// Helper to create a ledger over a fresh on-disk database
pub async fn test_ledger() -> Result<(Ledger<SqliteStore>, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let store = SqliteStore::create_at(db_path.to_str().unwrap()).await?;
    let ledger = Ledger::load(store).await?;
    Ok((ledger, temp_dir))
}

/// Load a second, independent ledger from the same database
pub async fn reopen(temp_dir: &TempDir) -> Result<Ledger<SqliteStore>> {
    let db_path = temp_dir.path().join("test.db");
    let store = SqliteStore::open_at(db_path.to_str().unwrap()).await?;
    Ok(Ledger::load(store).await?)
}

/// Helper to parse a YYYY-MM-DD date string
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

pub fn coffee() -> TransactionInput {
    TransactionInput::new(
        "Coffee",
        450,
        TransactionType::Expense,
        Category::Food,
        parse_date("2024-01-15"),
    )
}

pub fn latte() -> TransactionInput {
    TransactionInput::new(
        "Latte",
        500,
        TransactionType::Expense,
        Category::Food,
        parse_date("2024-01-15"),
    )
}

pub fn paycheck() -> TransactionInput {
    TransactionInput::new(
        "Paycheck",
        200000,
        TransactionType::Income,
        Category::Other,
        parse_date("2024-01-01"),
    )
}

/// Store whose writes can be made to fail on demand
#[derive(Clone, Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    failing: Arc<AtomicBool>,
}

impl FlakyStore {
    pub fn fail_writes(&self, fail: bool) {
        self.failing.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("quota exceeded");
        }
        self.inner.set(key, value).await
    }
}

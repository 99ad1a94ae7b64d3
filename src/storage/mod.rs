use anyhow::Result;

mod memory;
mod sqlite;

pub use memory::*;
pub use sqlite::*;

/// SQL migration for initial schema
pub const MIGRATION_001_INITIAL: &str = include_str!("migrations/001_initial.sql");

/// Key holding the JSON array of all transactions
pub const TRANSACTIONS_KEY: &str = "transactions";

/// Key holding the color scheme preference
pub const THEME_KEY: &str = "theme";

/// A string key-value store. Values are replaced wholesale on every write.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;
}

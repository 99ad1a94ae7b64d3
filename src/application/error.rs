use thiserror::Error;

use crate::domain::InvalidInput;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid transaction: {0}")]
    Validation(#[from] InvalidInput),

    #[error("Transaction not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0:#}")]
    Persistence(#[from] anyhow::Error),
}

impl LedgerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }
}

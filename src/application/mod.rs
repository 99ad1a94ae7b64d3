// Application layer - the ledger service and preference access.
// Any front end (CLI, tests, a future TUI) drives the ledger through here.

pub mod error;
pub mod preferences;
pub mod service;

pub use error::*;
pub use preferences::*;
pub use service::*;

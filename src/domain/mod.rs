mod category;
mod ledger;
mod money;
mod theme;
mod transaction;

pub use category::*;
pub use ledger::*;
pub use money::*;
pub use theme::*;
pub use transaction::*;

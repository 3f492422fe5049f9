//! Score accumulation.

pub mod ledger;

pub use ledger::{LedgerError, ScoreLedger};

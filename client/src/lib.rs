//! Client-side tooling for launching an SPL token with Metaplex metadata.
//!
//! Includes the ledger abstraction, the two launch stages, per-program contexts, and logging.

pub mod config;
pub mod context;
pub mod error;
pub mod explorer;
pub mod launch;
pub mod ledger;
pub mod logs;
pub mod mollusk_helpers;
pub mod pda;
pub mod stages;
pub mod test_accounts;
pub mod transactions;

pub use logs::LogColor;

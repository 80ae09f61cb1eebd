//! Per-program client contexts. Each one builds instructions for its program, submits them
//! through a [`Ledger`](crate::ledger::Ledger), and decodes the resulting account state.

pub mod counter;
pub mod token;
pub mod token_wrapper;

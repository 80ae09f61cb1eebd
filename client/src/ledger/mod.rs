//! The ledger seam: everything the launch flow needs from a cluster, behind one trait so the same
//! stages run against a live RPC node, an in-process SVM, or a scripted simulation.

mod mollusk;
mod rpc;
mod simulated;

pub use mollusk::MolluskLedger;
pub use rpc::RpcLedger;
pub use simulated::SimulatedLedger;
use solana_account::Account;
use solana_address::Address;
use solana_sdk::{
    message::Instruction,
    signature::{
        Keypair,
        Signature,
    },
};

pub trait Ledger {
    /// Lamports an account of `data_len` bytes needs to be rent exempt.
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> anyhow::Result<u64>;

    /// Signs `instructions` with `payer` (the fee payer) and `signers`, submits them as a single
    /// transaction, and waits for confirmation.
    async fn send_and_confirm(
        &self,
        payer: &Keypair,
        signers: &[&Keypair],
        instructions: &[Instruction],
    ) -> anyhow::Result<Signature>;

    /// Fetches an account, returning `None` if it doesn't exist.
    async fn get_account(&self, address: &Address) -> anyhow::Result<Option<Account>>;
}

//! Transaction assembly shared by every ledger backend: optional compute budget instructions are
//! prepended, then the payer and co-signers sign over a blockhash.

use anyhow::Context;
use solana_compute_budget_interface::ComputeBudgetInstruction;
use solana_sdk::{
    hash::Hash,
    message::{
        Instruction,
        Message,
    },
    signature::{
        Keypair,
        Signer,
    },
    transaction::Transaction,
};

/// Lamports requested when airdropping to a fresh payer on a test cluster.
pub const DEFAULT_FUND_AMOUNT: u64 = 10_000_000_000;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SendTransactionConfig {
    pub compute_unit_limit: Option<u32>,
    /// Priority fee in micro-lamports per compute unit. Only sent alongside a unit limit.
    pub compute_unit_price: Option<u64>,
}

/// Prepends the compute budget instructions described by `config` to `instructions`.
pub fn compose_instructions(
    instructions: &[Instruction],
    config: &SendTransactionConfig,
) -> Vec<Instruction> {
    let budget = config.compute_unit_limit.map_or(vec![], |limit| {
        vec![
            ComputeBudgetInstruction::set_compute_unit_limit(limit),
            ComputeBudgetInstruction::set_compute_unit_price(config.compute_unit_price.unwrap_or(1)),
        ]
    });
    [budget, instructions.to_vec()].concat()
}

/// Builds and signs a transaction paid for by `payer`. Fails if an instruction requires a
/// signature that neither `payer` nor `signers` can provide.
pub fn build_transaction(
    payer: &Keypair,
    signers: &[&Keypair],
    instructions: &[Instruction],
    blockhash: Hash,
    config: &SendTransactionConfig,
) -> anyhow::Result<Transaction> {
    let msg = Message::new(
        &compose_instructions(instructions, config),
        Some(&payer.pubkey()),
    );

    let mut tx = Transaction::new_unsigned(msg);
    tx.try_sign(
        &[std::iter::once(payer)
            .chain(signers.iter().cloned())
            .collect::<Vec<_>>()]
        .concat(),
        blockhash,
    )
    .context("Failed to sign transaction")?;

    Ok(tx)
}

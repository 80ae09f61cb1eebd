use anyhow::Context;
use colored::Colorize;
use launch_interface::program_ids::ProgramIds;
use solana_account::Account;
use solana_address::Address;
use solana_client::{
    client_error::{
        ClientError,
        ClientErrorKind,
    },
    nonblocking::rpc_client::RpcClient,
    rpc_response::RpcSimulateTransactionResult,
};
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{
    message::Instruction,
    signature::{
        Keypair,
        Signature,
        Signer,
    },
};

use crate::{
    ledger::Ledger,
    logs::{
        log_error,
        log_info,
        log_success,
        LogColor,
    },
    transactions::{
        build_transaction,
        compose_instructions,
        SendTransactionConfig,
        DEFAULT_FUND_AMOUNT,
    },
};

/// A [`Ledger`] backed by a JSON RPC node. Every read and confirmation uses the `confirmed`
/// commitment level.
pub struct RpcLedger {
    rpc: RpcClient,
    program_ids: ProgramIds,
    config: SendTransactionConfig,
}

impl RpcLedger {
    pub fn new(url: impl Into<String>, program_ids: ProgramIds) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(url.into(), CommitmentConfig::confirmed()),
            program_ids,
            config: SendTransactionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SendTransactionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn url(&self) -> String {
        self.rpc.url()
    }

    /// Airdrops [`DEFAULT_FUND_AMOUNT`] lamports to `address`. Only works on clusters with a
    /// faucet.
    pub async fn fund_account(&self, address: &Address) -> anyhow::Result<()> {
        let airdrop_signature = self
            .rpc
            .request_airdrop(address, DEFAULT_FUND_AMOUNT)
            .await
            .context("Failed to request airdrop")?;

        let mut i = 0;
        // Wait for airdrop confirmation.
        while !self
            .rpc
            .confirm_transaction(&airdrop_signature)
            .await
            .context("Couldn't confirm transaction")?
            && i < 10
        {
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;
            i += 1;
        }

        Ok(())
    }
}

impl Ledger for RpcLedger {
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> anyhow::Result<u64> {
        self.rpc
            .get_minimum_balance_for_rent_exemption(data_len)
            .await
            .context("Failed to fetch the rent-exempt minimum")
    }

    async fn send_and_confirm(
        &self,
        payer: &Keypair,
        signers: &[&Keypair],
        instructions: &[Instruction],
    ) -> anyhow::Result<Signature> {
        let bh = self
            .rpc
            .get_latest_blockhash()
            .await
            .context("Failed to fetch the latest blockhash")?;
        let tx = build_transaction(payer, signers, instructions, bh, &self.config)?;

        match self.rpc.send_and_confirm_transaction(&tx).await {
            Ok(sig) => {
                let sender_info = format!("{}: {}", "sender".color(LogColor::Gray), payer.pubkey());
                log_success("Signature", format!("{sig}\n{sender_info}"));
                Ok(sig)
            }
            Err(error) => {
                let sent = compose_instructions(instructions, &self.config);
                log_instruction_error(&error, &sent, &self.program_ids);
                log_info("Payer", payer.pubkey());

                Err(error).context("Failed transaction submission")
            }
        }
    }

    async fn get_account(&self, address: &Address) -> anyhow::Result<Option<Account>> {
        Ok(self
            .rpc
            .get_account_with_commitment(address, self.rpc.commitment())
            .await
            .with_context(|| format!("Failed to fetch account {address}"))?
            .value)
    }
}

/// Logs which instruction a preflight simulation failed on, the program it targeted, and the
/// simulation's program logs.
pub fn log_instruction_error(
    error: &ClientError,
    instructions: &[Instruction],
    program_ids: &ProgramIds,
) {
    use solana_client::rpc_request::{
        RpcError::RpcResponseError,
        RpcResponseErrorData,
    };
    use solana_instruction_error::InstructionError;
    use solana_transaction_error::TransactionError;

    let kind = error.kind();
    let ClientErrorKind::RpcError(RpcResponseError {
        data:
            RpcResponseErrorData::SendTransactionPreflightFailure(RpcSimulateTransactionResult {
                err: Some(ui_err),
                logs,
                ..
            }),
        ..
    }) = kind
    else {
        log_error("Transaction error", error);
        return;
    };

    let tx_error: TransactionError = ui_err.clone().into();
    match tx_error {
        TransactionError::InstructionError(ixn_idx, ixn_error) => {
            let program = instructions
                .get(ixn_idx as usize)
                .map(|ix| program_ids.name_of(&ix.program_id))
                .unwrap_or("unknown program");
            let msg = match ixn_error {
                InstructionError::Custom(code) => format!("custom program error {code:#x}"),
                other => other.to_string(),
            };
            log_error(
                "Instruction error",
                format!("instruction {ixn_idx} ({program}): {msg}"),
            );
        }
        other => log_error("Transaction error", other),
    }

    for line in logs.iter().flatten() {
        eprintln!("  {}", line.color(LogColor::Gray));
    }
}

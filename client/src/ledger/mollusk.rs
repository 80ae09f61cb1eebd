use std::collections::HashMap;

use launch_interface::token_wrapper::TokenWrapper;
use mollusk_svm::MolluskContext;
use solana_account::Account;
use solana_address::Address;
use solana_sdk::{
    hash::Hash,
    message::Instruction,
    signature::{
        Keypair,
        Signature,
    },
};

use crate::{
    ledger::Ledger,
    mollusk_helpers::new_token_mollusk_context,
    transactions::{
        build_transaction,
        SendTransactionConfig,
    },
};

/// A [`Ledger`] that executes instructions in-process against the real SPL token program.
///
/// Transactions are still signed, so a missing signer fails the same way it would on a cluster.
/// A failed chain leaves the account store untouched.
pub struct MolluskLedger {
    context: MolluskContext<HashMap<Address, Account>>,
    token_wrapper: Option<TokenWrapper>,
}

impl MolluskLedger {
    pub fn new(accounts: Vec<(Address, Account)>) -> Self {
        Self {
            context: new_token_mollusk_context(accounts),
            token_wrapper: None,
        }
    }

    /// Also runs the token-wrapper program deployed at `program_id`: each of its instructions
    /// executes as the token instruction the wrapper forwards it to.
    pub fn with_token_wrapper(mut self, program_id: Address) -> Self {
        self.token_wrapper = Some(TokenWrapper::new(program_id, spl_token_interface::ID));
        self
    }

    pub fn context(&self) -> &MolluskContext<HashMap<Address, Account>> {
        &self.context
    }

    fn resolve(&self, ix: &Instruction) -> anyhow::Result<Instruction> {
        match &self.token_wrapper {
            Some(wrapper) if ix.program_id == wrapper.program_id => {
                Ok(wrapper.token_instruction(ix)?)
            }
            _ => Ok(ix.clone()),
        }
    }
}

impl Ledger for MolluskLedger {
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> anyhow::Result<u64> {
        Ok(self.context.mollusk.sysvars.rent.minimum_balance(data_len))
    }

    async fn send_and_confirm(
        &self,
        payer: &Keypair,
        signers: &[&Keypair],
        instructions: &[Instruction],
    ) -> anyhow::Result<Signature> {
        let tx = build_transaction(
            payer,
            signers,
            instructions,
            Hash::default(),
            &SendTransactionConfig::default(),
        )?;

        let instructions = instructions
            .iter()
            .map(|ix| self.resolve(ix))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let snapshot = self.context.account_store.borrow().clone();
        let result = self.context.process_instruction_chain(&instructions);
        if !result.program_result.is_ok() {
            *self.context.account_store.borrow_mut() = snapshot;
            anyhow::bail!("Transaction failed: {:?}", result.program_result);
        }

        Ok(tx.signatures[0])
    }

    async fn get_account(&self, address: &Address) -> anyhow::Result<Option<Account>> {
        Ok(self
            .context
            .account_store
            .borrow()
            .get(address)
            .filter(|account| account.lamports > 0)
            .cloned())
    }
}

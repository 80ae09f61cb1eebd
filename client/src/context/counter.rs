use launch_interface::counter::{
    self as instructions,
    CounterAccount,
};
use solana_address::Address;
use solana_sdk::signature::{
    Keypair,
    Signature,
    Signer,
};

use crate::{
    error::{
        LaunchError,
        LaunchResult,
        Stage,
    },
    ledger::Ledger,
};

/// Client for one deployment of the counter program.
#[derive(Clone, Copy, Debug)]
pub struct CounterContext {
    pub program_id: Address,
}

impl CounterContext {
    pub const fn new(program_id: Address) -> Self {
        Self { program_id }
    }

    /// Creates the counter account at `counter`'s address with a count of zero, paid for by
    /// `user`.
    pub async fn initialize<L: Ledger>(
        &self,
        ledger: &L,
        user: &Keypair,
        counter: &Keypair,
    ) -> LaunchResult<Signature> {
        let ix = instructions::initialize(&self.program_id, &counter.pubkey(), &user.pubkey());
        ledger
            .send_and_confirm(user, &[counter], &[ix])
            .await
            .map_err(LaunchError::network(Stage::Counter))
    }

    pub async fn increment<L: Ledger>(
        &self,
        ledger: &L,
        user: &Keypair,
        counter: &Address,
    ) -> LaunchResult<Signature> {
        let ix = instructions::increment(&self.program_id, counter, &user.pubkey());
        ledger
            .send_and_confirm(user, &[], &[ix])
            .await
            .map_err(LaunchError::network(Stage::Counter))
    }

    pub async fn decrement<L: Ledger>(
        &self,
        ledger: &L,
        user: &Keypair,
        counter: &Address,
    ) -> LaunchResult<Signature> {
        let ix = instructions::decrement(&self.program_id, counter, &user.pubkey());
        ledger
            .send_and_confirm(user, &[], &[ix])
            .await
            .map_err(LaunchError::network(Stage::Counter))
    }

    /// Fetches and decodes the counter account at `counter`.
    pub async fn fetch<L: Ledger>(&self, ledger: &L, counter: &Address) -> LaunchResult<u64> {
        let account = ledger
            .get_account(counter)
            .await
            .map_err(LaunchError::network(Stage::FetchAccount))?
            .ok_or_else(|| LaunchError::Precondition(format!("counter {counter} not found")))?;
        if account.owner != self.program_id {
            return Err(LaunchError::Precondition(format!(
                "counter {counter} isn't owned by {}",
                self.program_id
            )));
        }
        CounterAccount::unpack(&account.data)
            .map(|state| state.count)
            .map_err(|e| LaunchError::Precondition(format!("counter {counter}: {e}")))
    }
}

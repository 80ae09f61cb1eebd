//! A scripted ledger that models just enough of the system, token, token-metadata and counter
//! programs to run the launch stages without a validator.

use std::{
    cell::{
        Cell,
        RefCell,
    },
    collections::HashMap,
};

use anyhow::{
    anyhow,
    bail,
    Context,
};
use launch_interface::{
    counter::{
        CounterAccount,
        CounterInstruction,
        COUNTER_ACCOUNT_LEN,
    },
    metadata::{
        CreateMetadataAccountArgsV3,
        MetadataAccount,
        MAX_METADATA_LEN,
    },
    program_ids::{
        ProgramIds,
        COMPUTE_BUDGET_ID,
    },
};
use solana_account::Account;
use solana_address::Address;
use solana_sdk::{
    hash::Hash,
    message::Instruction,
    program_pack::Pack,
    rent::Rent,
    signature::{
        Keypair,
        Signature,
        Signer,
    },
    transaction::Transaction,
};
use solana_system_interface::instruction::SystemInstruction;
use spl_token_interface::{
    instruction::TokenInstruction,
    state::Mint,
};

use crate::{
    ledger::Ledger,
    pda::find_metadata_address,
    transactions::{
        build_transaction,
        SendTransactionConfig,
    },
};

type Accounts = HashMap<Address, Account>;

/// A [`Ledger`] that executes a small model of each program it knows about.
///
/// Every transaction applies to a working copy of the accounts that is committed only if all of
/// its instructions succeed. The fee payer is charged [`Self::LAMPORTS_PER_SIGNATURE`] per
/// signature whether or not the instructions succeed. Every signed submission is recorded.
pub struct SimulatedLedger {
    program_ids: ProgramIds,
    counter_program: Option<Address>,
    rent: Rent,
    accounts: RefCell<Accounts>,
    submissions: RefCell<Vec<Transaction>>,
    fail_rent_queries: Cell<bool>,
}

impl SimulatedLedger {
    pub const LAMPORTS_PER_SIGNATURE: u64 = 5_000;

    pub fn new(program_ids: ProgramIds) -> Self {
        Self {
            program_ids,
            counter_program: None,
            rent: Rent::default(),
            accounts: RefCell::default(),
            submissions: RefCell::default(),
            fail_rent_queries: Cell::new(false),
        }
    }

    /// Also models the counter program deployed at `program_id`.
    pub fn with_counter_program(mut self, program_id: Address) -> Self {
        self.counter_program = Some(program_id);
        self
    }

    /// Creates or tops up a system-owned account.
    pub fn fund(&self, address: &Address, lamports: u64) {
        self.accounts
            .borrow_mut()
            .entry(*address)
            .or_insert_with(|| Account::new(0, 0, &self.program_ids.system))
            .lamports += lamports;
    }

    /// Replaces whatever is stored at `address`.
    pub fn set_account(&self, address: Address, account: Account) {
        self.accounts.borrow_mut().insert(address, account);
    }

    pub fn balance(&self, address: &Address) -> u64 {
        self.accounts
            .borrow()
            .get(address)
            .map_or(0, |account| account.lamports)
    }

    /// Makes every subsequent rent query fail, as an unreachable node would.
    pub fn fail_rent_queries(&self, fail: bool) {
        self.fail_rent_queries.set(fail);
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.borrow().len()
    }

    pub fn submissions(&self) -> Vec<Transaction> {
        self.submissions.borrow().clone()
    }

    fn execute(&self, accounts: &mut Accounts, ix: &Instruction) -> anyhow::Result<()> {
        let program_id = &ix.program_id;
        if program_id == &self.program_ids.system {
            self.execute_system(accounts, ix)
        } else if program_id == &self.program_ids.token {
            self.execute_token(accounts, ix)
        } else if program_id == &self.program_ids.metadata {
            self.execute_metadata(accounts, ix)
        } else if Some(*program_id) == self.counter_program {
            self.execute_counter(accounts, ix)
        } else if program_id == &COMPUTE_BUDGET_ID {
            Ok(())
        } else {
            bail!("Attempt to load a program that does not exist: {program_id}")
        }
    }

    fn execute_system(&self, accounts: &mut Accounts, ix: &Instruction) -> anyhow::Result<()> {
        let instruction: SystemInstruction =
            bincode::deserialize(&ix.data).context("Invalid system instruction data")?;
        match instruction {
            SystemInstruction::CreateAccount {
                lamports,
                space,
                owner,
            } => {
                let (from, to) = (account_at(ix, 0)?, account_at(ix, 1)?);
                if accounts.get(&to).is_some_and(is_live) {
                    bail!("Create account: account {to} already in use");
                }
                debit(accounts, &from, lamports)?;
                accounts.insert(to, Account::new(lamports, space as usize, &owner));
                Ok(())
            }
            SystemInstruction::Transfer { lamports } => {
                let (from, to) = (account_at(ix, 0)?, account_at(ix, 1)?);
                debit(accounts, &from, lamports)?;
                accounts
                    .entry(to)
                    .or_insert_with(|| Account::new(0, 0, &self.program_ids.system))
                    .lamports += lamports;
                Ok(())
            }
            other => bail!("Unsupported system instruction: {other:?}"),
        }
    }

    fn execute_token(&self, accounts: &mut Accounts, ix: &Instruction) -> anyhow::Result<()> {
        let instruction = TokenInstruction::unpack(&ix.data)
            .map_err(|e| anyhow!("Invalid token instruction data: {e}"))?;
        let TokenInstruction::InitializeMint2 {
            decimals,
            mint_authority,
            freeze_authority,
        } = instruction
        else {
            bail!("Unsupported token instruction");
        };

        let address = account_at(ix, 0)?;
        let account = accounts
            .get_mut(&address)
            .ok_or_else(|| anyhow!("Mint {address} not found"))?;
        if account.owner != self.program_ids.token {
            bail!("Mint {address} isn't owned by the token program");
        }
        if account.data.len() != Mint::LEN {
            bail!("Mint {address} has the wrong size");
        }
        if Mint::unpack_unchecked(&account.data).is_ok_and(|mint| mint.is_initialized) {
            bail!("Mint {address} is already initialized");
        }
        if !self.rent.is_exempt(account.lamports, account.data.len()) {
            bail!("Mint {address} isn't rent exempt");
        }

        let mint = Mint {
            mint_authority: Some(mint_authority).into(),
            supply: 0,
            decimals,
            is_initialized: true,
            freeze_authority,
        };
        Mint::pack(mint, &mut account.data).map_err(|e| anyhow!("Failed to pack mint: {e}"))?;
        Ok(())
    }

    fn execute_metadata(&self, accounts: &mut Accounts, ix: &Instruction) -> anyhow::Result<()> {
        let args = CreateMetadataAccountArgsV3::unpack_instruction_data(&ix.data)?;
        let metadata = account_at(ix, 0)?;
        let mint_address = account_at(ix, 1)?;
        let mint_authority = account_at(ix, 2)?;
        let payer = account_at(ix, 3)?;
        let update_authority = account_at(ix, 4)?;

        let (expected, _) = find_metadata_address(&mint_address, &self.program_ids.metadata);
        if metadata != expected {
            bail!("Metadata account {metadata} isn't derived from mint {mint_address}");
        }

        let mint_account = accounts
            .get(&mint_address)
            .filter(|account| is_live(account))
            .ok_or_else(|| anyhow!("AccountNotFound: mint {mint_address}"))?;
        if mint_account.owner != self.program_ids.token {
            bail!("Mint {mint_address} isn't owned by the token program");
        }
        let mint = Mint::unpack(&mint_account.data)
            .map_err(|e| anyhow!("Mint {mint_address} isn't an initialized mint: {e}"))?;
        if Option::<Address>::from(mint.mint_authority) != Some(mint_authority) {
            bail!("Invalid mint authority for {mint_address}");
        }

        if accounts.get(&metadata).is_some_and(is_live) {
            bail!("Metadata account {metadata} is already initialized");
        }
        args.data.validate()?;

        let lamports = self.rent.minimum_balance(MAX_METADATA_LEN);
        debit(accounts, &payer, lamports)?;
        let data = MetadataAccount::new(update_authority, mint_address, &args).pack()?;
        accounts.insert(
            metadata,
            Account {
                lamports,
                data,
                owner: self.program_ids.metadata,
                executable: false,
                rent_epoch: 0,
            },
        );
        Ok(())
    }

    fn execute_counter(&self, accounts: &mut Accounts, ix: &Instruction) -> anyhow::Result<()> {
        let counter = account_at(ix, 0)?;
        match CounterInstruction::unpack(&ix.data)? {
            CounterInstruction::Initialize => {
                let user = account_at(ix, 1)?;
                if accounts.get(&counter).is_some_and(is_live) {
                    bail!("Counter {counter} already in use");
                }
                let lamports = self.rent.minimum_balance(COUNTER_ACCOUNT_LEN);
                debit(accounts, &user, lamports)?;
                accounts.insert(
                    counter,
                    Account {
                        lamports,
                        data: CounterAccount::default().pack(),
                        owner: ix.program_id,
                        executable: false,
                        rent_epoch: 0,
                    },
                );
            }
            op @ (CounterInstruction::Increment | CounterInstruction::Decrement) => {
                let account = accounts
                    .get_mut(&counter)
                    .filter(|account| account.owner == ix.program_id)
                    .ok_or_else(|| anyhow!("AccountNotInitialized: counter {counter}"))?;
                let mut state = CounterAccount::unpack(&account.data)?;
                state.count = match op {
                    CounterInstruction::Increment => state.count.checked_add(1),
                    _ => state.count.checked_sub(1),
                }
                .ok_or_else(|| anyhow!("Counter {op} overflowed"))?;
                account.data = state.pack();
            }
        }
        Ok(())
    }
}

impl Ledger for SimulatedLedger {
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> anyhow::Result<u64> {
        if self.fail_rent_queries.get() {
            bail!("Failed to fetch the rent-exempt minimum: connection refused");
        }
        Ok(self.rent.minimum_balance(data_len))
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
        let signature = tx.signatures[0];
        let fee = Self::LAMPORTS_PER_SIGNATURE * tx.signatures.len() as u64;
        self.submissions.borrow_mut().push(tx);

        let mut working = self.accounts.borrow().clone();
        debit(&mut working, &payer.pubkey(), fee).context("Failed to pay the transaction fee")?;
        let charged = working.clone();

        for (i, ix) in instructions.iter().enumerate() {
            if let Err(e) = self.execute(&mut working, ix) {
                *self.accounts.borrow_mut() = charged;
                return Err(e.context(format!(
                    "Instruction {i} ({}) failed",
                    self.program_ids.name_of(&ix.program_id)
                )));
            }
        }
        *self.accounts.borrow_mut() = working;

        Ok(signature)
    }

    async fn get_account(&self, address: &Address) -> anyhow::Result<Option<Account>> {
        Ok(self
            .accounts
            .borrow()
            .get(address)
            .filter(|account| is_live(account))
            .cloned())
    }
}

fn is_live(account: &Account) -> bool {
    account.lamports > 0
}

fn account_at(ix: &Instruction, index: usize) -> anyhow::Result<Address> {
    ix.accounts
        .get(index)
        .map(|meta| meta.pubkey)
        .ok_or_else(|| anyhow!("NotEnoughAccountKeys: missing account {index}"))
}

fn debit(accounts: &mut Accounts, address: &Address, lamports: u64) -> anyhow::Result<()> {
    let account = accounts
        .get_mut(address)
        .ok_or_else(|| anyhow!("AccountNotFound: {address}"))?;
    account.lamports = account
        .lamports
        .checked_sub(lamports)
        .ok_or_else(|| anyhow!("Insufficient funds: {address} needs {lamports} lamports"))?;
    Ok(())
}

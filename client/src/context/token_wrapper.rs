//! Client for the token-wrapper program. Each call builds one wrapper instruction, submits it,
//! and waits for confirmation; token state is read back with
//! [`load_token_account`](crate::context::token::load_token_account).

use launch_interface::token_wrapper::TokenWrapper;
use solana_address::Address;
use solana_sdk::{
    message::Instruction,
    program_pack::Pack,
    signature::{
        Keypair,
        Signature,
        Signer,
    },
};
use solana_system_interface::instruction as system_instruction;
use spl_token_interface::state::Mint;

use crate::{
    error::{
        LaunchError,
        LaunchResult,
        Stage,
    },
    ledger::Ledger,
};

pub struct TokenWrapperContext {
    pub wrapper: TokenWrapper,
}

impl TokenWrapperContext {
    pub fn new(program_id: Address) -> Self {
        Self {
            wrapper: TokenWrapper::new(program_id, spl_token_interface::ID),
        }
    }

    async fn send<L: Ledger>(
        &self,
        ledger: &L,
        payer: &Keypair,
        signers: &[&Keypair],
        instructions: &[Instruction],
    ) -> LaunchResult<Signature> {
        ledger
            .send_and_confirm(payer, signers, instructions)
            .await
            .map_err(LaunchError::network(Stage::TokenWrapper))
    }

    /// Allocates `mint` and has the wrapper initialize it with `authority` as mint authority.
    pub async fn initialize<L: Ledger>(
        &self,
        ledger: &L,
        authority: &Keypair,
        mint: &Keypair,
        decimals: u8,
    ) -> LaunchResult<Signature> {
        let lamports = ledger
            .minimum_balance_for_rent_exemption(Mint::LEN)
            .await
            .map_err(LaunchError::network(Stage::RentQuery))?;
        let instructions = [
            system_instruction::create_account(
                &authority.pubkey(),
                &mint.pubkey(),
                lamports,
                Mint::LEN as u64,
                &self.wrapper.token_program,
            ),
            self.wrapper
                .initialize(&mint.pubkey(), &authority.pubkey(), decimals),
        ];
        self.send(ledger, authority, &[mint], &instructions).await
    }

    pub async fn mint_tokens<L: Ledger>(
        &self,
        ledger: &L,
        authority: &Keypair,
        mint: &Address,
        token_account: &Address,
        amount: u64,
    ) -> LaunchResult<Signature> {
        let ix = self
            .wrapper
            .mint_tokens(mint, token_account, &authority.pubkey(), amount);
        self.send(ledger, authority, &[], &[ix]).await
    }

    pub async fn transfer_tokens<L: Ledger>(
        &self,
        ledger: &L,
        owner: &Keypair,
        from: &Address,
        to: &Address,
        amount: u64,
    ) -> LaunchResult<Signature> {
        let ix = self
            .wrapper
            .transfer_tokens(from, to, &owner.pubkey(), amount);
        self.send(ledger, owner, &[], &[ix]).await
    }

    pub async fn burn_tokens<L: Ledger>(
        &self,
        ledger: &L,
        owner: &Keypair,
        mint: &Address,
        token_account: &Address,
        amount: u64,
    ) -> LaunchResult<Signature> {
        let ix = self
            .wrapper
            .burn_tokens(mint, token_account, &owner.pubkey(), amount);
        self.send(ledger, owner, &[], &[ix]).await
    }

    pub async fn freeze_account<L: Ledger>(
        &self,
        ledger: &L,
        freeze_authority: &Keypair,
        token_account: &Address,
        mint: &Address,
    ) -> LaunchResult<Signature> {
        let ix = self
            .wrapper
            .freeze_account(token_account, mint, &freeze_authority.pubkey());
        self.send(ledger, freeze_authority, &[], &[ix]).await
    }

    pub async fn thaw_account<L: Ledger>(
        &self,
        ledger: &L,
        freeze_authority: &Keypair,
        token_account: &Address,
        mint: &Address,
    ) -> LaunchResult<Signature> {
        let ix = self
            .wrapper
            .thaw_account(token_account, mint, &freeze_authority.pubkey());
        self.send(ledger, freeze_authority, &[], &[ix]).await
    }

    pub async fn approve_tokens<L: Ledger>(
        &self,
        ledger: &L,
        owner: &Keypair,
        token_account: &Address,
        delegate: &Address,
        amount: u64,
    ) -> LaunchResult<Signature> {
        let ix = self
            .wrapper
            .approve_tokens(token_account, delegate, &owner.pubkey(), amount);
        self.send(ledger, owner, &[], &[ix]).await
    }

    pub async fn revoke_tokens<L: Ledger>(
        &self,
        ledger: &L,
        owner: &Keypair,
        token_account: &Address,
    ) -> LaunchResult<Signature> {
        let ix = self.wrapper.revoke_tokens(token_account, &owner.pubkey());
        self.send(ledger, owner, &[], &[ix]).await
    }

    pub async fn close_token_account<L: Ledger>(
        &self,
        ledger: &L,
        owner: &Keypair,
        token_account: &Address,
        destination: &Address,
    ) -> LaunchResult<Signature> {
        let ix = self
            .wrapper
            .close_token_account(token_account, destination, &owner.pubkey());
        self.send(ledger, owner, &[], &[ix]).await
    }
}

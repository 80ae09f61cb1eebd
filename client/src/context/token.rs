//! Token-level context containing mint metadata and helpers for creating token accounts and
//! building token instructions.

use solana_account::Account;
use solana_address::Address;
use solana_instruction::Instruction;
use solana_sdk::{
    program_pack::Pack,
    signature::{
        Keypair,
        Signature,
        Signer,
    },
};
use solana_system_interface::instruction as system_instruction;
use spl_token_interface::{
    instruction::{
        initialize_account3,
        mint_to_checked,
    },
    state::{
        Account as TokenAccount,
        Mint,
    },
};

use crate::{
    error::{
        LaunchError,
        LaunchResult,
        Stage,
    },
    ledger::Ledger,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TokenContext {
    pub mint_authority: Option<Address>,
    pub freeze_authority: Option<Address>,
    pub mint_address: Address,
    pub token_program: Address,
    pub mint_decimals: u8,
    pub supply: u64,
}

impl TokenContext {
    /// Creates a [`TokenContext`] from an on-chain mint account.
    ///
    /// Validates that the owner is the SPL token program and unpacks the mint to extract the
    /// decimals and authorities.
    pub fn from_account(mint_address: Address, account: &Account) -> LaunchResult<Self> {
        if account.owner != spl_token_interface::ID {
            return Err(LaunchError::Precondition(format!(
                "{mint_address} is owned by {}, not the token program",
                account.owner
            )));
        }
        let mint = Mint::unpack(&account.data).map_err(|e| {
            LaunchError::Precondition(format!("{mint_address} isn't an initialized mint: {e}"))
        })?;
        Ok(Self {
            mint_authority: mint.mint_authority.into(),
            freeze_authority: mint.freeze_authority.into(),
            mint_address,
            token_program: account.owner,
            mint_decimals: mint.decimals,
            supply: mint.supply,
        })
    }

    /// Fetches and decodes the mint at `mint_address`.
    pub async fn load<L: Ledger>(ledger: &L, mint_address: Address) -> LaunchResult<Self> {
        let account = ledger
            .get_account(&mint_address)
            .await
            .map_err(LaunchError::network(Stage::FetchAccount))?
            .ok_or_else(|| LaunchError::Precondition(format!("mint {mint_address} not found")))?;
        Self::from_account(mint_address, &account)
    }

    /// Builds the instructions that allocate `token_account` and initialize it for this mint,
    /// owned by `owner`.
    pub fn create_token_account(
        &self,
        funder: &Address,
        token_account: &Address,
        owner: &Address,
        lamports: u64,
    ) -> LaunchResult<[Instruction; 2]> {
        Ok([
            system_instruction::create_account(
                funder,
                token_account,
                lamports,
                TokenAccount::LEN as u64,
                &self.token_program,
            ),
            initialize_account3(
                &self.token_program,
                token_account,
                &self.mint_address,
                owner,
            )
            .map_err(|e| LaunchError::config(format!("initialize_account3: {e}")))?,
        ])
    }

    /// Builds a `mint_to_checked` instruction that mints `amount` tokens to `destination`.
    pub fn mint_to(&self, destination: &Address, amount: u64) -> LaunchResult<Instruction> {
        let Some(ref mint_authority) = self.mint_authority else {
            return Err(LaunchError::Precondition(format!(
                "mint {} doesn't have a mint authority",
                self.mint_address
            )));
        };
        mint_to_checked(
            &self.token_program,
            &self.mint_address,
            destination,
            mint_authority,
            &[],
            amount,
            self.mint_decimals,
        )
        .map_err(|e| LaunchError::config(format!("mint_to_checked: {e}")))
    }

    /// Creates a token account for this mint owned by `payer`, then mints `amount` into it.
    /// `payer` must be the mint authority.
    pub async fn create_and_mint<L: Ledger>(
        &self,
        ledger: &L,
        payer: &Keypair,
        token_account: &Keypair,
        amount: u64,
    ) -> LaunchResult<Signature> {
        let lamports = ledger
            .minimum_balance_for_rent_exemption(TokenAccount::LEN)
            .await
            .map_err(LaunchError::network(Stage::RentQuery))?;

        let [create, initialize] = self.create_token_account(
            &payer.pubkey(),
            &token_account.pubkey(),
            &payer.pubkey(),
            lamports,
        )?;
        ledger
            .send_and_confirm(payer, &[token_account], &[create, initialize])
            .await
            .map_err(LaunchError::network(Stage::CreateTokenAccount))?;

        let mint_to = self.mint_to(&token_account.pubkey(), amount)?;
        ledger
            .send_and_confirm(payer, &[], &[mint_to])
            .await
            .map_err(LaunchError::network(Stage::MintTokens))
    }
}

/// Fetches and decodes an SPL token account.
pub async fn load_token_account<L: Ledger>(
    ledger: &L,
    address: &Address,
) -> LaunchResult<TokenAccount> {
    let account = ledger
        .get_account(address)
        .await
        .map_err(LaunchError::network(Stage::FetchAccount))?
        .ok_or_else(|| LaunchError::Precondition(format!("token account {address} not found")))?;
    TokenAccount::unpack(&account.data).map_err(|e| {
        LaunchError::Precondition(format!("{address} isn't an initialized token account: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use solana_sdk::rent::Rent;

    use super::*;

    fn mint_account(authority: Option<Address>, decimals: u8) -> Account {
        let mut account = Account::new(
            Rent::default().minimum_balance(Mint::LEN),
            Mint::LEN,
            &spl_token_interface::ID,
        );
        let mint = Mint {
            mint_authority: authority.into(),
            supply: 0,
            decimals,
            is_initialized: true,
            freeze_authority: authority.into(),
        };
        Mint::pack(mint, &mut account.data).unwrap();
        account
    }

    #[test]
    fn decodes_mint_account() {
        let authority = Address::new_unique();
        let mint = Address::new_unique();
        let ctx = TokenContext::from_account(mint, &mint_account(Some(authority), 6)).unwrap();
        assert_eq!(ctx.mint_decimals, 6);
        assert_eq!(ctx.mint_authority, Some(authority));
        assert_eq!(ctx.freeze_authority, Some(authority));
        assert_eq!(ctx.token_program, spl_token_interface::ID);
    }

    #[test]
    fn rejects_non_mints() {
        let mint = Address::new_unique();
        let mut account = mint_account(None, 6);
        account.owner = Address::new_unique();
        assert!(matches!(
            TokenContext::from_account(mint, &account),
            Err(LaunchError::Precondition(_))
        ));

        let empty = Account::new(1, Mint::LEN, &spl_token_interface::ID);
        assert!(matches!(
            TokenContext::from_account(mint, &empty),
            Err(LaunchError::Precondition(_))
        ));
    }

    #[test]
    fn mint_to_requires_authority() {
        let ctx = TokenContext::from_account(Address::new_unique(), &mint_account(None, 6)).unwrap();
        assert!(ctx.mint_to(&Address::new_unique(), 1).is_err());
    }
}

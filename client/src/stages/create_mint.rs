use launch_interface::program_ids::ProgramIds;
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
use spl_token_interface::{
    instruction::initialize_mint2,
    state::Mint,
};

use crate::{
    config::MINT_DECIMALS,
    context::token::TokenContext,
    error::{
        LaunchError,
        LaunchResult,
        Stage,
    },
    ledger::Ledger,
    logs::{
        log_info,
        log_success,
    },
};

/// A freshly generated mint keypair that hasn't been submitted yet.
pub struct MintPending {
    mint: Keypair,
}

/// A mint that exists on-chain, either because this run confirmed its creation or because it was
/// loaded with [`ConfirmedMint::from_existing`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfirmedMint {
    pub address: Address,
    pub mint_authority: Option<Address>,
    pub freeze_authority: Option<Address>,
    pub decimals: u8,
    /// The creation signature. `None` for a loaded mint.
    pub signature: Option<Signature>,
}

impl MintPending {
    pub fn generate() -> Self {
        Self::from_keypair(Keypair::new())
    }

    pub fn from_keypair(mint: Keypair) -> Self {
        Self { mint }
    }

    pub fn address(&self) -> Address {
        self.mint.pubkey()
    }

    /// Submits the create + initialize transaction and waits for it to confirm.
    ///
    /// The rent-exempt minimum is queried first; if that fails nothing is submitted.
    pub async fn create<L: Ledger>(
        self,
        ledger: &L,
        payer: &Keypair,
        program_ids: &ProgramIds,
    ) -> LaunchResult<ConfirmedMint> {
        let lamports = ledger
            .minimum_balance_for_rent_exemption(Mint::LEN)
            .await
            .map_err(LaunchError::network(Stage::RentQuery))?;

        let address = self.address();
        log_info("Creating mint", address);
        let instructions =
            create_mint_instructions(&payer.pubkey(), &address, lamports, program_ids)?;
        let signature = ledger
            .send_and_confirm(payer, &[&self.mint], &instructions)
            .await
            .map_err(LaunchError::network(Stage::CreateMint))?;
        log_success("Mint created", address);

        Ok(ConfirmedMint {
            address,
            mint_authority: Some(payer.pubkey()),
            freeze_authority: Some(payer.pubkey()),
            decimals: MINT_DECIMALS,
            signature: Some(signature),
        })
    }
}

impl ConfirmedMint {
    /// Loads an existing mint, e.g. one left behind by a run that failed after mint creation.
    pub async fn from_existing<L: Ledger>(ledger: &L, address: Address) -> LaunchResult<Self> {
        let token = TokenContext::load(ledger, address).await?;
        Ok(Self {
            address,
            mint_authority: token.mint_authority,
            freeze_authority: token.freeze_authority,
            decimals: token.mint_decimals,
            signature: None,
        })
    }
}

/// `create_account` sized and funded for a mint, followed by `initialize_mint2` with `payer` as
/// both mint and freeze authority.
pub fn create_mint_instructions(
    payer: &Address,
    mint: &Address,
    lamports: u64,
    program_ids: &ProgramIds,
) -> LaunchResult<[Instruction; 2]> {
    let initialize = initialize_mint2(
        &program_ids.token,
        mint,
        payer,
        Some(payer),
        MINT_DECIMALS,
    )
    .map_err(|e| LaunchError::config(format!("initialize_mint2: {e}")))?;

    Ok([
        system_instruction::create_account(
            payer,
            mint,
            lamports,
            Mint::LEN as u64,
            &program_ids.token,
        ),
        initialize,
    ])
}

/// Generates a mint keypair and creates the mint.
pub async fn create_mint<L: Ledger>(
    ledger: &L,
    payer: &Keypair,
    program_ids: &ProgramIds,
) -> LaunchResult<ConfirmedMint> {
    MintPending::generate()
        .create(ledger, payer, program_ids)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_layout() {
        let (payer, mint) = (Address::new_unique(), Address::new_unique());
        let ids = ProgramIds::default();
        let [create, initialize] = create_mint_instructions(&payer, &mint, 1_461_600, &ids).unwrap();

        assert_eq!(create.program_id, ids.system);
        assert_eq!(create.accounts[0].pubkey, payer);
        assert_eq!(create.accounts[1].pubkey, mint);
        assert!(create.accounts[1].is_signer);

        assert_eq!(initialize.program_id, ids.token);
        assert_eq!(initialize.accounts.len(), 1);
        assert_eq!(initialize.accounts[0].pubkey, mint);
    }

    #[test]
    fn mint_is_sized_for_mint_state() {
        assert_eq!(Mint::LEN, 82);
    }
}

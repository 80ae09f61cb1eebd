//! Instruction builders for the token-wrapper program: an Anchor program whose instructions each
//! forward to one SPL token instruction through CPI.

use solana_address::Address;
use solana_instruction::{
    AccountMeta,
    Instruction,
};
use spl_token_interface::instruction as token_instruction;

use crate::{
    anchor::{
        anchor_instruction,
        match_instruction,
    },
    error::DecodeError,
    program_ids::{
        RENT_SYSVAR_ID,
        SYSTEM_PROGRAM_ID,
    },
};

/// Every instruction name the wrapper program exposes.
pub const INSTRUCTION_NAMES: [&str; 9] = [
    "initialize",
    "mint_tokens",
    "transfer_tokens",
    "burn_tokens",
    "freeze_account",
    "thaw_account",
    "approve_tokens",
    "revoke_tokens",
    "close_token_account",
];

/// Builds instructions for one deployment of the wrapper program.
#[derive(Clone, Copy, Debug)]
pub struct TokenWrapper {
    pub program_id: Address,
    pub token_program: Address,
}

impl TokenWrapper {
    pub const fn new(program_id: Address, token_program: Address) -> Self {
        Self {
            program_id,
            token_program,
        }
    }

    /// Initializes an already allocated, token-program owned `mint` with `authority` as its mint
    /// authority.
    pub fn initialize(&self, mint: &Address, authority: &Address, decimals: u8) -> Instruction {
        anchor_instruction(
            &self.program_id,
            "initialize",
            &[decimals],
            vec![
                AccountMeta::new(*mint, false),
                AccountMeta::new_readonly(*authority, true),
                AccountMeta::new_readonly(RENT_SYSVAR_ID, false),
                AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
                AccountMeta::new_readonly(self.token_program, false),
            ],
        )
    }

    pub fn mint_tokens(
        &self,
        mint: &Address,
        token_account: &Address,
        authority: &Address,
        amount: u64,
    ) -> Instruction {
        anchor_instruction(
            &self.program_id,
            "mint_tokens",
            &amount.to_le_bytes(),
            vec![
                AccountMeta::new(*mint, false),
                AccountMeta::new(*token_account, false),
                AccountMeta::new_readonly(*authority, true),
                AccountMeta::new_readonly(self.token_program, false),
            ],
        )
    }

    pub fn transfer_tokens(
        &self,
        from: &Address,
        to: &Address,
        authority: &Address,
        amount: u64,
    ) -> Instruction {
        anchor_instruction(
            &self.program_id,
            "transfer_tokens",
            &amount.to_le_bytes(),
            vec![
                AccountMeta::new(*from, false),
                AccountMeta::new(*to, false),
                AccountMeta::new_readonly(*authority, true),
                AccountMeta::new_readonly(self.token_program, false),
            ],
        )
    }

    pub fn burn_tokens(
        &self,
        mint: &Address,
        token_account: &Address,
        authority: &Address,
        amount: u64,
    ) -> Instruction {
        anchor_instruction(
            &self.program_id,
            "burn_tokens",
            &amount.to_le_bytes(),
            vec![
                // Burning reduces supply, so the mint is written through the CPI.
                AccountMeta::new(*mint, false),
                AccountMeta::new(*token_account, false),
                AccountMeta::new_readonly(*authority, true),
                AccountMeta::new_readonly(self.token_program, false),
            ],
        )
    }

    pub fn freeze_account(
        &self,
        token_account: &Address,
        mint: &Address,
        freeze_authority: &Address,
    ) -> Instruction {
        self.freeze_or_thaw("freeze_account", token_account, mint, freeze_authority)
    }

    pub fn thaw_account(
        &self,
        token_account: &Address,
        mint: &Address,
        freeze_authority: &Address,
    ) -> Instruction {
        self.freeze_or_thaw("thaw_account", token_account, mint, freeze_authority)
    }

    fn freeze_or_thaw(
        &self,
        name: &str,
        token_account: &Address,
        mint: &Address,
        freeze_authority: &Address,
    ) -> Instruction {
        anchor_instruction(
            &self.program_id,
            name,
            &[],
            vec![
                AccountMeta::new(*token_account, false),
                AccountMeta::new_readonly(*mint, false),
                AccountMeta::new_readonly(*freeze_authority, true),
                AccountMeta::new_readonly(self.token_program, false),
            ],
        )
    }

    pub fn approve_tokens(
        &self,
        token_account: &Address,
        delegate: &Address,
        owner: &Address,
        amount: u64,
    ) -> Instruction {
        anchor_instruction(
            &self.program_id,
            "approve_tokens",
            &amount.to_le_bytes(),
            vec![
                AccountMeta::new(*token_account, false),
                AccountMeta::new_readonly(*delegate, false),
                AccountMeta::new_readonly(*owner, true),
                AccountMeta::new_readonly(self.token_program, false),
            ],
        )
    }

    pub fn revoke_tokens(&self, token_account: &Address, owner: &Address) -> Instruction {
        anchor_instruction(
            &self.program_id,
            "revoke_tokens",
            &[],
            vec![
                AccountMeta::new(*token_account, false),
                AccountMeta::new_readonly(*owner, true),
                AccountMeta::new_readonly(self.token_program, false),
            ],
        )
    }

    /// Closes `token_account`, sending its lamports to `destination`.
    pub fn close_token_account(
        &self,
        token_account: &Address,
        destination: &Address,
        owner: &Address,
    ) -> Instruction {
        anchor_instruction(
            &self.program_id,
            "close_token_account",
            &[],
            vec![
                AccountMeta::new(*token_account, false),
                AccountMeta::new(*destination, false),
                AccountMeta::new_readonly(*owner, true),
                AccountMeta::new_readonly(self.token_program, false),
            ],
        )
    }

    /// Decodes a wrapper instruction into the SPL token instruction it forwards to through CPI.
    ///
    /// The wrapper initializes mints with the authority as both mint and freeze authority.
    pub fn token_instruction(&self, ix: &Instruction) -> Result<Instruction, DecodeError> {
        let (name, args) =
            match_instruction(&ix.data, &INSTRUCTION_NAMES).ok_or(DecodeError::UnknownInstruction)?;
        let key = |index: usize| {
            ix.accounts
                .get(index)
                .map(|meta| meta.pubkey)
                .ok_or(DecodeError::MissingAccount(index))
        };
        let amount = || {
            <[u8; 8]>::try_from(args)
                .map(u64::from_le_bytes)
                .map_err(|_| DecodeError::Args {
                    expected: 8,
                    actual: args.len(),
                })
        };
        let token = &self.token_program;

        let forwarded = match name {
            "initialize" => {
                let [decimals] = <[u8; 1]>::try_from(args).map_err(|_| DecodeError::Args {
                    expected: 1,
                    actual: args.len(),
                })?;
                let (mint, authority) = (key(0)?, key(1)?);
                token_instruction::initialize_mint2(
                    token,
                    &mint,
                    &authority,
                    Some(&authority),
                    decimals,
                )
            }
            "mint_tokens" => {
                token_instruction::mint_to(token, &key(0)?, &key(1)?, &key(2)?, &[], amount()?)
            }
            "transfer_tokens" => {
                token_instruction::transfer(token, &key(0)?, &key(1)?, &key(2)?, &[], amount()?)
            }
            "burn_tokens" => {
                token_instruction::burn(token, &key(1)?, &key(0)?, &key(2)?, &[], amount()?)
            }
            "freeze_account" => {
                token_instruction::freeze_account(token, &key(0)?, &key(1)?, &key(2)?, &[])
            }
            "thaw_account" => {
                token_instruction::thaw_account(token, &key(0)?, &key(1)?, &key(2)?, &[])
            }
            "approve_tokens" => {
                token_instruction::approve(token, &key(0)?, &key(1)?, &key(2)?, &[], amount()?)
            }
            "revoke_tokens" => token_instruction::revoke(token, &key(0)?, &key(1)?, &[]),
            "close_token_account" => {
                token_instruction::close_account(token, &key(0)?, &key(1)?, &key(2)?, &[])
            }
            _ => return Err(DecodeError::UnknownInstruction),
        };
        forwarded.map_err(|e| DecodeError::TokenInstruction(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use spl_token_interface::instruction::TokenInstruction;

    use super::*;
    use crate::anchor::{
        instruction_discriminator,
        DISCRIMINATOR_LEN,
    };

    fn wrapper() -> TokenWrapper {
        TokenWrapper::new(Address::new_unique(), spl_token_interface::ID)
    }

    #[test]
    fn discriminators_are_distinct() {
        let unique: HashSet<_> = INSTRUCTION_NAMES
            .iter()
            .map(|name| instruction_discriminator(name))
            .collect();
        assert_eq!(unique.len(), INSTRUCTION_NAMES.len());
    }

    #[test]
    fn initialize_carries_decimals() {
        let wrapper = wrapper();
        let (mint, authority) = (Address::new_unique(), Address::new_unique());
        let ix = wrapper.initialize(&mint, &authority, 6);

        assert_eq!(ix.data.len(), DISCRIMINATOR_LEN + 1);
        assert_eq!(
            match_instruction(&ix.data, &INSTRUCTION_NAMES),
            Some(("initialize", [6u8].as_slice()))
        );
        assert_eq!(ix.accounts[0].pubkey, mint);
        assert!(ix.accounts[0].is_writable);
        assert!(ix.accounts[1].is_signer);
        assert_eq!(ix.accounts[2].pubkey, RENT_SYSVAR_ID);
        assert_eq!(ix.accounts[4].pubkey, spl_token_interface::ID);
    }

    #[test]
    fn mint_tokens_amount() {
        let wrapper = wrapper();
        let amount = 10_000_000_000_000u64;
        let ix = wrapper.mint_tokens(
            &Address::new_unique(),
            &Address::new_unique(),
            &Address::new_unique(),
            amount,
        );
        let (name, args) = match_instruction(&ix.data, &INSTRUCTION_NAMES).unwrap();
        assert_eq!(name, "mint_tokens");
        assert_eq!(u64::from_le_bytes(args.try_into().unwrap()), amount);
        assert_eq!(
            ix.accounts.iter().filter(|m| m.is_signer).count(),
            1,
            "Only the mint authority signs"
        );
    }

    #[test]
    fn every_instruction_targets_the_wrapper() {
        let wrapper = wrapper();
        let [a, b, c] = [(); 3].map(|_| Address::new_unique());
        let instructions = [
            wrapper.initialize(&a, &b, 0),
            wrapper.mint_tokens(&a, &b, &c, 1),
            wrapper.transfer_tokens(&a, &b, &c, 1),
            wrapper.burn_tokens(&a, &b, &c, 1),
            wrapper.freeze_account(&a, &b, &c),
            wrapper.thaw_account(&a, &b, &c),
            wrapper.approve_tokens(&a, &b, &c, 1),
            wrapper.revoke_tokens(&a, &b),
            wrapper.close_token_account(&a, &b, &c),
        ];
        for (ix, expected) in instructions.iter().zip(INSTRUCTION_NAMES) {
            assert_eq!(ix.program_id, wrapper.program_id);
            assert_eq!(
                match_instruction(&ix.data, &INSTRUCTION_NAMES).map(|(name, _)| name),
                Some(expected)
            );
            assert_eq!(
                ix.accounts.last().map(|m| m.pubkey),
                Some(spl_token_interface::ID)
            );
        }
    }

    #[test]
    fn forwards_to_the_token_program() {
        let wrapper = wrapper();
        let (mint, account, authority) = (
            Address::new_unique(),
            Address::new_unique(),
            Address::new_unique(),
        );

        let init = wrapper
            .token_instruction(&wrapper.initialize(&mint, &authority, 6))
            .unwrap();
        assert_eq!(init.program_id, spl_token_interface::ID);
        assert_eq!(init.accounts.len(), 1);
        assert_eq!(
            TokenInstruction::unpack(&init.data).unwrap(),
            TokenInstruction::InitializeMint2 {
                decimals: 6,
                mint_authority: authority,
                freeze_authority: Some(authority).into(),
            }
        );

        let burn = wrapper
            .token_instruction(&wrapper.burn_tokens(&mint, &account, &authority, 250))
            .unwrap();
        assert_eq!(
            TokenInstruction::unpack(&burn.data).unwrap(),
            TokenInstruction::Burn { amount: 250 }
        );
        // The token program takes the account before the mint.
        assert_eq!(burn.accounts[0].pubkey, account);
        assert_eq!(burn.accounts[1].pubkey, mint);
        assert!(burn.accounts[2].is_signer);

        let close = wrapper
            .token_instruction(&wrapper.close_token_account(&account, &mint, &authority))
            .unwrap();
        assert_eq!(
            TokenInstruction::unpack(&close.data).unwrap(),
            TokenInstruction::CloseAccount
        );
    }

    #[test]
    fn malformed_wrapper_instructions_are_rejected() {
        let wrapper = wrapper();
        let mut ix = wrapper.mint_tokens(
            &Address::new_unique(),
            &Address::new_unique(),
            &Address::new_unique(),
            1,
        );

        let mut short = ix.clone();
        short.accounts.truncate(2);
        assert!(matches!(
            wrapper.token_instruction(&short),
            Err(DecodeError::MissingAccount(2))
        ));

        ix.data.truncate(DISCRIMINATOR_LEN + 4);
        assert!(matches!(
            wrapper.token_instruction(&ix),
            Err(DecodeError::Args {
                expected: 8,
                actual: 4
            })
        ));

        ix.data = vec![0; DISCRIMINATOR_LEN];
        assert!(matches!(
            wrapper.token_instruction(&ix),
            Err(DecodeError::UnknownInstruction)
        ));
    }
}

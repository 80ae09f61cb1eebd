//! Instruction builders and account decoding for the Anchor counter program.

use solana_address::Address;
use solana_instruction::{
    AccountMeta,
    Instruction,
};

use crate::{
    anchor::{
        account_discriminator,
        anchor_instruction,
        match_instruction,
        DISCRIMINATOR_LEN,
    },
    error::DecodeError,
    program_ids::SYSTEM_PROGRAM_ID,
};

pub const COUNTER_ACCOUNT_NAME: &str = "Counter";
/// Discriminator followed by the `u64` count.
pub const COUNTER_ACCOUNT_LEN: usize = DISCRIMINATOR_LEN + 8;

#[derive(Clone, Copy, Debug, Eq, PartialEq, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum CounterInstruction {
    Initialize,
    Increment,
    Decrement,
}

impl CounterInstruction {
    const NAMES: [&'static str; 3] = ["initialize", "increment", "decrement"];

    /// Recognizes a counter instruction from its data.
    pub fn unpack(data: &[u8]) -> Result<Self, DecodeError> {
        match match_instruction(data, &Self::NAMES) {
            Some(("initialize", _)) => Ok(Self::Initialize),
            Some(("increment", _)) => Ok(Self::Increment),
            Some(("decrement", _)) => Ok(Self::Decrement),
            _ => Err(DecodeError::UnknownInstruction),
        }
    }
}

/// Creates the counter account at `counter`, which must sign, funded by `user`.
pub fn initialize(program_id: &Address, counter: &Address, user: &Address) -> Instruction {
    anchor_instruction(
        program_id,
        "initialize",
        &[],
        vec![
            AccountMeta::new(*counter, true),
            AccountMeta::new(*user, true),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
    )
}

pub fn increment(program_id: &Address, counter: &Address, user: &Address) -> Instruction {
    anchor_instruction(
        program_id,
        "increment",
        &[],
        vec![
            AccountMeta::new(*counter, false),
            AccountMeta::new_readonly(*user, true),
        ],
    )
}

pub fn decrement(program_id: &Address, counter: &Address, user: &Address) -> Instruction {
    anchor_instruction(
        program_id,
        "decrement",
        &[],
        vec![
            AccountMeta::new(*counter, false),
            AccountMeta::new_readonly(*user, true),
        ],
    )
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CounterAccount {
    pub count: u64,
}

impl CounterAccount {
    pub fn unpack(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < COUNTER_ACCOUNT_LEN {
            return Err(DecodeError::TooShort {
                expected: COUNTER_ACCOUNT_LEN,
                actual: data.len(),
            });
        }
        let (discriminator, rest) = data.split_at(DISCRIMINATOR_LEN);
        let expected = account_discriminator(COUNTER_ACCOUNT_NAME);
        if discriminator != expected {
            let mut found = [0u8; DISCRIMINATOR_LEN];
            found.copy_from_slice(discriminator);
            return Err(DecodeError::Discriminator { expected, found });
        }
        let mut count = [0u8; 8];
        count.copy_from_slice(&rest[..8]);
        Ok(Self {
            count: u64::from_le_bytes(count),
        })
    }

    pub fn pack(&self) -> Vec<u8> {
        [
            account_discriminator(COUNTER_ACCOUNT_NAME).as_slice(),
            &self.count.to_le_bytes(),
        ]
        .concat()
    }
}

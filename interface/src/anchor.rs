//! Anchor wire conventions: instructions start with `sha256("global:<name>")[..8]` and accounts
//! with `sha256("account:<Name>")[..8]`, followed by borsh encoded fields.

use sha2::{
    Digest,
    Sha256,
};
use solana_address::Address;
use solana_instruction::{
    AccountMeta,
    Instruction,
};

pub const DISCRIMINATOR_LEN: usize = 8;

pub fn instruction_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    hashed_prefix("global", name)
}

pub fn account_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    hashed_prefix("account", name)
}

fn hashed_prefix(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let digest = Sha256::digest(format!("{namespace}:{name}").as_bytes());
    let mut discriminator = [0u8; DISCRIMINATOR_LEN];
    discriminator.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    discriminator
}

/// Builds an Anchor instruction. `args` must already be borsh encoded; for the primitive arguments
/// used here that's just their little-endian bytes.
pub fn anchor_instruction(
    program_id: &Address,
    name: &str,
    args: &[u8],
    accounts: Vec<AccountMeta>,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts,
        data: [instruction_discriminator(name).as_slice(), args].concat(),
    }
}

/// Returns the instruction name whose discriminator prefixes `data`, out of `names`.
pub fn match_instruction<'a, 'd>(
    data: &'d [u8],
    names: &[&'a str],
) -> Option<(&'a str, &'d [u8])> {
    if data.len() < DISCRIMINATOR_LEN {
        return None;
    }
    let (discriminator, rest) = data.split_at(DISCRIMINATOR_LEN);
    names
        .iter()
        .find(|name| instruction_discriminator(name) == discriminator)
        .map(|name| (*name, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_discriminator() {
        // Well known: every Anchor program's `initialize` shares this prefix.
        assert_eq!(
            instruction_discriminator("initialize"),
            [175, 175, 109, 31, 13, 152, 155, 237]
        );
    }

    #[test]
    fn namespaces_differ() {
        assert_ne!(
            instruction_discriminator("Counter"),
            account_discriminator("Counter")
        );
    }

    #[test]
    fn match_by_name() {
        let ix = anchor_instruction(
            &Address::new_unique(),
            "mint_tokens",
            &7u64.to_le_bytes(),
            vec![],
        );
        let (name, args) = match_instruction(&ix.data, &["initialize", "mint_tokens"]).unwrap();
        assert_eq!(name, "mint_tokens");
        assert_eq!(args, 7u64.to_le_bytes());
        assert!(match_instruction(&ix.data[..4], &["mint_tokens"]).is_none());
        assert!(match_instruction(&ix.data, &["initialize"]).is_none());
    }
}

//! PDA helpers for deriving token-metadata program addresses.

use launch_interface::metadata::METADATA_SEED;
use solana_sdk::pubkey::Pubkey;

/// The metadata account address for `mint` under `metadata_program`, with its bump.
pub fn find_metadata_address(mint: &Pubkey, metadata_program: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[METADATA_SEED, metadata_program.as_ref(), mint.as_ref()],
        metadata_program,
    )
}

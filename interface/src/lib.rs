//! Instruction encoders, account decoders, and program identifiers for the external programs the
//! token launch talks to: the SPL token program, the Metaplex token-metadata program, and the
//! Anchor token-wrapper and counter programs used by the integration scenarios.

pub mod anchor;
pub mod counter;
pub mod error;
pub mod metadata;
pub mod program_ids;
pub mod token_wrapper;

//! The two launch stages. Each consumes the typed result of the one before it, so metadata can
//! only be registered for a mint that was confirmed on-chain:
//!
//! `MintPending` -> [`ConfirmedMint`] -> [`RegisteredMetadata`]

pub mod create_mint;
pub mod register_metadata;

pub use create_mint::{
    create_mint,
    ConfirmedMint,
    MintPending,
};
pub use register_metadata::{
    register_metadata,
    RegisteredMetadata,
};

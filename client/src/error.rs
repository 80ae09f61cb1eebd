//! Error taxonomy for a launch: configuration mistakes caught before any network call, missing
//! on-chain dependencies, and failures reported by the ledger.

use launch_interface::error::{
    MetadataFieldError,
    ProgramIdError,
};
use strum_macros::Display;

/// The ledger interaction an error happened in.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[strum(serialize_all = "kebab-case")]
pub enum Stage {
    RentQuery,
    CreateMint,
    RegisterMetadata,
    FetchAccount,
    CreateTokenAccount,
    MintTokens,
    Counter,
    TokenWrapper,
}

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("precondition failed: {0}")]
    Precondition(String),
    #[error("{stage} failed: {source:#}")]
    Network {
        stage: Stage,
        #[source]
        source: anyhow::Error,
    },
}

impl LaunchError {
    /// For `map_err`: wraps a ledger error with the stage it happened in.
    pub fn network(stage: Stage) -> impl FnOnce(anyhow::Error) -> Self {
        move |source| Self::Network { stage, source }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Network { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

impl From<ProgramIdError> for LaunchError {
    fn from(e: ProgramIdError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<MetadataFieldError> for LaunchError {
    fn from(e: MetadataFieldError) -> Self {
        Self::Config(e.to_string())
    }
}

pub type LaunchResult<T> = Result<T, LaunchError>;

use solana_address::Address;

/// Failures when turning the configured program id strings into usable addresses.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ProgramIdError {
    #[error("{label} program id `{value}` is not a valid base58 address")]
    Malformed { label: &'static str, value: String },
    #[error("{label} program id can't be the system program")]
    SystemProgram { label: &'static str },
    #[error("token program id {configured} doesn't match the token instruction encoder's {expected}")]
    TokenProgramMismatch {
        configured: Address,
        expected: Address,
    },
}

/// A metadata field that the metadata program would reject for its length.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{field} is {len} bytes, the metadata program allows at most {max}")]
pub struct MetadataFieldError {
    pub field: &'static str,
    pub len: usize,
    pub max: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("account data is {actual} bytes, expected at least {expected}")]
    TooShort { expected: usize, actual: usize },
    #[error("account discriminator {found:?} doesn't match {expected:?}")]
    Discriminator { expected: [u8; 8], found: [u8; 8] },
    #[error("metadata account key {0} isn't a MetadataV1 key")]
    MetadataKey(u8),
    #[error("instruction data isn't recognized")]
    UnknownInstruction,
    #[error("instruction is missing account {0}")]
    MissingAccount(usize),
    #[error("instruction arguments are {actual} bytes, expected {expected}")]
    Args { expected: usize, actual: usize },
    #[error("failed to encode the token instruction: {0}")]
    TokenInstruction(String),
    #[error(transparent)]
    Borsh(#[from] std::io::Error),
}

//! Launch configuration: the signer credential, the cluster to talk to, the program ids, and the
//! token's descriptive metadata.

use launch_interface::{
    metadata::DataV2,
    program_ids::ProgramIds,
};
use solana_sdk::{
    bs58,
    signature::Keypair,
};
use strum_macros::{
    Display,
    EnumString,
};

use crate::{
    error::{
        LaunchError,
        LaunchResult,
    },
    transactions::SendTransactionConfig,
};

/// Environment variable holding the signer's secret key.
pub const SECRET_KEY_ENV: &str = "SECRET_KEY";

/// Every mint this tool creates has 6 decimal places.
pub const MINT_DECIMALS: u8 = 6;

pub const DEFAULT_TOKEN_NAME: &str = "T-Game Club";
pub const DEFAULT_TOKEN_SYMBOL: &str = "T-GC";
pub const DEFAULT_TOKEN_URI: &str = "https://acbs-test.s3.ap-northeast-2.amazonaws.com/metadata.json";

#[derive(Clone, Copy, Debug, Default, Display, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Cluster {
    #[default]
    Devnet,
    Testnet,
    Localnet,
}

impl Cluster {
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Self::Devnet => "https://api.devnet.solana.com",
            Self::Testnet => "https://api.testnet.solana.com",
            Self::Localnet => "http://127.0.0.1:8899",
        }
    }
}

/// The descriptive fields written into the metadata account.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenDetails {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

impl Default for TokenDetails {
    fn default() -> Self {
        Self {
            name: DEFAULT_TOKEN_NAME.to_string(),
            symbol: DEFAULT_TOKEN_SYMBOL.to_string(),
            uri: DEFAULT_TOKEN_URI.to_string(),
        }
    }
}

impl TokenDetails {
    pub fn to_data(&self) -> DataV2 {
        DataV2::fungible(&self.name, &self.symbol, &self.uri)
    }
}

#[derive(Clone, Debug, Default)]
pub struct LaunchConfig {
    pub cluster: Cluster,
    /// Overrides the cluster's public RPC endpoint.
    pub rpc_url: Option<String>,
    pub program_ids: ProgramIds,
    pub token: TokenDetails,
    pub send: SendTransactionConfig,
}

impl LaunchConfig {
    pub fn rpc_url(&self) -> &str {
        self.rpc_url.as_deref().unwrap_or(self.cluster.rpc_url())
    }

    /// Runs every check that doesn't need the network, so mistakes surface before anything is
    /// submitted.
    pub fn validate(&self) -> LaunchResult<()> {
        self.program_ids.validate()?;
        self.token.to_data().validate()?;
        Ok(())
    }
}

/// Reads and parses the signer keypair from `var`.
pub fn keypair_from_env(var: &str) -> LaunchResult<Keypair> {
    let raw = std::env::var(var).map_err(|_| LaunchError::config(format!("{var} is not set")))?;
    parse_keypair(&raw).map_err(|e| match e {
        LaunchError::Config(msg) => LaunchError::Config(format!("{var}: {msg}")),
        other => other,
    })
}

/// Parses a 64-byte secret key given either as a JSON byte array (`[12,34,...]`, the Solana CLI
/// keypair file format) or as a base58 string.
pub fn parse_keypair(raw: &str) -> LaunchResult<Keypair> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(LaunchError::config("secret key is empty"));
    }

    let bytes: Vec<u8> = if raw.starts_with('[') {
        serde_json::from_str(raw)
            .map_err(|e| LaunchError::config(format!("secret key isn't a JSON byte array: {e}")))?
    } else {
        bs58::decode(raw)
            .into_vec()
            .map_err(|e| LaunchError::config(format!("secret key isn't valid base58: {e}")))?
    };

    Keypair::try_from(bytes.as_slice())
        .map_err(|e| LaunchError::config(format!("secret key isn't a valid keypair: {e}")))
}

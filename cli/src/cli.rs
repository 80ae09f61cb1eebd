use clap::{
    Args,
    Parser,
    Subcommand,
};
use launch_client::{
    config::{
        Cluster,
        LaunchConfig,
        TokenDetails,
        DEFAULT_TOKEN_NAME,
        DEFAULT_TOKEN_SYMBOL,
        DEFAULT_TOKEN_URI,
    },
    error::LaunchResult,
    transactions::SendTransactionConfig,
};
use launch_interface::program_ids::ProgramIds;
use solana_address::Address;

#[derive(Parser, Debug)]
#[command(
    name = "launch-token",
    version,
    about = "Create an SPL token mint and register its Metaplex metadata"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Cluster to launch on.
    #[arg(long, global = true, env = "CLUSTER", default_value_t = Cluster::Devnet)]
    pub cluster: Cluster,

    /// RPC endpoint, overriding the cluster's public one.
    #[arg(long, global = true, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Token-metadata program id, e.g. for a clone on a local validator.
    #[arg(long, global = true, env = "METADATA_PROGRAM_ID")]
    pub metadata_program: Option<String>,

    #[arg(long, global = true, env = "TOKEN_NAME", default_value = DEFAULT_TOKEN_NAME)]
    pub name: String,

    #[arg(long, global = true, env = "TOKEN_SYMBOL", default_value = DEFAULT_TOKEN_SYMBOL)]
    pub symbol: String,

    /// URI of the off-chain metadata JSON.
    #[arg(long, global = true, env = "TOKEN_URI", default_value = DEFAULT_TOKEN_URI)]
    pub uri: String,

    #[arg(long, global = true)]
    pub compute_unit_limit: Option<u32>,

    /// Priority fee in micro-lamports per compute unit. Requires --compute-unit-limit.
    #[arg(long, global = true, requires = "compute_unit_limit")]
    pub compute_unit_price: Option<u64>,

    /// Only print warnings, errors, and requested values.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a mint and register its metadata.
    Launch,
    /// Create a mint without metadata.
    CreateMint,
    /// Register metadata for an existing mint the signer is the mint authority of.
    RegisterMetadata {
        #[arg(long, value_parser = parse_mint)]
        mint: Address,
    },
    /// Print the metadata address of a mint. Doesn't touch the network.
    MetadataAddress {
        #[arg(long, value_parser = parse_mint)]
        mint: Address,
    },
    /// Print a mint's state and, if registered, its metadata.
    InspectMint {
        #[arg(long, value_parser = parse_mint)]
        mint: Address,
    },
}

fn parse_mint(value: &str) -> Result<Address, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("`{value}` is not a valid base58 address"))
}

impl GlobalArgs {
    pub fn to_config(&self) -> LaunchResult<LaunchConfig> {
        let config = LaunchConfig {
            cluster: self.cluster,
            rpc_url: self.rpc_url.clone(),
            program_ids: ProgramIds::load(self.metadata_program.as_deref())?,
            token: TokenDetails {
                name: self.name.clone(),
                symbol: self.symbol.clone(),
                uri: self.uri.clone(),
            },
            send: SendTransactionConfig {
                compute_unit_limit: self.compute_unit_limit,
                compute_unit_price: self.compute_unit_price,
            },
        };
        config.validate()?;
        Ok(config)
    }
}

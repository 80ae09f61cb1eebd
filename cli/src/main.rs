//! Operator binary: creates an SPL token mint on a Solana cluster and registers its Metaplex
//! metadata, either in one go or stage by stage.

use clap::Parser;
use colored::Colorize;
use launch_client::{
    config::LaunchConfig,
    context::token::TokenContext,
    error::{
        LaunchError,
        LaunchResult,
        Stage,
    },
    explorer::address_url,
    launch::launch,
    ledger::{
        Ledger,
        RpcLedger,
    },
    logs::{
        log_divider,
        log_info,
        log_warning,
        set_quiet,
    },
    pda::find_metadata_address,
    print_kv,
    stages::{
        create_mint,
        register_metadata,
        ConfirmedMint,
        MintPending,
    },
    LogColor,
};
use launch_interface::metadata::MetadataAccount;
use solana_address::Address;
use solana_sdk::signature::Signer;

use crate::cli::{
    Cli,
    Command,
};

pub mod cli;
pub mod load_env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = load_env::load_dotenv();
    let cli = Cli::parse();
    set_quiet(cli.global.quiet);
    if let Some(path) = dotenv {
        log_info("Loaded", path.display());
    }

    run(cli).await?;
    Ok(())
}

async fn run(cli: Cli) -> LaunchResult<()> {
    let config = cli.global.to_config()?;

    // The only subcommand that needs neither a signer nor a connection.
    if let Command::MetadataAddress { mint } = cli.command {
        let (metadata, bump) = find_metadata_address(&mint, &config.program_ids.metadata);
        println!("{metadata}");
        print_kv!("bump", bump);
        return Ok(());
    }

    let ledger = RpcLedger::new(config.rpc_url(), config.program_ids).with_config(config.send);
    println!("{}", "launch-token".color(LogColor::Header));
    log_info("Cluster", format!("{} ({})", config.cluster, ledger.url()));

    match cli.command {
        Command::MetadataAddress { .. } => Ok(()),
        Command::InspectMint { mint } => inspect_mint(&ledger, &config, mint).await,
        Command::Launch => {
            let payer = load_env::signer()?;
            log_info("Payer", payer.pubkey());
            let report = launch(&ledger, &payer, MintPending::generate(), &config).await?;
            report.print();
            Ok(())
        }
        Command::CreateMint => {
            let payer = load_env::signer()?;
            log_info("Payer", payer.pubkey());
            let mint = create_mint(&ledger, &payer, &config.program_ids).await?;
            log_divider();
            print_kv!("mint", mint.address);
            print_kv!("explorer", address_url(&mint.address, &config));
            Ok(())
        }
        Command::RegisterMetadata { mint } => {
            let payer = load_env::signer()?;
            log_info("Payer", payer.pubkey());
            let mint = ConfirmedMint::from_existing(&ledger, mint).await?;
            let registered = register_metadata(&ledger, &payer, &mint, &config).await?;
            log_divider();
            print_kv!("metadata", registered.metadata);
            print_kv!("signature", registered.signature);
            Ok(())
        }
    }
}

async fn inspect_mint(ledger: &RpcLedger, config: &LaunchConfig, mint: Address) -> LaunchResult<()> {
    let token = TokenContext::load(ledger, mint).await?;
    let show = |authority: Option<Address>| authority.map_or("none".to_string(), |a| a.to_string());

    log_divider();
    print_kv!("mint", mint);
    print_kv!("decimals", token.mint_decimals);
    print_kv!("supply", token.supply);
    print_kv!("mint authority", show(token.mint_authority));
    print_kv!("freeze authority", show(token.freeze_authority));

    let (metadata, _) = find_metadata_address(&mint, &config.program_ids.metadata);
    let account = ledger
        .get_account(&metadata)
        .await
        .map_err(LaunchError::network(Stage::FetchAccount))?;
    let Some(account) = account else {
        log_warning("No metadata registered", metadata);
        return Ok(());
    };
    match MetadataAccount::unpack(&account.data) {
        Ok(record) => {
            print_kv!("metadata", metadata);
            print_kv!("name", record.name);
            print_kv!("symbol", record.symbol);
            print_kv!("uri", record.uri);
            print_kv!("update authority", record.update_authority);
            print_kv!("mutable", record.is_mutable);
        }
        Err(e) => log_warning("Undecodable metadata account", format!("{metadata}: {e}")),
    }
    print_kv!("explorer", address_url(&mint, config));
    Ok(())
}

//! The full launch pipeline: create a mint, then register its metadata.

use serde::Serialize;
use solana_sdk::signature::{
    Keypair,
    Signer,
};

use crate::{
    config::LaunchConfig,
    error::LaunchResult,
    ledger::Ledger,
    logs::{
        log_divider,
        log_warning,
    },
    print_kv,
    stages::{
        register_metadata,
        ConfirmedMint,
        MintPending,
        RegisteredMetadata,
    },
};

/// Everything an operator needs to find the launched token again.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LaunchReport {
    pub payer: String,
    pub mint: String,
    pub metadata: String,
    pub mint_signature: Option<String>,
    pub metadata_signature: String,
    pub explorer_url: String,
}

impl LaunchReport {
    pub fn new(payer: &Keypair, mint: &ConfirmedMint, registered: &RegisteredMetadata) -> Self {
        Self {
            payer: payer.pubkey().to_string(),
            mint: mint.address.to_string(),
            metadata: registered.metadata.to_string(),
            mint_signature: mint.signature.map(|sig| sig.to_string()),
            metadata_signature: registered.signature.to_string(),
            explorer_url: registered.explorer_url.clone(),
        }
    }

    pub fn print(&self) {
        log_divider();
        print_kv!("payer", &self.payer);
        print_kv!("mint", &self.mint);
        print_kv!("metadata", &self.metadata);
        if let Some(sig) = &self.mint_signature {
            print_kv!("mint signature", sig);
        }
        print_kv!("metadata signature", &self.metadata_signature);
        print_kv!("explorer", &self.explorer_url);
    }
}

/// Validates `config`, creates `mint`, and registers its metadata.
///
/// If registration fails the mint is left on-chain without metadata. A warning names it so it can
/// be resumed with `register-metadata --mint`.
pub async fn launch<L: Ledger>(
    ledger: &L,
    payer: &Keypair,
    mint: MintPending,
    config: &LaunchConfig,
) -> LaunchResult<LaunchReport> {
    config.validate()?;

    let confirmed = mint.create(ledger, payer, &config.program_ids).await?;
    let registered = register_metadata(ledger, payer, &confirmed, config)
        .await
        .inspect_err(|_| {
            log_warning(
                "Orphaned mint",
                format!(
                    "{} was created without metadata; resume with `register-metadata --mint {}`",
                    confirmed.address, confirmed.address
                ),
            )
        })?;

    Ok(LaunchReport::new(payer, &confirmed, &registered))
}

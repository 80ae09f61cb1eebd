use launch_interface::{
    metadata::{
        create_metadata_account_v3,
        CreateMetadataAccountArgsV3,
        CreateMetadataAccountV3Accounts,
    },
    program_ids::ProgramIds,
};
use solana_address::Address;
use solana_sdk::{
    message::Instruction,
    signature::{
        Keypair,
        Signature,
        Signer,
    },
};

use crate::{
    config::{
        LaunchConfig,
        TokenDetails,
    },
    error::{
        LaunchError,
        LaunchResult,
        Stage,
    },
    explorer::address_url,
    ledger::Ledger,
    logs::{
        log_info,
        log_success,
    },
    pda::find_metadata_address,
    stages::ConfirmedMint,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegisteredMetadata {
    pub mint: Address,
    pub metadata: Address,
    pub signature: Signature,
    pub explorer_url: String,
}

/// Builds the `CreateMetadataAccountV3` instruction for `mint`, with `payer` as mint authority,
/// fee payer and update authority. Returns the metadata address alongside it.
pub fn metadata_instruction(
    payer: &Address,
    mint: &Address,
    token: &TokenDetails,
    program_ids: &ProgramIds,
) -> LaunchResult<(Address, Instruction)> {
    let args = CreateMetadataAccountArgsV3 {
        data: token.to_data(),
        is_mutable: true,
        collection_details: None,
    };
    args.data.validate()?;

    let (metadata, _) = find_metadata_address(mint, &program_ids.metadata);
    let accounts = CreateMetadataAccountV3Accounts {
        metadata,
        mint: *mint,
        mint_authority: *payer,
        payer: *payer,
        update_authority: *payer,
        system_program: program_ids.system,
    };
    let ix = create_metadata_account_v3(&program_ids.metadata, &accounts, &args)
        .map_err(|e| LaunchError::config(format!("failed to encode metadata: {e}")))?;
    Ok((metadata, ix))
}

/// Registers metadata for a confirmed mint whose mint authority is `payer`.
pub async fn register_metadata<L: Ledger>(
    ledger: &L,
    payer: &Keypair,
    mint: &ConfirmedMint,
    config: &LaunchConfig,
) -> LaunchResult<RegisteredMetadata> {
    if mint.mint_authority != Some(payer.pubkey()) {
        return Err(LaunchError::Precondition(format!(
            "the signer {} isn't the mint authority of {}",
            payer.pubkey(),
            mint.address
        )));
    }

    let (metadata, ix) = metadata_instruction(
        &payer.pubkey(),
        &mint.address,
        &config.token,
        &config.program_ids,
    )?;
    log_info("Registering metadata", metadata);

    let signature = ledger
        .send_and_confirm(payer, &[], &[ix])
        .await
        .map_err(LaunchError::network(Stage::RegisterMetadata))?;

    let explorer_url = address_url(&mint.address, config);
    log_success("Metadata registered", &explorer_url);

    Ok(RegisteredMetadata {
        mint: mint.address,
        metadata,
        signature,
        explorer_url,
    })
}

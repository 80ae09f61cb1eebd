use launch_client::{
    error::{
        LaunchError,
        Stage,
    },
    ledger::{
        Ledger,
        MolluskLedger,
    },
    mollusk_helpers::{
        create_mock_user_account,
        helper_trait::LaunchTestHelper,
    },
    stages::{
        create_mint::create_mint_instructions,
        ConfirmedMint,
        MintPending,
    },
    test_accounts::{
        MINT,
        PAYER,
    },
};
use launch_interface::program_ids::ProgramIds;
use solana_address::Address;
use solana_sdk::{
    program_pack::Pack,
    signature::{
        Keypair,
        Signer,
    },
};
use spl_token_interface::state::Mint;

const PAYER_LAMPORTS: u64 = 10_000_000_000;

fn funded_ledger(payer: &Keypair, lamports: u64) -> MolluskLedger {
    MolluskLedger::new(vec![create_mock_user_account(payer.pubkey(), lamports)])
}

#[tokio::test]
async fn create_mint() -> anyhow::Result<()> {
    let payer = &*PAYER;
    let ledger = funded_ledger(payer, PAYER_LAMPORTS);
    let ids = ProgramIds::default();

    let pending = MintPending::generate();
    let address = pending.address();
    let confirmed = pending.create(&ledger, payer, &ids).await?;

    assert_eq!(confirmed.address, address);
    assert_eq!(confirmed.decimals, 6);
    assert!(confirmed.signature.is_some());

    let mint = ledger.context().get_mint(&address);
    assert_eq!(mint.decimals, 6);
    assert_eq!(mint.supply, 0);
    assert_eq!(Option::<Address>::from(mint.mint_authority), Some(payer.pubkey()));
    assert_eq!(Option::<Address>::from(mint.freeze_authority), Some(payer.pubkey()));

    let rent = ledger.minimum_balance_for_rent_exemption(Mint::LEN).await?;
    let account = ledger.get_account(&address).await?.expect("Mint should exist");
    assert_eq!(account.lamports, rent);
    assert_eq!(account.owner, spl_token_interface::ID);
    assert_eq!(
        ledger.get_account(&payer.pubkey()).await?.map(|a| a.lamports),
        Some(PAYER_LAMPORTS - rent)
    );

    // Loading the mint back yields the same state, minus the creation signature.
    let loaded = ConfirmedMint::from_existing(&ledger, address).await?;
    assert_eq!(
        loaded,
        ConfirmedMint {
            signature: None,
            ..confirmed
        }
    );

    Ok(())
}

#[tokio::test]
async fn mint_keypair_must_co_sign() -> anyhow::Result<()> {
    let payer = &*PAYER;
    let ledger = funded_ledger(payer, PAYER_LAMPORTS);
    let mint = Keypair::new();

    let instructions = create_mint_instructions(
        &payer.pubkey(),
        &mint.pubkey(),
        ledger.minimum_balance_for_rent_exemption(Mint::LEN).await?,
        &ProgramIds::default(),
    )?;

    assert!(ledger
        .send_and_confirm(payer, &[], &instructions)
        .await
        .is_err());
    assert!(ledger.get_account(&mint.pubkey()).await?.is_none());

    assert!(ledger
        .send_and_confirm(payer, &[&mint], &instructions)
        .await
        .is_ok());
    assert!(ledger.get_account(&mint.pubkey()).await?.is_some());

    Ok(())
}

#[tokio::test]
async fn duplicate_mint_fails() -> anyhow::Result<()> {
    let payer = &*PAYER;
    let ledger = funded_ledger(payer, PAYER_LAMPORTS);
    let ids = ProgramIds::default();

    MintPending::from_keypair(MINT.insecure_clone())
        .create(&ledger, payer, &ids)
        .await?;
    let balance = ledger.get_account(&payer.pubkey()).await?.map(|a| a.lamports);

    let err = MintPending::from_keypair(MINT.insecure_clone())
        .create(&ledger, payer, &ids)
        .await
        .unwrap_err();
    assert_eq!(err.stage(), Some(Stage::CreateMint));

    // The failed attempt didn't touch the payer or the existing mint.
    assert_eq!(
        ledger.get_account(&payer.pubkey()).await?.map(|a| a.lamports),
        balance
    );
    assert_eq!(ledger.context().get_mint(&MINT.pubkey()).decimals, 6);

    Ok(())
}

#[tokio::test]
async fn insufficient_funds() -> anyhow::Result<()> {
    let payer = Keypair::new();
    let ledger = funded_ledger(&payer, 1_000);

    let pending = MintPending::generate();
    let address = pending.address();
    let err = pending
        .create(&ledger, &payer, &ProgramIds::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        LaunchError::Network {
            stage: Stage::CreateMint,
            ..
        }
    ));
    assert!(ledger.get_account(&address).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn loading_a_missing_mint_is_a_precondition_error() {
    let ledger = funded_ledger(&PAYER, PAYER_LAMPORTS);

    assert!(matches!(
        ConfirmedMint::from_existing(&ledger, Address::new_unique()).await,
        Err(LaunchError::Precondition(_))
    ));
    // The payer exists but isn't a mint.
    assert!(matches!(
        ConfirmedMint::from_existing(&ledger, PAYER.pubkey()).await,
        Err(LaunchError::Precondition(_))
    ));
}

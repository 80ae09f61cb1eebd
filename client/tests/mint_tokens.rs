use launch_client::{
    context::token::{
        load_token_account,
        TokenContext,
    },
    error::{
        LaunchError,
        Stage,
    },
    ledger::MolluskLedger,
    mollusk_helpers::{
        create_mock_user_account,
        helper_trait::LaunchTestHelper,
    },
    stages::MintPending,
};
use launch_interface::program_ids::ProgramIds;
use solana_sdk::signature::{
    Keypair,
    Signer,
};

const AMOUNT: u64 = 10_000_000_000_000;

#[tokio::test]
async fn mint_to_token_account() -> anyhow::Result<()> {
    let payer = Keypair::new();
    let ledger = MolluskLedger::new(vec![create_mock_user_account(
        payer.pubkey(),
        10_000_000_000,
    )]);

    let mint = MintPending::generate()
        .create(&ledger, &payer, &ProgramIds::default())
        .await?;
    let token = TokenContext::load(&ledger, mint.address).await?;
    assert_eq!(token.mint_decimals, 6);
    assert_eq!(token.mint_authority, Some(payer.pubkey()));

    let token_account = Keypair::new();
    token
        .create_and_mint(&ledger, &payer, &token_account, AMOUNT)
        .await?;

    let state = load_token_account(&ledger, &token_account.pubkey()).await?;
    assert_eq!(state.amount, AMOUNT);
    assert_eq!(state.mint, mint.address);
    assert_eq!(state.owner, payer.pubkey());

    assert_eq!(ledger.context().get_token_balance(&token_account.pubkey()), AMOUNT);
    assert_eq!(ledger.context().get_mint(&mint.address).supply, AMOUNT);

    Ok(())
}

#[tokio::test]
async fn only_the_mint_authority_can_mint() -> anyhow::Result<()> {
    let authority = Keypair::new();
    let other = Keypair::new();
    let ledger = MolluskLedger::new(vec![
        create_mock_user_account(authority.pubkey(), 10_000_000_000),
        create_mock_user_account(other.pubkey(), 10_000_000_000),
    ]);

    let mint = MintPending::generate()
        .create(&ledger, &authority, &ProgramIds::default())
        .await?;
    let token = TokenContext::load(&ledger, mint.address).await?;

    // `other` funds and owns the token account, but can't sign for the mint authority.
    let token_account = Keypair::new();
    let err = token
        .create_and_mint(&ledger, &other, &token_account, AMOUNT)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LaunchError::Network {
            stage: Stage::MintTokens,
            ..
        }
    ));

    // The token account was created by the first transaction and holds nothing.
    assert_eq!(ledger.context().get_token_balance(&token_account.pubkey()), 0);

    Ok(())
}

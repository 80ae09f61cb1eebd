use launch_client::{
    context::counter::CounterContext,
    error::{
        LaunchError,
        Stage,
    },
    ledger::SimulatedLedger,
};
use launch_interface::program_ids::ProgramIds;
use solana_address::Address;
use solana_sdk::signature::{
    Keypair,
    Signer,
};

fn setup() -> (SimulatedLedger, CounterContext, Keypair) {
    let program_id = Address::new_unique();
    let ledger = SimulatedLedger::new(ProgramIds::default()).with_counter_program(program_id);
    let user = Keypair::new();
    ledger.fund(&user.pubkey(), 1_000_000_000);
    (ledger, CounterContext::new(program_id), user)
}

#[tokio::test]
async fn increment_then_decrement() -> anyhow::Result<()> {
    let (ledger, ctx, user) = setup();
    let counter = Keypair::new();

    ctx.initialize(&ledger, &user, &counter).await?;
    assert_eq!(ctx.fetch(&ledger, &counter.pubkey()).await?, 0);

    ctx.increment(&ledger, &user, &counter.pubkey()).await?;
    assert_eq!(ctx.fetch(&ledger, &counter.pubkey()).await?, 1);

    ctx.decrement(&ledger, &user, &counter.pubkey()).await?;
    assert_eq!(ctx.fetch(&ledger, &counter.pubkey()).await?, 0);

    Ok(())
}

#[tokio::test]
async fn decrement_below_zero_fails() -> anyhow::Result<()> {
    let (ledger, ctx, user) = setup();
    let counter = Keypair::new();
    ctx.initialize(&ledger, &user, &counter).await?;

    let err = ctx
        .decrement(&ledger, &user, &counter.pubkey())
        .await
        .unwrap_err();
    assert_eq!(err.stage(), Some(Stage::Counter));
    assert_eq!(ctx.fetch(&ledger, &counter.pubkey()).await?, 0);

    Ok(())
}

#[tokio::test]
async fn counter_must_exist() {
    let (ledger, ctx, user) = setup();
    let missing = Address::new_unique();

    assert!(matches!(
        ctx.fetch(&ledger, &missing).await,
        Err(LaunchError::Precondition(_))
    ));
    assert!(matches!(
        ctx.increment(&ledger, &user, &missing).await,
        Err(LaunchError::Network {
            stage: Stage::Counter,
            ..
        })
    ));
}

#[tokio::test]
async fn initialize_twice_fails() -> anyhow::Result<()> {
    let (ledger, ctx, user) = setup();
    let counter = Keypair::new();

    ctx.initialize(&ledger, &user, &counter).await?;
    ctx.increment(&ledger, &user, &counter.pubkey()).await?;
    assert!(ctx.initialize(&ledger, &user, &counter).await.is_err());
    assert_eq!(ctx.fetch(&ledger, &counter.pubkey()).await?, 1);

    Ok(())
}

//! Predefined deterministic keypairs for tests.

use std::sync::LazyLock;

use solana_sdk::signature::Keypair;

macro_rules! test_keypair {
    ($name:ident, $seed:expr) => {
        pub static $name: LazyLock<Keypair> = LazyLock::new(|| Keypair::new_from_array([$seed; 32]));
    };
}

test_keypair!(PAYER, 1);
test_keypair!(MINT, 2);
test_keypair!(TOKEN_ACCOUNT, 3);
test_keypair!(COUNTER, 4);

#[test]
fn test_keys_are_distinct() {
    use std::collections::HashSet;

    use solana_sdk::signer::Signer;

    let keys: HashSet<_> = [&PAYER, &MINT, &TOKEN_ACCOUNT, &COUNTER]
        .iter()
        .map(|kp| kp.pubkey())
        .collect();
    assert_eq!(keys.len(), 4);
    assert_eq!(PAYER.pubkey(), Keypair::new_from_array([1; 32]).pubkey());
}

//! In-process SVM fixtures: a mollusk context with the SPL token program loaded, plus helpers for
//! reading token state back out of its account store.

pub mod helper_trait;

use std::collections::HashMap;

use launch_interface::program_ids::SYSTEM_PROGRAM_ID;
use mollusk_svm::{
    Mollusk,
    MolluskContext,
};
use solana_account::Account;
use solana_address::Address;

/// Creates and returns a [`MolluskContext`] with the following created and initialized:
/// - The system program and other builtins
/// - The SPL token program
/// - The accounts passed
pub fn new_token_mollusk_context(
    accounts: Vec<(Address, Account)>,
) -> MolluskContext<HashMap<Address, Account>> {
    let mut mollusk = Mollusk::default();
    mollusk_svm_programs_token::token::add_program(&mut mollusk);

    // Create mollusk context with the simple hashmap implementation for the AccountStore.
    let context = mollusk.with_context(HashMap::new());

    for (address, account) in accounts {
        context.account_store.borrow_mut().insert(address, account);
    }

    context
}

/// A system-owned account holding `lamports`, ready to pay for transactions.
pub fn create_mock_user_account(address: Address, lamports: u64) -> (Address, Account) {
    (address, Account::new(lamports, 0, &SYSTEM_PROGRAM_ID))
}

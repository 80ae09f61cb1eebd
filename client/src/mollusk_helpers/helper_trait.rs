use std::collections::HashMap;

use mollusk_svm::MolluskContext;
use solana_account::Account;
use solana_address::Address;
use solana_sdk::program_pack::Pack;
use spl_token_interface::state::{
    Account as TokenAccount,
    Mint,
};

pub trait LaunchTestHelper {
    fn get_mint(&self, mint: &Address) -> Mint;

    fn get_token_balance(&self, token_account: &Address) -> u64;
}

impl LaunchTestHelper for MolluskContext<HashMap<Address, Account>> {
    fn get_mint(&self, mint: &Address) -> Mint {
        let account_store = self.account_store.borrow();
        let acc = account_store
            .get(mint)
            .unwrap_or_else(|| panic!("Mint {mint} doesn't exist"));
        Mint::unpack(&acc.data).expect("Should unpack mint")
    }

    fn get_token_balance(&self, token_account: &Address) -> u64 {
        let account_store = self.account_store.borrow();
        let acc = account_store
            .get(token_account)
            .unwrap_or_else(|| panic!("Token account {token_account} doesn't exist"));
        TokenAccount::unpack(&acc.data)
            .map(|account| account.amount)
            .expect("Should unpack token account")
    }
}

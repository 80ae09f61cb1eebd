//! Environment loading: `.env` first, then the signer credential.

use std::path::PathBuf;

use launch_client::{
    config::{
        keypair_from_env,
        SECRET_KEY_ENV,
    },
    error::LaunchResult,
    logs::log_warning,
};
use solana_sdk::signature::Keypair;

/// Loads `.env` from the working directory or its parents, if there is one, and returns its path.
/// Variables already set in the environment take precedence.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenv::dotenv() {
        Ok(path) => Some(path),
        Err(e) if e.not_found() => None,
        Err(e) => {
            log_warning("Ignoring .env", e);
            None
        }
    }
}

pub fn signer() -> LaunchResult<Keypair> {
    keypair_from_env(SECRET_KEY_ENV)
}

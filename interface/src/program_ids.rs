//! Identifiers of the external programs every launch transaction targets.
//!
//! Overrides arrive as base58 strings and are parsed once through [`ProgramIds::load`], so a typo
//! surfaces at startup rather than as a rejected transaction.

use std::str::FromStr;

use solana_address::Address;
use solana_sdk::pubkey;

use crate::error::ProgramIdError;

/// The SPL Token program ID.
pub const TOKEN_PROGRAM_ID_STR: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
/// The Metaplex token-metadata program ID.
pub const TOKEN_METADATA_PROGRAM_ID: Address =
    pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

pub const SYSTEM_PROGRAM_ID: Address = pubkey!("11111111111111111111111111111111");
pub const RENT_SYSVAR_ID: Address = pubkey!("SysvarRent111111111111111111111111111111111");
pub const COMPUTE_BUDGET_ID: Address = pubkey!("ComputeBudget111111111111111111111111111111");

/// The validated set of program ids a launch runs against.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ProgramIds {
    pub token: Address,
    pub metadata: Address,
    pub system: Address,
}

impl ProgramIds {
    /// Parses and validates the built-in ids, replacing the metadata program id with
    /// `metadata_override` when one is given (e.g. a program cloned onto a local validator).
    pub fn load(metadata_override: Option<&str>) -> Result<Self, ProgramIdError> {
        let token = parse_program_id("token", TOKEN_PROGRAM_ID_STR)?;
        let metadata = match metadata_override {
            Some(value) => parse_program_id("metadata", value)?,
            None => TOKEN_METADATA_PROGRAM_ID,
        };

        let ids = Self {
            token,
            metadata,
            system: SYSTEM_PROGRAM_ID,
        };
        ids.validate()?;
        Ok(ids)
    }

    /// Checks the invariants every transaction relies on: the token id is the one the SPL token
    /// encoder builds instructions for, and neither external program is the system program.
    pub fn validate(&self) -> Result<(), ProgramIdError> {
        if self.token == SYSTEM_PROGRAM_ID {
            return Err(ProgramIdError::SystemProgram { label: "token" });
        }
        if self.metadata == SYSTEM_PROGRAM_ID {
            return Err(ProgramIdError::SystemProgram { label: "metadata" });
        }
        if self.token != spl_token_interface::ID {
            return Err(ProgramIdError::TokenProgramMismatch {
                configured: self.token,
                expected: spl_token_interface::ID,
            });
        }
        Ok(())
    }

    /// A short human readable name for a program id, used when reporting which instruction in a
    /// transaction failed.
    pub fn name_of(&self, program_id: &Address) -> &'static str {
        match program_id {
            id if id == &self.token => "token",
            id if id == &self.metadata => "token-metadata",
            id if id == &self.system => "system",
            id if id == &COMPUTE_BUDGET_ID => "compute-budget",
            _ => "unknown program",
        }
    }
}

impl Default for ProgramIds {
    fn default() -> Self {
        Self {
            token: spl_token_interface::ID,
            metadata: TOKEN_METADATA_PROGRAM_ID,
            system: SYSTEM_PROGRAM_ID,
        }
    }
}

pub fn parse_program_id(label: &'static str, value: &str) -> Result<Address, ProgramIdError> {
    Address::from_str(value.trim()).map_err(|_| ProgramIdError::Malformed {
        label,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ids_load() {
        let ids = ProgramIds::load(None).expect("Built-in ids should be valid");
        assert_eq!(ids, ProgramIds::default());
        assert_eq!(ids.token.to_string(), TOKEN_PROGRAM_ID_STR);
        assert_eq!(ids.metadata, TOKEN_METADATA_PROGRAM_ID);
    }

    #[test]
    fn metadata_default_matches_its_published_id() {
        let ids = ProgramIds::default();
        assert_eq!(
            ids.metadata.to_string(),
            "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s"
        );
        // Passing the published id explicitly is the same as not overriding it.
        let explicit = ProgramIds::load(Some(&TOKEN_METADATA_PROGRAM_ID.to_string())).unwrap();
        assert_eq!(explicit, ids);
    }

    #[test]
    fn metadata_override() {
        let custom = Address::new_unique();
        let ids = ProgramIds::load(Some(&custom.to_string())).unwrap();
        assert_eq!(ids.metadata, custom);
        assert_eq!(ids.token, spl_token_interface::ID);
    }

    #[test]
    fn malformed_override_is_rejected() {
        for bad in ["", "not-base58-0OIl", "3yZe7d"] {
            assert!(matches!(
                ProgramIds::load(Some(bad)),
                Err(ProgramIdError::Malformed {
                    label: "metadata",
                    ..
                })
            ));
        }
    }

    #[test]
    fn system_program_is_rejected() {
        let res = ProgramIds::load(Some("11111111111111111111111111111111"));
        assert_eq!(
            res,
            Err(ProgramIdError::SystemProgram { label: "metadata" })
        );
    }

    #[test]
    fn token_program_mismatch() {
        let ids = ProgramIds {
            token: Address::new_unique(),
            ..ProgramIds::default()
        };
        assert!(matches!(
            ids.validate(),
            Err(ProgramIdError::TokenProgramMismatch { .. })
        ));
    }

    #[test]
    fn program_names() {
        let ids = ProgramIds::default();
        assert_eq!(ids.name_of(&spl_token_interface::ID), "token");
        assert_eq!(ids.name_of(&ids.metadata), "token-metadata");
        assert_eq!(ids.name_of(&SYSTEM_PROGRAM_ID), "system");
        assert_eq!(ids.name_of(&Address::new_unique()), "unknown program");
    }
}

//! Client side encoding of the Metaplex token-metadata program's `CreateMetadataAccountV3`
//! instruction, and decoding of the `MetadataV1` account it creates.
//!
//! Only the pieces the launch flow needs are modeled. Field order and types mirror the program's
//! borsh layout exactly, since the bytes are all the program sees.

use borsh::{
    BorshDeserialize,
    BorshSerialize,
};
use solana_address::Address;
use solana_instruction::{
    AccountMeta,
    Instruction,
};

use crate::error::{
    DecodeError,
    MetadataFieldError,
};

/// First seed of every metadata PDA.
pub const METADATA_SEED: &[u8] = b"metadata";
pub const CREATE_METADATA_ACCOUNT_V3_DISCRIMINATOR: u8 = 33;
/// `Key::MetadataV1`, the first byte of a metadata account.
pub const METADATA_V1_KEY: u8 = 4;
/// Bytes the metadata program allocates for a metadata account.
pub const MAX_METADATA_LEN: usize = 679;

pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_URI_LENGTH: usize = 200;
pub const MAX_SELLER_FEE_BASIS_POINTS: u16 = 10_000;

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Eq, PartialEq)]
pub struct Creator {
    pub address: Address,
    pub verified: bool,
    pub share: u8,
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Eq, PartialEq)]
pub struct Collection {
    pub verified: bool,
    pub key: Address,
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Eq, PartialEq)]
pub enum UseMethod {
    Burn,
    Multiple,
    Single,
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Eq, PartialEq)]
pub struct Uses {
    pub use_method: UseMethod,
    pub remaining: u64,
    pub total: u64,
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Eq, PartialEq)]
pub enum CollectionDetails {
    V1 { size: u64 },
    V2 { padding: [u8; 8] },
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Eq, PartialEq)]
pub struct DataV2 {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub creators: Option<Vec<Creator>>,
    pub collection: Option<Collection>,
    pub uses: Option<Uses>,
}

impl DataV2 {
    /// Metadata for a plain fungible token: no royalties, creators, collection, or uses.
    pub fn fungible(
        name: impl Into<String>,
        symbol: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            uri: uri.into(),
            seller_fee_basis_points: 0,
            creators: None,
            collection: None,
            uses: None,
        }
    }

    /// Checks the length limits the metadata program enforces on-chain.
    pub fn validate(&self) -> Result<(), MetadataFieldError> {
        for (field, value, max) in [
            ("name", &self.name, MAX_NAME_LENGTH),
            ("symbol", &self.symbol, MAX_SYMBOL_LENGTH),
            ("uri", &self.uri, MAX_URI_LENGTH),
        ] {
            if value.len() > max {
                return Err(MetadataFieldError {
                    field,
                    len: value.len(),
                    max,
                });
            }
        }
        if self.seller_fee_basis_points > MAX_SELLER_FEE_BASIS_POINTS {
            return Err(MetadataFieldError {
                field: "seller_fee_basis_points",
                len: self.seller_fee_basis_points as usize,
                max: MAX_SELLER_FEE_BASIS_POINTS as usize,
            });
        }
        Ok(())
    }
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Eq, PartialEq)]
pub struct CreateMetadataAccountArgsV3 {
    pub data: DataV2,
    pub is_mutable: bool,
    pub collection_details: Option<CollectionDetails>,
}

impl CreateMetadataAccountArgsV3 {
    /// Decodes the instruction data of a `CreateMetadataAccountV3` instruction.
    pub fn unpack_instruction_data(data: &[u8]) -> Result<Self, DecodeError> {
        match data {
            [CREATE_METADATA_ACCOUNT_V3_DISCRIMINATOR, args @ ..] => Ok(Self::try_from_slice(args)?),
            _ => Err(DecodeError::UnknownInstruction),
        }
    }
}

pub struct CreateMetadataAccountV3Accounts {
    pub metadata: Address,
    pub mint: Address,
    pub mint_authority: Address,
    pub payer: Address,
    pub update_authority: Address,
    pub system_program: Address,
}

pub fn create_metadata_account_v3(
    program_id: &Address,
    accounts: &CreateMetadataAccountV3Accounts,
    args: &CreateMetadataAccountArgsV3,
) -> std::io::Result<Instruction> {
    let mut data = vec![CREATE_METADATA_ACCOUNT_V3_DISCRIMINATOR];
    args.serialize(&mut data)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(accounts.metadata, false),
            AccountMeta::new_readonly(accounts.mint, false),
            AccountMeta::new_readonly(accounts.mint_authority, true),
            AccountMeta::new(accounts.payer, true),
            AccountMeta::new_readonly(accounts.update_authority, true),
            AccountMeta::new_readonly(accounts.system_program, false),
        ],
        data,
    })
}

/// The leading, fixed-order fields of a `MetadataV1` account. The remaining fields (edition
/// nonce, token standard, collection, ...) are never read by this crate.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Eq, PartialEq)]
pub struct MetadataAccount {
    pub key: u8,
    pub update_authority: Address,
    pub mint: Address,
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub creators: Option<Vec<Creator>>,
    pub primary_sale_happened: bool,
    pub is_mutable: bool,
}

impl MetadataAccount {
    pub fn new(update_authority: Address, mint: Address, args: &CreateMetadataAccountArgsV3) -> Self {
        Self {
            key: METADATA_V1_KEY,
            update_authority,
            mint,
            name: args.data.name.clone(),
            symbol: args.data.symbol.clone(),
            uri: args.data.uri.clone(),
            seller_fee_basis_points: args.data.seller_fee_basis_points,
            creators: args.data.creators.clone(),
            primary_sale_happened: false,
            is_mutable: args.is_mutable,
        }
    }

    /// Decodes a metadata account, stripping the NUL padding the program appends to strings.
    pub fn unpack(data: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = data;
        let mut account = Self::deserialize(&mut reader)?;
        if account.key != METADATA_V1_KEY {
            return Err(DecodeError::MetadataKey(account.key));
        }
        for field in [&mut account.name, &mut account.symbol, &mut account.uri] {
            let trimmed_len = field.trim_end_matches('\0').len();
            field.truncate(trimmed_len);
        }
        Ok(account)
    }

    /// Encodes the account into a buffer of the size the metadata program allocates.
    pub fn pack(&self) -> std::io::Result<Vec<u8>> {
        let mut data = borsh::to_vec(self)?;
        if data.len() < MAX_METADATA_LEN {
            data.resize(MAX_METADATA_LEN, 0);
        }
        Ok(data)
    }
}

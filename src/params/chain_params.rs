//! Per-network chain parameters
//!
//! The main network is assembled from literals. Every other network is
//! derived from it: start from main's values and replace only the fields
//! listed in a [`ChainParamsOverrides`].

use rand::Rng;
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::warn;

use super::Network;
use crate::consensus::{Block, Target};
use crate::constants::POW_LIMIT_SHIFT;
use crate::crypto::Hash;
use crate::error::ParamsError;
use crate::node::{
    build_genesis_block, rehash_with_header, verify_genesis, GenesisCheck, GenesisInfo, GenesisSpec,
    MAIN_GENESIS_CHECK, TEST_GENESIS_CHECK, TEST_GENESIS_NONCE,
};
use crate::p2p::{convert_seeds, DnsSeed, SeedAddress, MAIN_DNS_SEEDS, MAIN_FIXED_SEEDS, TEST_FIXED_SEEDS};

// Message start bytes: rarely used upper ASCII, not valid UTF-8, and a large
// 32-bit integer at any alignment.
const MAIN_MESSAGE_START: [u8; 4] = [0xd4, 0x13, 0xe5, 0xb2];
const TEST_MESSAGE_START: [u8; 4] = [0x5a, 0xd2, 0x7c, 0x8e];

const MAIN_ALERT_KEY: &str = "042d131e26e26900eb9fd053cd9f16a9a2894ad5ebbd551be1a4bd23bc016ed91528241bcff222989769417eb10cdb679228c9d55023679be17f0bd3a16e6fbeba";
const TEST_ALERT_KEY: &str = "042d13eb10cdb679228c9ae26e26900eb9fd053cd9f46a9a2c076ed97528247bcff222989769437894ad5ebbd551beda4bd23bd55023679be77f0bd3a16e6fbeba";

pub const MAIN_DEFAULT_PORT: u16 = 5914;
pub const MAIN_RPC_PORT: u16 = 5915;
pub const TEST_DEFAULT_PORT: u16 = 25914;
pub const TEST_RPC_PORT: u16 = 25915;

pub const MAIN_LAST_POW_BLOCK: u32 = 23825;
pub const TEST_LAST_POW_BLOCK: u32 = 0x7fff_ffff;
pub const POS_START_BLOCK: u32 = 1;

/// Address and key kinds that carry a base58 version prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Base58Type {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
}

impl Base58Type {
    pub const ALL: [Base58Type; 5] = [
        Base58Type::PubkeyAddress,
        Base58Type::ScriptAddress,
        Base58Type::SecretKey,
        Base58Type::ExtPublicKey,
        Base58Type::ExtSecretKey,
    ];
}

/// Version prefix bytes for each [`Base58Type`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressPrefixes {
    pub pubkey_address: Vec<u8>,
    pub script_address: Vec<u8>,
    pub secret_key: Vec<u8>,
    pub ext_public_key: Vec<u8>,
    pub ext_secret_key: Vec<u8>,
}

impl AddressPrefixes {
    pub fn get(&self, kind: Base58Type) -> &[u8] {
        match kind {
            Base58Type::PubkeyAddress => &self.pubkey_address,
            Base58Type::ScriptAddress => &self.script_address,
            Base58Type::SecretKey => &self.secret_key,
            Base58Type::ExtPublicKey => &self.ext_public_key,
            Base58Type::ExtSecretKey => &self.ext_secret_key,
        }
    }

    fn main() -> Self {
        Self {
            pubkey_address: vec![3],
            script_address: vec![85],
            secret_key: vec![153],
            ext_public_key: vec![0x04, 0x88, 0xB2, 0x1E],
            ext_secret_key: vec![0x04, 0x88, 0xAD, 0xE4],
        }
    }

    fn test() -> Self {
        Self {
            pubkey_address: vec![97],
            script_address: vec![196],
            secret_key: vec![239],
            ext_public_key: vec![0x04, 0x35, 0x87, 0xCF],
            ext_secret_key: vec![0x04, 0x35, 0x83, 0x94],
        }
    }
}

/// Uncompressed SEC1 public key that signs network alerts
///
/// Only the encoding is checked here; signature verification belongs to
/// the alert handler.
#[derive(Clone, PartialEq, Eq)]
pub struct AlertKey([u8; AlertKey::LEN]);

impl AlertKey {
    pub const LEN: usize = 65;

    pub fn from_hex(hex: &str) -> Result<Self, ParamsError> {
        let bytes = hex::decode(hex).map_err(|e| ParamsError::Config(format!("alert key: {}", e)))?;
        let key: [u8; Self::LEN] = bytes
            .try_into()
            .map_err(|_| ParamsError::Config("alert key must be 65 bytes".to_string()))?;
        if key[0] != 0x04 {
            return Err(ParamsError::Config("alert key must be an uncompressed point".to_string()));
        }
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for AlertKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AlertKey({})", self.to_hex())
    }
}

impl Serialize for AlertKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Everything that distinguishes one chain variant from another
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainParams {
    pub network: Network,
    /// Prefix of every wire message
    pub message_start: [u8; 4],
    pub alert_key: AlertKey,
    pub default_port: u16,
    pub rpc_port: u16,
    /// Easiest target consensus accepts
    pub pow_limit: Target,
    pub genesis: Block,
    pub genesis_hash: Hash,
    pub dns_seeds: Vec<DnsSeed>,
    pub fixed_seeds: Vec<SeedAddress>,
    pub base58_prefixes: AddressPrefixes,
    /// Last height at which proof-of-work blocks are accepted
    pub last_pow_block: u32,
    /// First height at which proof-of-stake blocks are accepted
    pub pos_start_block: u32,
    /// Subdirectory of the data directory; empty for main
    pub data_dir: &'static str,
}

/// Replacement genesis header fields for a derived network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenesisOverride {
    pub bits: u32,
    pub nonce: u32,
    /// Constants to verify the patched block against. `None` skips the check.
    pub expected: Option<GenesisCheck>,
}

/// Fields a derived network replaces; `None` keeps the base value
#[derive(Debug, Clone, Default)]
pub struct ChainParamsOverrides {
    pub message_start: Option<[u8; 4]>,
    pub alert_key: Option<AlertKey>,
    pub default_port: Option<u16>,
    pub rpc_port: Option<u16>,
    pub pow_limit: Option<Target>,
    pub genesis: Option<GenesisOverride>,
    pub dns_seeds: Option<Vec<DnsSeed>>,
    pub fixed_seeds: Option<Vec<SeedAddress>>,
    pub base58_prefixes: Option<AddressPrefixes>,
    pub last_pow_block: Option<u32>,
    pub pos_start_block: Option<u32>,
    pub data_dir: Option<&'static str>,
}

impl ChainParams {
    /// Main network parameters
    ///
    /// Fails if the genesis block built from the embedded literals does not
    /// hash to the embedded constants.
    pub fn main<R: Rng + ?Sized>(now: u64, rng: &mut R) -> Result<Self, ParamsError> {
        let pow_limit = Target::MAX >> POW_LIMIT_SHIFT;

        let genesis = build_genesis_block(&GenesisSpec::main(pow_limit.to_compact()));
        verify_genesis(Network::Main, &genesis, &MAIN_GENESIS_CHECK)?;

        Ok(Self {
            network: Network::Main,
            message_start: MAIN_MESSAGE_START,
            alert_key: AlertKey::from_hex(MAIN_ALERT_KEY)?,
            default_port: MAIN_DEFAULT_PORT,
            rpc_port: MAIN_RPC_PORT,
            pow_limit,
            genesis_hash: genesis.hash(),
            genesis,
            dns_seeds: MAIN_DNS_SEEDS.to_vec(),
            fixed_seeds: convert_seeds(MAIN_FIXED_SEEDS, now, rng),
            base58_prefixes: AddressPrefixes::main(),
            last_pow_block: MAIN_LAST_POW_BLOCK,
            pos_start_block: POS_START_BLOCK,
            data_dir: "",
        })
    }

    /// Test network parameters, derived from `main`
    pub fn testnet<R: Rng + ?Sized>(main: &ChainParams, now: u64, rng: &mut R) -> Result<Self, ParamsError> {
        let pow_limit = Target::MAX >> POW_LIMIT_SHIFT;

        main.derive(
            Network::TestNet,
            ChainParamsOverrides {
                message_start: Some(TEST_MESSAGE_START),
                alert_key: Some(AlertKey::from_hex(TEST_ALERT_KEY)?),
                default_port: Some(TEST_DEFAULT_PORT),
                rpc_port: Some(TEST_RPC_PORT),
                pow_limit: Some(pow_limit),
                genesis: Some(GenesisOverride {
                    bits: pow_limit.to_compact(),
                    nonce: TEST_GENESIS_NONCE,
                    expected: Some(TEST_GENESIS_CHECK),
                }),
                dns_seeds: Some(Vec::new()),
                fixed_seeds: Some(convert_seeds(TEST_FIXED_SEEDS, now, rng)),
                base58_prefixes: Some(AddressPrefixes::test()),
                last_pow_block: Some(TEST_LAST_POW_BLOCK),
                data_dir: Some("testnet"),
                ..Default::default()
            },
        )
    }

    /// New parameter set for `network`: these values, with `overrides` applied
    ///
    /// A genesis override keeps the coinbase transaction and time and only
    /// replaces the header's bits and nonce.
    pub fn derive(&self, network: Network, overrides: ChainParamsOverrides) -> Result<Self, ParamsError> {
        let genesis = match overrides.genesis {
            Some(patch) => {
                let block = rehash_with_header(&self.genesis, patch.bits, patch.nonce);
                match patch.expected {
                    Some(expected) => verify_genesis(network, &block, &expected)?,
                    None => warn!(%network, hash = %block.hash(), "genesis self-check disabled"),
                }
                block
            }
            None => self.genesis.clone(),
        };

        Ok(Self {
            network,
            message_start: overrides.message_start.unwrap_or(self.message_start),
            alert_key: overrides.alert_key.unwrap_or_else(|| self.alert_key.clone()),
            default_port: overrides.default_port.unwrap_or(self.default_port),
            rpc_port: overrides.rpc_port.unwrap_or(self.rpc_port),
            pow_limit: overrides.pow_limit.unwrap_or(self.pow_limit),
            genesis_hash: genesis.hash(),
            genesis,
            dns_seeds: overrides.dns_seeds.unwrap_or_else(|| self.dns_seeds.clone()),
            fixed_seeds: overrides.fixed_seeds.unwrap_or_else(|| self.fixed_seeds.clone()),
            base58_prefixes: overrides
                .base58_prefixes
                .unwrap_or_else(|| self.base58_prefixes.clone()),
            last_pow_block: overrides.last_pow_block.unwrap_or(self.last_pow_block),
            pos_start_block: overrides.pos_start_block.unwrap_or(self.pos_start_block),
            data_dir: overrides.data_dir.unwrap_or(self.data_dir),
        })
    }

    pub fn base58_prefix(&self, kind: Base58Type) -> &[u8] {
        self.base58_prefixes.get(kind)
    }

    /// Message start as the little-endian u32 a wire header decodes to
    pub fn magic_u32(&self) -> u32 {
        u32::from_le_bytes(self.message_start)
    }

    pub fn is_pow_allowed(&self, height: u32) -> bool {
        height <= self.last_pow_block
    }

    pub fn is_pos_allowed(&self, height: u32) -> bool {
        height >= self.pos_start_block
    }

    pub fn genesis_info(&self) -> GenesisInfo {
        GenesisInfo::new(&self.genesis)
    }
}

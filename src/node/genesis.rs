//! Genesis block generation for the DRZ chains
//!
//! Builds the first block of a chain from fixed literals and checks the
//! result against the hash and merkle root every node has to agree on.
//! The test chain reuses the main chain's coinbase transaction and time and
//! only patches the header's difficulty bits and nonce.

use tracing::debug;

use crate::consensus::{Block, BlockHeader, Script, Transaction, TxOut};
use crate::crypto::{compute_merkle_root, Hash};
use crate::error::ParamsError;
use crate::params::Network;

/// Headline embedded in the genesis coinbase
pub const GENESIS_MESSAGE: &str = "http://www.bbc.co.uk/news/uk-35196493";

/// Number pushed after the leading zero in the coinbase script
pub const GENESIS_MARKER: i64 = 42;

/// Genesis timestamp, shared by the coinbase transaction and the header
pub const GENESIS_TIME: u32 = 1451480642;

/// Genesis block and coinbase version
pub const GENESIS_VERSION: i32 = 1;

pub const MAIN_GENESIS_NONCE: u32 = 152456;
pub const TEST_GENESIS_NONCE: u32 = 35117;

/// Main chain genesis constants, internal byte order.
///
/// ```text
/// hash        2763a81e7d1c9829c82e06789c2c0ba204182f51f29d58e58681c59151694576
/// merkle root f0e597ad1f9473d01d0593e00333baba4efecf24f52e219203955f8a80825f97
/// ```
pub const MAIN_GENESIS_CHECK: GenesisCheck = GenesisCheck {
    hash: Hash::from_bytes([
        0x76, 0x45, 0x69, 0x51, 0x91, 0xc5, 0x81, 0x86, 0xe5, 0x58, 0x9d, 0xf2, 0x51, 0x2f, 0x18, 0x04,
        0xa2, 0x0b, 0x2c, 0x9c, 0x78, 0x06, 0x2e, 0xc8, 0x29, 0x98, 0x1c, 0x7d, 0x1e, 0xa8, 0x63, 0x27,
    ]),
    merkle_root: GENESIS_MERKLE_ROOT,
};

/// Test chain genesis constants. Same merkle root as main.
///
/// ```text
/// hash        30146be4d9b945a622c04bb1538ed88e32128aa51158fbca6a862b8e547774a3
/// ```
pub const TEST_GENESIS_CHECK: GenesisCheck = GenesisCheck {
    hash: Hash::from_bytes([
        0xa3, 0x74, 0x77, 0x54, 0x8e, 0x2b, 0x86, 0x6a, 0xca, 0xfb, 0x58, 0x11, 0xa5, 0x8a, 0x12, 0x32,
        0x8e, 0xd8, 0x8e, 0x53, 0xb1, 0x4b, 0xc0, 0x22, 0xa6, 0x45, 0xb9, 0xd9, 0xe4, 0x6b, 0x14, 0x30,
    ]),
    merkle_root: GENESIS_MERKLE_ROOT,
};

const GENESIS_MERKLE_ROOT: Hash = Hash::from_bytes([
    0x97, 0x5f, 0x82, 0x80, 0x8a, 0x5f, 0x95, 0x03, 0x92, 0x21, 0x2e, 0xf5, 0x24, 0xcf, 0xfe, 0x4e,
    0xba, 0xba, 0x33, 0x03, 0xe0, 0x93, 0x05, 0x1d, 0xd0, 0x73, 0x94, 0x1f, 0xad, 0x97, 0xe5, 0xf0,
]);

/// Literal inputs of a genesis block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenesisSpec {
    pub message: &'static str,
    pub marker: i64,
    pub version: i32,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl GenesisSpec {
    /// Main chain genesis at the given difficulty bits
    pub const fn main(bits: u32) -> Self {
        Self {
            message: GENESIS_MESSAGE,
            marker: GENESIS_MARKER,
            version: GENESIS_VERSION,
            time: GENESIS_TIME,
            bits,
            nonce: MAIN_GENESIS_NONCE,
        }
    }
}

/// Expected genesis hash and merkle root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenesisCheck {
    pub hash: Hash,
    pub merkle_root: Hash,
}

/// Create a genesis block
///
/// The coinbase script is `OP_0 <marker> <message bytes>` and the single
/// output is empty. This is byte-for-byte reproducible.
pub fn build_genesis_block(spec: &GenesisSpec) -> Block {
    let script_sig = Script::new()
        .push_int(0)
        .push_num(spec.marker)
        .push_slice(spec.message.as_bytes());

    let coinbase = Transaction::coinbase(spec.version, spec.time, script_sig, vec![TxOut::empty()]);
    let merkle_root = compute_merkle_root(&[coinbase.txid()]);

    let header = BlockHeader::new(
        spec.version,
        Hash::zero(), // No previous block
        merkle_root,
        spec.time,
        spec.bits,
        spec.nonce,
    );

    Block::new(header, vec![coinbase])
}

/// Copy of `block` with a different difficulty and nonce; transactions,
/// merkle root and time are kept.
pub fn rehash_with_header(block: &Block, bits: u32, nonce: u32) -> Block {
    let mut patched = block.clone();
    patched.header.bits = bits;
    patched.header.nonce = nonce;
    patched
}

/// Verify a genesis block against its embedded constants
///
/// Both the block hash and the merkle root recomputed from the transactions
/// must match.
pub fn verify_genesis(network: Network, block: &Block, expected: &GenesisCheck) -> Result<(), ParamsError> {
    let merkle_root = block.compute_merkle_root();
    if merkle_root != expected.merkle_root || block.header.merkle_root != merkle_root {
        return Err(ParamsError::MerkleRootMismatch {
            network,
            expected: expected.merkle_root,
            computed: merkle_root,
        });
    }

    let hash = block.hash();
    if hash != expected.hash {
        return Err(ParamsError::GenesisMismatch {
            network,
            expected: expected.hash,
            computed: hash,
        });
    }

    debug!(%network, %hash, %merkle_root, "genesis block verified");
    Ok(())
}

/// Genesis block summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenesisInfo {
    pub hash: Hash,
    pub merkle_root: Hash,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl GenesisInfo {
    pub fn new(block: &Block) -> Self {
        Self {
            hash: block.hash(),
            merkle_root: block.header.merkle_root,
            time: block.header.time,
            bits: block.header.bits,
            nonce: block.header.nonce,
        }
    }
}

//! DRZ Chain Parameters Library
//!
//! Network identity and consensus constants for the DRZ main and test
//! chains: message start bytes, ports, alert key, address prefixes,
//! proof-of-work limit, transition heights, seed lists and a self-checked
//! genesis block.
//!
//! Startup builds a [`params::NetworkRegistry`], selects a network and
//! freezes it into a [`params::NetworkContext`] shared by the rest of the node.

pub mod config;
pub mod consensus;
pub mod crypto;
pub mod error;
pub mod node;
pub mod p2p;
pub mod params;

pub use error::ParamsError;

/// Network-independent constants
pub mod constants {
    /// Chain name (short form for addresses/logos)
    pub const CHAIN_NAME: &str = "DRZ";

    /// Seconds in a week; fixed seeds look one to two weeks stale
    pub const ONE_WEEK: u64 = 7 * 24 * 60 * 60;

    /// Proof-of-work limit is the all-ones target shifted right by this many bits
    pub const POW_LIMIT_SHIFT: u32 = 20;
}

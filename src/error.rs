//! Error types for chain parameter construction and selection

use thiserror::Error;

use crate::crypto::Hash;
use crate::params::Network;

/// Startup configuration failures. None of these are recoverable: a node
/// that hits one must stop before touching the network or its data directory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("{network} genesis hash mismatch: expected {expected}, computed {computed}")]
    GenesisMismatch {
        network: Network,
        expected: Hash,
        computed: Hash,
    },

    #[error("{network} genesis merkle root mismatch: expected {expected}, computed {computed}")]
    MerkleRootMismatch {
        network: Network,
        expected: Hash,
        computed: Hash,
    },

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("No chain parameters registered for {0}")]
    UnsupportedNetwork(Network),

    #[error("Configuration error: {0}")]
    Config(String),
}

//! Chain parameters - per-network constants, derivation and selection

mod chain_params;
mod context;
mod network;
mod registry;

pub use chain_params::*;
pub use context::*;
pub use network::*;
pub use registry::*;

//! Consensus data model - blocks, transactions, scripts and difficulty targets

mod block;
pub mod encode;
mod script;
mod target;
mod transaction;

pub use block::*;
pub use script::*;
pub use target::*;
pub use transaction::*;

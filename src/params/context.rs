//! Shared handle to the parameters a node runs with.

use std::ops::Deref;
use std::sync::Arc;

use super::ChainParams;

/// Immutable, cheaply cloned view of one network's parameters
///
/// Created once at startup and handed to every subsystem that needs network
/// constants. Independent contexts for different networks can coexist in one
/// process.
#[derive(Debug, Clone)]
pub struct NetworkContext {
    params: Arc<ChainParams>,
}

impl NetworkContext {
    pub fn new(params: ChainParams) -> Self {
        Self::from_arc(Arc::new(params))
    }

    pub(crate) fn from_arc(params: Arc<ChainParams>) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ChainParams {
        &self.params
    }
}

impl Deref for NetworkContext {
    type Target = ChainParams;

    fn deref(&self) -> &ChainParams {
        &self.params
    }
}

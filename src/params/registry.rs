//! Network registry
//!
//! Holds one parameter set per supported network and tracks which one the
//! node runs on. Selection needs `&mut self`, so it can only happen while
//! startup still owns the registry; [`NetworkRegistry::freeze`] then hands
//! out a shareable read-only [`NetworkContext`].

use rand::Rng;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use super::{ChainParams, Network, NetworkContext};
use crate::error::ParamsError;
use crate::p2p::unix_time;

#[derive(Debug, Clone)]
pub struct NetworkRegistry {
    params: BTreeMap<Network, Arc<ChainParams>>,
    active: Network,
}

impl NetworkRegistry {
    /// Build every supported network against the system clock
    pub fn new() -> Result<Self, ParamsError> {
        Self::with_clock(unix_time(), &mut rand::thread_rng())
    }

    /// Build every supported network with an explicit time and RNG for the
    /// fixed-seed timestamps
    pub fn with_clock<R: Rng + ?Sized>(now: u64, rng: &mut R) -> Result<Self, ParamsError> {
        let main = ChainParams::main(now, rng)?;
        let test = ChainParams::testnet(&main, now, rng)?;
        Self::from_params([main, test])
    }

    /// Registry over an arbitrary set of networks
    ///
    /// Main is active when present, otherwise the first network in order.
    /// A later set for the same network replaces an earlier one.
    pub fn from_params(params: impl IntoIterator<Item = ChainParams>) -> Result<Self, ParamsError> {
        let params: BTreeMap<Network, Arc<ChainParams>> = params
            .into_iter()
            .map(|p| (p.network, Arc::new(p)))
            .collect();

        let active = if params.contains_key(&Network::Main) {
            Network::Main
        } else {
            *params
                .keys()
                .next()
                .ok_or_else(|| ParamsError::Config("no chain parameters to register".to_string()))?
        };

        Ok(Self { params, active })
    }

    /// Make `network` the active one
    pub fn select(&mut self, network: Network) -> Result<&ChainParams, ParamsError> {
        if !self.params.contains_key(&network) {
            return Err(ParamsError::UnsupportedNetwork(network));
        }
        self.active = network;
        info!(%network, "selected chain parameters");
        Ok(self.current())
    }

    /// Select test when `testnet` is set, main otherwise
    pub fn select_from_flag(&mut self, testnet: bool) -> Result<&ChainParams, ParamsError> {
        self.select(Network::from_testnet_flag(testnet))
    }

    /// The active parameter set
    pub fn current(&self) -> &ChainParams {
        // `active` is always a key: set from a present key and only replaced
        // after a `contains_key` check.
        &self.params[&self.active]
    }

    pub fn active(&self) -> Network {
        self.active
    }

    pub fn get(&self, network: Network) -> Option<&ChainParams> {
        self.params.get(&network).map(|p| p.as_ref())
    }

    pub fn networks(&self) -> impl Iterator<Item = Network> + '_ {
        self.params.keys().copied()
    }

    /// Read-only handle to the active parameters for the rest of the process
    pub fn freeze(self) -> NetworkContext {
        let params = Arc::clone(&self.params[&self.active]);
        NetworkContext::from_arc(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const NOW: u64 = 1_700_000_000;

    fn registry() -> NetworkRegistry {
        NetworkRegistry::with_clock(NOW, &mut StdRng::seed_from_u64(5)).unwrap()
    }

    #[test]
    fn test_defaults_to_main() {
        let registry = registry();
        assert_eq!(registry.active(), Network::Main);
        assert_eq!(registry.current().default_port, 5914);
    }

    #[test]
    fn test_select_switches_ports() {
        let mut registry = registry();
        assert_eq!(registry.select(Network::Main).unwrap().default_port, 5914);
        assert_eq!(registry.select(Network::TestNet).unwrap().default_port, 25914);
        assert_eq!(registry.current().default_port, 25914);
    }

    #[test]
    fn test_select_from_flag() {
        let mut registry = registry();
        registry.select_from_flag(true).unwrap();
        assert_eq!(registry.active(), Network::TestNet);
        registry.select_from_flag(false).unwrap();
        assert_eq!(registry.active(), Network::Main);
    }

    #[test]
    fn test_switching_back_leaves_no_trace() {
        let mut registry = registry();
        let fresh = registry.select(Network::Main).unwrap().clone();

        registry.select(Network::TestNet).unwrap();
        let again = registry.select(Network::Main).unwrap();
        assert_eq!(*again, fresh);
    }

    #[test]
    fn test_unsupported_network_is_rejected() {
        let main = registry().get(Network::Main).unwrap().clone();
        let mut main_only = NetworkRegistry::from_params([main]).unwrap();

        let err = main_only.select(Network::TestNet).unwrap_err();
        assert_eq!(err, ParamsError::UnsupportedNetwork(Network::TestNet));
        assert_eq!(main_only.active(), Network::Main);
    }

    #[test]
    fn test_empty_registry_is_rejected() {
        assert!(NetworkRegistry::from_params(Vec::new()).is_err());
    }

    #[test]
    fn test_registry_without_main_activates_first() {
        let test = registry().get(Network::TestNet).unwrap().clone();
        let registry = NetworkRegistry::from_params([test]).unwrap();
        assert_eq!(registry.active(), Network::TestNet);
    }

    #[test]
    fn test_networks_listed_in_order() {
        let networks: Vec<_> = registry().networks().collect();
        assert_eq!(networks, vec![Network::Main, Network::TestNet]);
    }

    #[test]
    fn test_freeze_keeps_selection() {
        let mut registry = registry();
        registry.select(Network::TestNet).unwrap();
        let context = registry.freeze();
        assert_eq!(context.network, Network::TestNet);
        assert_eq!(context.rpc_port, 25915);
    }
}

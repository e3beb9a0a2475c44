//! Property-based and scenario tests for DRZ chain parameters
//!
//! These tests verify the startup invariants nodes depend on: genesis
//! constants, seed timestamp ranges and network selection.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use drz_core::consensus::{BlockHeader, Target};
use drz_core::constants::ONE_WEEK;
use drz_core::crypto::{compute_merkle_root, sha256d, Hash};
use drz_core::node::{
    build_genesis_block, rehash_with_header, GenesisSpec, MAIN_GENESIS_CHECK, MAIN_GENESIS_NONCE,
};
use drz_core::p2p::{convert_seeds, SeedSpec};
use drz_core::params::{Base58Type, ChainParams, Network, NetworkRegistry};
use drz_core::ParamsError;

const NOW: u64 = 1_700_000_000;
const LIMIT_BITS: u32 = 0x1e0fffff;

fn seed_spec() -> impl Strategy<Value = SeedSpec> {
    (any::<[u8; 16]>(), any::<u16>()).prop_map(|(addr, port)| SeedSpec::new(addr, port))
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

proptest! {
    /// Every fixed seed is stamped between one and two weeks ago
    #[test]
    fn prop_seed_timestamps_in_window(
        specs in prop::collection::vec(seed_spec(), 0..64),
        now in (2 * ONE_WEEK)..4_000_000_000u64,
        rng_seed in any::<u64>(),
    ) {
        let seeds = convert_seeds(&specs, now, &mut StdRng::seed_from_u64(rng_seed));

        for seed in &seeds {
            prop_assert!(seed.last_seen >= now - 2 * ONE_WEEK);
            prop_assert!(seed.last_seen < now - ONE_WEEK);
        }
    }

    /// Conversion keeps every entry, in order, with address and port intact
    #[test]
    fn prop_seed_conversion_preserves_table(
        specs in prop::collection::vec(seed_spec(), 0..64),
        rng_seed in any::<u64>(),
    ) {
        let seeds = convert_seeds(&specs, NOW, &mut StdRng::seed_from_u64(rng_seed));

        prop_assert_eq!(seeds.len(), specs.len());
        for (seed, spec) in seeds.iter().zip(&specs) {
            prop_assert_eq!(seed.addr_bytes(), spec.addr);
            prop_assert_eq!(seed.addr.port(), spec.port);
        }
    }

    /// A single leaf is its own merkle root
    #[test]
    fn prop_single_leaf_merkle_root(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let leaf = sha256d(&data);
        prop_assert_eq!(compute_merkle_root(&[leaf]), leaf);
    }

    /// Different nonces produce different hashes
    #[test]
    fn prop_different_nonce_different_hash(nonce in 0u32..u32::MAX) {
        let header1 = BlockHeader::new(1, Hash::zero(), Hash::zero(), 0, LIMIT_BITS, nonce);
        let header2 = BlockHeader::new(1, Hash::zero(), Hash::zero(), 0, LIMIT_BITS, nonce + 1);

        prop_assert_ne!(header1.hash(), header2.hash());
    }

    /// Re-headering the genesis block with other bits/nonce never reproduces its hash
    #[test]
    fn prop_patched_genesis_hash_differs(bits in any::<u32>(), nonce in any::<u32>()) {
        prop_assume!(bits != LIMIT_BITS || nonce != MAIN_GENESIS_NONCE);

        let main = build_genesis_block(&GenesisSpec::main(LIMIT_BITS));
        let patched = rehash_with_header(&main, bits, nonce);

        prop_assert_eq!(&patched.transactions, &main.transactions);
        prop_assert_ne!(patched.hash(), main.hash());
    }

    /// Shifting a target right never makes it larger
    #[test]
    fn prop_target_shift_monotonic(bytes in any::<[u8; 32]>(), shift in 0u32..300) {
        let target = Target(bytes);
        prop_assert!(target >> shift <= target);
    }
}

// ============================================================================
// SCENARIO TESTS
// ============================================================================

fn registry() -> NetworkRegistry {
    NetworkRegistry::with_clock(NOW, &mut StdRng::seed_from_u64(1)).unwrap()
}

/// Main genesis block reproduces the embedded hash and merkle root
#[test]
fn test_main_genesis_constants() {
    let genesis = build_genesis_block(&GenesisSpec::main(LIMIT_BITS));

    assert_eq!(genesis.hash(), MAIN_GENESIS_CHECK.hash);
    assert_eq!(genesis.header.merkle_root, MAIN_GENESIS_CHECK.merkle_root);
    assert_eq!(
        MAIN_GENESIS_CHECK.merkle_root.to_hex(),
        "f0e597ad1f9473d01d0593e00333baba4efecf24f52e219203955f8a80825f97"
    );
}

/// Registry ports follow the selected network
#[test]
fn test_select_ports() {
    let mut registry = registry();

    registry.select(Network::Main).unwrap();
    assert_eq!(registry.current().default_port, 5914);

    registry.select(Network::TestNet).unwrap();
    assert_eq!(registry.current().default_port, 25914);
}

/// main -> test -> main equals a freshly built main
#[test]
fn test_reselect_matches_fresh_registry() {
    let mut switched = registry();
    switched.select(Network::Main).unwrap();
    switched.select(Network::TestNet).unwrap();
    switched.select(Network::Main).unwrap();

    let mut fresh = registry();
    fresh.select(Network::Main).unwrap();

    assert_eq!(switched.current(), fresh.current());
}

/// Selecting a network the registry does not carry is an error, not a fallback
#[test]
fn test_unsupported_selection_rejected() {
    let main = ChainParams::main(NOW, &mut StdRng::seed_from_u64(2)).unwrap();
    let mut registry = NetworkRegistry::from_params([main]).unwrap();

    assert_eq!(
        registry.select_from_flag(true).unwrap_err(),
        ParamsError::UnsupportedNetwork(Network::TestNet)
    );
    assert_eq!(registry.current().network, Network::Main);

    assert!(matches!(
        "regtest".parse::<Network>(),
        Err(ParamsError::UnknownNetwork(_))
    ));
}

/// Main and test genesis blocks share a coinbase but not a hash
#[test]
fn test_genesis_blocks_do_not_collide() {
    let registry = registry();
    let main = registry.get(Network::Main).unwrap();
    let test = registry.get(Network::TestNet).unwrap();

    assert_eq!(main.genesis.transactions, test.genesis.transactions);
    assert_ne!(main.genesis_hash, test.genesis_hash);
    assert_eq!(
        test.genesis_hash.to_hex(),
        "30146be4d9b945a622c04bb1538ed88e32128aa51158fbca6a862b8e547774a3"
    );
}

/// Address prefixes keep main and test addresses visually apart
#[test]
fn test_address_prefixes_render_differently() {
    let registry = registry();
    let main = registry.get(Network::Main).unwrap();
    let test = registry.get(Network::TestNet).unwrap();

    let encode = |prefix: &[u8]| {
        let mut payload = prefix.to_vec();
        payload.extend_from_slice(&[0u8; 20]);
        bs58::encode(payload).with_check().into_string()
    };

    let main_addr = encode(main.base58_prefix(Base58Type::PubkeyAddress));
    let test_addr = encode(test.base58_prefix(Base58Type::PubkeyAddress));
    assert!(main_addr.starts_with('2'));
    assert!(test_addr.starts_with('g'));
}

/// A frozen context can be read from many threads
#[test]
fn test_context_is_shareable() {
    let mut registry = registry();
    registry.select_from_flag(true).unwrap();
    let context = registry.freeze();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let ctx = context.clone();
            std::thread::spawn(move || ctx.genesis_hash)
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), context.genesis_hash);
    }
}

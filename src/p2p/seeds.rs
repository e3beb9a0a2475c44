//! Seed Node Configuration
//!
//! Bootstrap peers for initial discovery: DNS seed hostnames and a compact
//! table of fixed addresses. A node only needs one or two of these; once
//! connected it learns plenty of fresher addresses from its peers.

use rand::Rng;
use serde::Serialize;
use std::net::{Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::constants::ONE_WEEK;

/// Compact fixed-seed record: IPv6 (or IPv4-mapped) address and port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeedSpec {
    pub addr: [u8; 16],
    pub port: u16,
}

impl SeedSpec {
    pub const fn new(addr: [u8; 16], port: u16) -> Self {
        Self { addr, port }
    }

    /// `::ffff:a.b.c.d`
    pub const fn ipv4(octets: [u8; 4], port: u16) -> Self {
        let [a, b, c, d] = octets;
        Self {
            addr: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, a, b, c, d],
            port,
        }
    }
}

/// Main network fixed seeds. Empty until a crawl of the live network is
/// exported into this table.
pub static MAIN_FIXED_SEEDS: &[SeedSpec] = &[];

/// Test network fixed seeds
pub static TEST_FIXED_SEEDS: &[SeedSpec] = &[];

/// A bootstrap address with a synthetic "last seen" time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SeedAddress {
    pub addr: SocketAddrV6,
    /// Seconds since Unix epoch
    pub last_seen: u64,
}

impl SeedAddress {
    /// Socket address with IPv4-mapped addresses unwrapped
    pub fn socket_addr(&self) -> SocketAddr {
        match self.addr.ip().to_ipv4_mapped() {
            Some(v4) => SocketAddr::V4(SocketAddrV4::new(v4, self.addr.port())),
            None => SocketAddr::V6(self.addr),
        }
    }

    /// Raw 16 address bytes as stored in the seed table
    pub fn addr_bytes(&self) -> [u8; 16] {
        self.addr.ip().octets()
    }
}

/// Convert a fixed seed table into timestamped addresses
///
/// Order and length are preserved. Each entry gets a last-seen time drawn
/// uniformly from `[now - 2 weeks, now - 1 week)`, so real gossiped
/// addresses look fresher than these.
pub fn convert_seeds<R: Rng + ?Sized>(specs: &[SeedSpec], now: u64, rng: &mut R) -> Vec<SeedAddress> {
    specs
        .iter()
        .map(|spec| SeedAddress {
            addr: SocketAddrV6::new(Ipv6Addr::from(spec.addr), spec.port, 0, 0),
            last_seen: now
                .saturating_sub(ONE_WEEK)
                .saturating_sub(rng.gen_range(1..=ONE_WEEK)),
        })
        .collect()
}

/// [`convert_seeds`] against the system clock and thread-local RNG
pub fn convert_seeds_now(specs: &[SeedSpec]) -> Vec<SeedAddress> {
    let seeds = convert_seeds(specs, unix_time(), &mut rand::thread_rng());
    debug!(count = seeds.len(), "converted fixed seeds");
    seeds
}

/// Current time in seconds since Unix epoch
pub fn unix_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// A DNS seed: display name and the hostname to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DnsSeed {
    pub name: &'static str,
    pub host: &'static str,
}

impl DnsSeed {
    pub const fn new(host: &'static str) -> Self {
        Self { name: host, host }
    }

    /// `host:port`, ready for a resolver
    pub fn endpoint(&self, port: u16) -> String {
        format!("{}:{}", self.host, port)
    }
}

/// Main network DNS seeds, queried in this order
pub static MAIN_DNS_SEEDS: &[DnsSeed] = &[
    DnsSeed::new("drz-seed01.chainworksindustries.com"),
    DnsSeed::new("drz-seed02.chainworksindustries.com"),
    DnsSeed::new("drz-seed03.chainworksindustries.com"),
    DnsSeed::new("drz-seed04.chainworksindustries.com"),
    DnsSeed::new("drz-seed05.chainworksindustries.com"),
    DnsSeed::new("drz-seed06.chainworksindustries.com"),
    DnsSeed::new("drz-seed07.chainworksindustries.com"),
    DnsSeed::new("drz-seed08.chainworksindustries.com"),
    DnsSeed::new("drz-seed09.chainworksindustries.com"),
    DnsSeed::new("drz-seed10.chainworksindustries.com"),
    DnsSeed::new("drz-seed11.chainworksindustries.com"),
    DnsSeed::new("drz-seed12.chainworksindustries.com"),
    DnsSeed::new("drz-seed13.chainworksindustries.com"),
    DnsSeed::new("drz-seed14.chainworksindustries.com"),
    DnsSeed::new("drz-seed15.chainworksindustries.com"),
    DnsSeed::new("drz-seed16.chainworksindustries.com"),
    DnsSeed::new("drz-seed17.chainworksindustries.com"),
    DnsSeed::new("drz-seed18.chainworksindustries.com"),
    DnsSeed::new("drz-seed19.chainworksindustries.com"),
    DnsSeed::new("drz-seed20.chainworksindustries.com"),
    DnsSeed::new("drz-seed21.chainworksindustries.com"),
    DnsSeed::new("drz-seed22.chainworksindustries.com"),
    DnsSeed::new("drz-seed23.chainworksindustries.com"),
    DnsSeed::new("drz-seed24.chainworksindustries.com"),
    DnsSeed::new("drz-seed25.chainworksindustries.com"),
    DnsSeed::new("drz-seed26.chainworksindustries.com"),
    DnsSeed::new("drz-seed27.chainworksindustries.com"),
    DnsSeed::new("drz-seed28.chainworksindustries.com"),
    DnsSeed::new("drz-seed29.chainworksindustries.com"),
    DnsSeed::new("drz-seed30.chainworksindustries.com"),
    DnsSeed::new("drz-seed31.chainworksindustries.com"),
    DnsSeed::new("drz-seed32.chainworksindustries.com"),
    DnsSeed::new("drz-seed33.chainworksindustries.com"),
    DnsSeed::new("drz-seed34.chainworksindustries.com"),
    DnsSeed::new("drz-seed35.chainworksindustries.com"),
    DnsSeed::new("drz-seed36.chainworksindustries.com"),
    DnsSeed::new("drz-seed37.chainworksindustries.com"),
    DnsSeed::new("drz-seed38.chainworksindustries.com"),
    DnsSeed::new("drz-seed39.chainworksindustries.com"),
    DnsSeed::new("drz-seed40.chainworksindustries.com"),
    DnsSeed::new("drz-seed41.chainworksindustries.com"),
    DnsSeed::new("drz-seed42.chainworksindustries.com"),
    DnsSeed::new("drz-seed43.chainworksindustries.com"),
    DnsSeed::new("drz-seed44.chainworksindustries.com"),
    DnsSeed::new("drz-seed45.chainworksindustries.com"),
    DnsSeed::new("drz-seed46.chainworksindustries.com"),
    DnsSeed::new("drz-seed47.chainworksindustries.com"),
    DnsSeed::new("drz-seed48.chainworksindustries.com"),
    DnsSeed::new("drz-seed49.chainworksindustries.com"),
    DnsSeed::new("drz-seed50.chainworksindustries.com"),
    DnsSeed::new("drz-seed51.chainworksindustries.com"),
    DnsSeed::new("drz-seed52.chainworksindustries.com"),
    DnsSeed::new("drz-seed53.chainworksindustries.com"),
    DnsSeed::new("drz-seed54.chainworksindustries.com"),
    DnsSeed::new("drz-seed55.chainworksindustries.com"),
    DnsSeed::new("drz-seed56.chainworksindustries.com"),
    DnsSeed::new("drz-seed57.chainworksindustries.com"),
    DnsSeed::new("drz-seed58.chainworksindustries.com"),
    DnsSeed::new("drz-seed59.chainworksindustries.com"),
    DnsSeed::new("drz-seed60.chainworksindustries.com"),
    DnsSeed::new("drz-seed61.chainworksindustries.com"),
    DnsSeed::new("drz-seed62.chainworksindustries.com"),
    DnsSeed::new("drz-seed63.chainworksindustries.com"),
    DnsSeed::new("drz-seed64.chainworksindustries.com"),
    DnsSeed::new("drz-seed65.chainworksindustries.com"),
    DnsSeed::new("drz-seed66.chainworksindustries.com"),
    DnsSeed::new("drz-seed67.chainworksindustries.com"),
    DnsSeed::new("drz-seed68.chainworksindustries.com"),
    DnsSeed::new("drz-seed69.chainworksindustries.com"),
    DnsSeed::new("drz-seed70.chainworksindustries.com"),
];

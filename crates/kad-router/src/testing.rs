//! Centralized Testing Utilities
//!
//! Test helpers shared by unit tests and the integration suite. Available
//! with the `test-utils` feature flag.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use kad_types::{NodeId, Peer};

pub use crate::adapters::{FailingEntropySource, FixedEntropySource};

/// Install a test-friendly tracing subscriber once per process.
///
/// Honours `RUST_LOG`; defaults to `kad_router=debug`. Later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("kad_router=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Peer with id `id` on `10.0.<id>.1`, verified and alive.
///
/// Distinct ids below 256 get distinct IPs, so per-IP limits never trigger.
pub fn make_peer(id: u8) -> Arc<Peer> {
    make_peer_at(id, IpAddr::V4(Ipv4Addr::new(10, 0, id, 1)), 4672)
}

/// Verified, alive peer at a chosen IP and UDP port (TCP port is UDP - 10).
pub fn make_peer_at(id: u8, ip: IpAddr, udp_port: u16) -> Arc<Peer> {
    Arc::new(
        Peer::new(
            NodeId::from_u128(id as u128),
            ip,
            udp_port,
            udp_port.saturating_sub(10),
        )
        .with_ip_verified(true)
        .with_alive(true),
    )
}

//! # Kad Router: K-Bucket
//!
//! A single bucket of a Kademlia routing table: a bounded, thread-safe,
//! recency-ordered collection of peers that share an XOR-distance prefix with
//! the local node.
//!
//! ## Invariants
//!
//! - No two entries share an identifier.
//! - At most `max_peers_per_ip` entries share one IP address (Sybil guard).
//! - At most `max_bucket_size` entries in total.
//! - Head of the ordering is the eviction candidate; the tail is the peer most
//!   recently confirmed alive.
//!
//! ## Architecture
//!
//! - **Domain Layer:** the bucket, its errors and config, ranking services
//! - **Ports Layer:** traits for the entropy source and config provider
//! - **Adapters Layer:** OS entropy, static and TOML config (feature `config`)
//!
//! The bucket never performs I/O and never decides eviction on its own. The
//! owning routing table combines [`KBucket::oldest_peer`], a liveness probe
//! and [`KBucket::remove_peer`] / [`KBucket::add_peer`] to replace dead peers.
//!
//! ## Example
//!
//! ```rust
//! use std::net::{IpAddr, Ipv4Addr};
//! use std::sync::Arc;
//! use kad_router::{KBucket, KBucketError, NodeId, Peer};
//!
//! let bucket = KBucket::new();
//! let peer = Arc::new(Peer::new(
//!     NodeId::from_u128(7),
//!     IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
//!     4672,
//!     4662,
//! ));
//!
//! bucket.add_peer(Arc::clone(&peer)).unwrap();
//! assert!(matches!(
//!     bucket.add_peer(Arc::clone(&peer)),
//!     Err(KBucketError::DuplicatePeer(_))
//! ));
//!
//! bucket.set_peer_alive(peer.id()).unwrap();
//! assert!(peer.is_alive());
//! ```

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod ports;

/// Test utilities (tracing setup, deterministic entropy).
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use domain::{
    find_closest, is_routing_candidate, sort_peers_by_distance, xor_distance, BucketState,
    ConfigError, KBucket, KBucketConfig, KBucketError, MAX_BUCKET_SIZE, MAX_PEERS_PER_IP,
};

pub use ports::{ConfigProvider, EntropyError, EntropySource};

pub use adapters::{OsEntropySource, StaticConfigProvider};

#[cfg(feature = "config")]
pub use adapters::TomlConfigProvider;

pub use kad_types::{Distance, NetworkAddr, NodeId, Peer, PeerType};

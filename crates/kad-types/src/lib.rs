//! # Kad Types
//!
//! Types shared by the k-bucket and its collaborators.
//!
//! - [`NodeId`]: 128-bit Kademlia identifier with XOR distance
//! - [`Distance`]: XOR distance between two identifiers (smaller is closer)
//! - [`Peer`]: peer record whose liveness flags are mutated in place
//! - [`NetworkAddr`]: address kinds a peer may be looked up by
//!
//! ## Example
//!
//! ```rust
//! use kad_types::{NodeId, Peer};
//! use std::net::{IpAddr, Ipv4Addr};
//!
//! let peer = Peer::new(
//!     NodeId::from_u128(42),
//!     IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
//!     4672,
//!     4662,
//! );
//! assert_eq!(peer.id().xor(&NodeId::from_u128(40)).as_u128(), 2);
//! ```

pub mod address;
pub mod entities;
pub mod peer;

pub use address::NetworkAddr;
pub use entities::{Distance, NodeId, ParseNodeIdError};
pub use peer::{Peer, PeerType, PEER_TTL};

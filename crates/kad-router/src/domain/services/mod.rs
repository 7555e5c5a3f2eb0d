//! Domain Services - Pure functions for Kademlia ranking
//!
//! All functions in this module are pure (no I/O, no locking) and operate on
//! snapshots taken by the bucket.

mod distance;
mod sorting;

pub use distance::xor_distance;
pub use sorting::{find_closest, is_routing_candidate, sort_peers_by_distance};

//! Peer filtering, sorting and selection.

use std::sync::Arc;

use kad_types::{NodeId, Peer};

use super::distance::xor_distance;

/// Only peers that answered from their claimed IP and are currently alive
/// may be handed out as routing candidates.
pub fn is_routing_candidate(peer: &Peer) -> bool {
    peer.is_ip_verified() && peer.is_alive()
}

/// Sort peers by XOR distance from a target node (closest first).
///
/// Equal distances only occur for equal identifiers; those fall back to the
/// identifier ordering. The sort is stable.
pub fn sort_peers_by_distance(peers: &[Arc<Peer>], target: &NodeId) -> Vec<Arc<Peer>> {
    let mut sorted = peers.to_vec();
    sorted.sort_by(|a, b| {
        xor_distance(a.id(), target)
            .cmp(&xor_distance(b.id(), target))
            .then_with(|| a.id().cmp(b.id()))
    });
    sorted
}

/// Find the `max` closest routing candidates to a target
///
/// # Arguments
/// * `peers` - Snapshot of bucket occupants
/// * `target` - Target NodeId to measure distance from
/// * `max` - Maximum number of peers to return
///
/// # Returns
/// Up to `max` verified, alive peers sorted by distance (closest first)
pub fn find_closest(peers: &[Arc<Peer>], target: &NodeId, max: usize) -> Vec<Arc<Peer>> {
    let candidates: Vec<Arc<Peer>> = peers
        .iter()
        .filter(|peer| is_routing_candidate(peer))
        .cloned()
        .collect();

    let mut sorted = sort_peers_by_distance(&candidates, target);
    sorted.truncate(max);
    sorted
}

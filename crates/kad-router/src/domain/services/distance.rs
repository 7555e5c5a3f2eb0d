//! Kademlia distance calculations.

use kad_types::{Distance, NodeId};

/// Calculate the XOR distance between two NodeIds
///
/// # Properties
/// - Symmetric: `xor_distance(a, b) == xor_distance(b, a)`
/// - Self is zero: `xor_distance(a, a) == Distance::ZERO`
/// - Unidirectional: for fixed `a` and distance `d` exactly one `b` exists
///
/// Smaller values are closer.
#[inline]
pub fn xor_distance(a: &NodeId, b: &NodeId) -> Distance {
    a.xor(b)
}

//! K-Bucket Implementation
//!
//! One bucket of a Kademlia routing table, guarded by its own lock so that
//! independent buckets never contend with each other.

mod bucket;

pub use bucket::{BucketState, KBucket};

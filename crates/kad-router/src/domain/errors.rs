//! Domain Errors for the k-bucket

use std::net::IpAddr;

use kad_types::NodeId;
use thiserror::Error;

use crate::ports::EntropyError;

/// Errors returned by [`KBucket`](crate::KBucket) operations.
///
/// None of these are fatal and none are retried internally: the owning
/// routing table picks the alternative (another bucket, another peer, skip).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KBucketError {
    /// A peer with the same identifier is already stored.
    #[error("K-bucket already contains peer {0}")]
    DuplicatePeer(NodeId),

    /// Bucket is at capacity.
    #[error("K-bucket is full ({capacity} peers)")]
    BucketFull { capacity: usize },

    /// Per-IP limit reached (Sybil resistance).
    #[error("Too many peers from {ip} (limit {limit})")]
    TooManyFromSameAddress { ip: IpAddr, limit: usize },

    /// No matching peer in this bucket.
    #[error("Peer not found in k-bucket")]
    PeerNotFound,

    /// Address lookup given a kind other than UDP or TCP.
    #[error("Unsupported address kind: {0}")]
    UnsupportedAddressKind(&'static str),

    /// Random selection on a bucket with no peers.
    #[error("K-bucket is empty")]
    EmptyBucket,

    /// Entropy could not be read.
    #[error("Random source failure: {0}")]
    RandomSourceFailure(#[from] EntropyError),
}

/// Errors building or loading a [`KBucketConfig`](crate::KBucketConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read {path}: {error}")]
    Io { path: String, error: String },

    /// Config file is not valid TOML or has wrong types.
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// Values are out of range.
    #[error("Invalid k-bucket config: {0}")]
    Invalid(String),
}

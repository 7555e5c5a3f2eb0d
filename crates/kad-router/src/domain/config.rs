//! K-bucket constants and configuration.

use super::errors::ConfigError;

/// Max number of peers in each k-bucket
pub const MAX_BUCKET_SIZE: usize = 16;

/// Number of peers permitted from the same public IP
pub const MAX_PEERS_PER_IP: usize = 3;

/// Limits enforced by a [`KBucket`](crate::KBucket).
///
/// # Security Notes
///
/// - `max_peers_per_ip` bounds how much of one bucket a single operator can
///   occupy from one address. Lowering it trades reachability of peers behind
///   shared NATs for stronger Sybil resistance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KBucketConfig {
    /// Bucket size (default: 16)
    pub max_bucket_size: usize,
    /// Maximum peers sharing one IP address (default: 3)
    pub max_peers_per_ip: usize,
}

impl Default for KBucketConfig {
    fn default() -> Self {
        Self {
            max_bucket_size: MAX_BUCKET_SIZE,
            max_peers_per_ip: MAX_PEERS_PER_IP,
        }
    }
}

impl KBucketConfig {
    /// Create a config suitable for testing (smaller values)
    pub fn for_testing() -> Self {
        Self {
            max_bucket_size: 4,
            max_peers_per_ip: 2,
        }
    }

    /// Check that both limits are non-zero and the per-IP cap fits the bucket.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bucket_size == 0 {
            return Err(ConfigError::Invalid(
                "max_bucket_size must be at least 1".to_string(),
            ));
        }
        if self.max_peers_per_ip == 0 {
            return Err(ConfigError::Invalid(
                "max_peers_per_ip must be at least 1".to_string(),
            ));
        }
        if self.max_peers_per_ip > self.max_bucket_size {
            return Err(ConfigError::Invalid(format!(
                "max_peers_per_ip ({}) exceeds max_bucket_size ({})",
                self.max_peers_per_ip, self.max_bucket_size
            )));
        }
        Ok(())
    }
}

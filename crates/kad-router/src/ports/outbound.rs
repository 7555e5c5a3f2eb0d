//! # Driven Ports (Outbound SPI)
//!
//! Interfaces this crate **requires** from the host application.

use std::fmt;

use thiserror::Error;

use crate::domain::KBucketConfig;

/// Source of random bytes for peer sampling.
///
/// Random peers feed anti-eclipse lookups, so production implementations
/// must be cryptographically strong: an observer able to predict the pick
/// could steer which peers we query.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a bucket is shared between network
/// tasks and maintenance routines.
pub trait EntropySource: Send + Sync + fmt::Debug {
    /// Fill `dest` with random bytes or fail without blocking indefinitely.
    fn fill(&self, dest: &mut [u8]) -> Result<(), EntropyError>;
}

/// Errors reading entropy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntropyError {
    /// The underlying source could not produce bytes.
    #[error("entropy unavailable: {0}")]
    Unavailable(String),
}

/// Abstract interface for bucket configuration.
pub trait ConfigProvider: Send + Sync {
    /// Limits to build new buckets with.
    fn kbucket_config(&self) -> KBucketConfig;
}

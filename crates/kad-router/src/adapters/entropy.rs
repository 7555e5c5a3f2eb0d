//! Entropy Source Adapters

use rand::rngs::OsRng;
use rand::RngCore;

use crate::ports::{EntropyError, EntropySource};

/// Production entropy source backed by the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropySource;

impl OsEntropySource {
    pub fn new() -> Self {
        Self
    }
}

impl EntropySource for OsEntropySource {
    fn fill(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| EntropyError::Unavailable(e.to_string()))
    }
}

/// Fixed entropy source for deterministic testing.
///
/// Repeats the big-endian bytes of one `u64`, so an 8-byte draw yields exactly
/// that value.
///
/// # Example
///
/// ```rust,ignore
/// let source = FixedEntropySource::new(5);
/// let mut buf = [0u8; 8];
/// source.fill(&mut buf).unwrap();
/// assert_eq!(u64::from_be_bytes(buf), 5);
/// ```
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, Copy)]
pub struct FixedEntropySource {
    value: u64,
}

#[cfg(any(test, feature = "test-utils"))]
impl FixedEntropySource {
    pub fn new(value: u64) -> Self {
        Self { value }
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl EntropySource for FixedEntropySource {
    fn fill(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        let bytes = self.value.to_be_bytes();
        for (i, byte) in dest.iter_mut().enumerate() {
            *byte = bytes[i % bytes.len()];
        }
        Ok(())
    }
}

/// Entropy source that always fails, for exercising error paths.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingEntropySource;

#[cfg(any(test, feature = "test-utils"))]
impl EntropySource for FailingEntropySource {
    fn fill(&self, _dest: &mut [u8]) -> Result<(), EntropyError> {
        Err(EntropyError::Unavailable("entropy source disabled".to_string()))
    }
}

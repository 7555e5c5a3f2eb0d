//! Identifier and distance types.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Length of a [`NodeId`] in bytes.
pub const NODE_ID_LEN: usize = 16;

/// 128-bit node identifier.
///
/// Stored big-endian, so the derived byte ordering matches the numeric
/// ordering of the identifier.
///
/// # Security (Timing Attack Prevention)
///
/// Equality runs in constant time. Identifiers of routing table peers are
/// compared on every lookup; a short-circuiting comparison would leak how many
/// leading bytes matched.
// Hash over the raw bytes agrees with the manual PartialEq: equal ids have
// equal bytes.
#[allow(clippy::derived_hash_with_manual_eq)]
#[derive(Debug, Clone, Copy, Hash)]
pub struct NodeId([u8; NODE_ID_LEN]);

impl PartialEq for NodeId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        let mut result = 0u8;
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            result |= a ^ b;
        }
        result == 0
    }
}

impl Eq for NodeId {}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NodeId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl NodeId {
    /// Create a NodeId from raw big-endian bytes.
    pub const fn new(bytes: [u8; NODE_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Create a NodeId from its numeric value.
    pub const fn from_u128(value: u128) -> Self {
        Self(value.to_be_bytes())
    }

    /// Numeric value of the identifier.
    pub const fn as_u128(&self) -> u128 {
        u128::from_be_bytes(self.0)
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; NODE_ID_LEN] {
        &self.0
    }

    /// The all-zero identifier.
    pub const fn zero() -> Self {
        Self([0u8; NODE_ID_LEN])
    }

    /// Generate a random identifier.
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Kademlia distance to `other`.
    pub fn xor(&self, other: &NodeId) -> Distance {
        Distance(self.as_u128() ^ other.as_u128())
    }
}

impl AsRef<[u8]> for NodeId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<u128> for NodeId {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Errors parsing a [`NodeId`] from its hex form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseNodeIdError {
    #[error("node id must be {expected} hex characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid hex digit in node id")]
    InvalidDigit,
}

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != NODE_ID_LEN * 2 {
            return Err(ParseNodeIdError::InvalidLength {
                expected: NODE_ID_LEN * 2,
                actual: s.len(),
            });
        }
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseNodeIdError::InvalidDigit);
        }
        u128::from_str_radix(s, 16)
            .map(Self::from_u128)
            .map_err(|_| ParseNodeIdError::InvalidDigit)
    }
}

/// XOR distance between two identifiers, read as an unsigned integer.
///
/// Smaller values are closer in the Kademlia metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Distance(u128);

impl Distance {
    /// Distance from an identifier to itself.
    pub const ZERO: Distance = Distance(0);

    /// Numeric value of the distance.
    pub const fn as_u128(&self) -> u128 {
        self.0
    }

    /// Length of the prefix shared by the two identifiers.
    pub const fn leading_zeros(&self) -> u32 {
        self.0.leading_zeros()
    }
}

//! # Ports Layer
//!
//! Traits the host application implements for the bucket:
//!
//! - [`EntropySource`]: random bytes for anti-eclipse peer sampling
//! - [`ConfigProvider`]: where bucket limits come from

pub mod outbound;

pub use outbound::{ConfigProvider, EntropyError, EntropySource};

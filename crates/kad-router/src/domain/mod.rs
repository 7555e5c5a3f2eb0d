//! Domain Layer - k-bucket logic with no I/O
//!
//! - The bucket itself (admission, lookup, recency ordering)
//! - Bucket configuration and error taxonomy
//! - XOR-distance ranking services

pub mod config;
pub mod errors;
pub mod kbucket;
pub mod services;

pub use config::*;
pub use errors::*;
pub use kbucket::*;
pub use services::*;

//! Adapters for the outbound ports.
//!
//! - `entropy`: OS-backed random source plus deterministic test sources
//! - `config`: static config, TOML file loading (feature `config`)

pub mod config;
pub mod entropy;

pub use config::StaticConfigProvider;
pub use entropy::OsEntropySource;

#[cfg(any(test, feature = "test-utils"))]
pub use entropy::{FailingEntropySource, FixedEntropySource};

#[cfg(any(test, feature = "config"))]
pub use config::TomlConfigProvider;

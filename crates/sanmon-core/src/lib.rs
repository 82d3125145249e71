//! sanmon-core — domain types and configuration for the sanmon check.
//!
//! Holds everything the other crates share: the YAML configuration model
//! with its validation step, the per-component and aggregate result types,
//! and the fatal configuration error. No network I/O lives here.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, Endpoint, HostSpec, IdentifierSet, ObjectClassSpec};
pub use error::ConfigError;
pub use types::{AggregateResult, Component, HealthRecord, Status};

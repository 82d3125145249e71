//! sanmon-check — the check engine.
//!
//! Pure health evaluation over decoded telemetry, the per-pair endpoint
//! failover loop, and plugin-protocol formatting of the final result.

pub mod aggregate;
pub mod evaluate;
pub mod report;

pub use aggregate::run_checks;
pub use evaluate::evaluate;
pub use report::render;

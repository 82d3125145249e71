//! Result types for a single check run.
//!
//! A run produces one [`Component`] per (host, object class) pair and
//! rolls them up into an [`AggregateResult`] that maps directly onto the
//! monitoring plugin protocol (one status line, one exit code).

use crate::config::Endpoint;

/// Plugin-protocol status of one component or of the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    /// Reserved by the plugin protocol; this check never emits it.
    Warning,
    Critical,
    Unknown,
}

impl Status {
    /// Process exit code understood by Nagios/Icinga.
    pub fn exit_code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Warning => 1,
            Status::Critical => 2,
            Status::Unknown => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Warning => "WARNING",
            Status::Critical => "CRITICAL",
            Status::Unknown => "UNKNOWN",
        }
    }
}

/// One (identifier, health) pair extracted from a telemetry response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthRecord {
    /// Value of the identifying attribute, e.g. a controller durable-id.
    pub identifier: String,
    /// Raw health string reported by the array, e.g. "OK" or "Degraded".
    pub health: String,
}

impl HealthRecord {
    pub fn is_healthy(&self) -> bool {
        self.health == "OK"
    }
}

/// Evaluation result for one (host, object class) pair.
///
/// Built once by the aggregator and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Object class that was checked, e.g. "controllers".
    pub object_class: String,
    /// Logical host name from the topology.
    pub host: String,
    /// Endpoint that answered, or `None` when every path was down.
    pub endpoint: Option<Endpoint>,
    pub status: Status,
    /// Human-readable status messages, never empty.
    pub messages: Vec<String>,
}

/// Final rolled-up result of a run.
#[derive(Debug, Clone, Default)]
pub struct AggregateResult {
    critical: bool,
    components: Vec<Component>,
}

impl AggregateResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a component result. Any non-OK component, including
    /// UNKNOWN for an unreachable host, escalates the aggregate to
    /// CRITICAL.
    pub fn push(&mut self, component: Component) {
        if component.status != Status::Ok {
            self.critical = true;
        }
        self.components.push(component);
    }

    pub fn status(&self) -> Status {
        if self.critical {
            Status::Critical
        } else {
            Status::Ok
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }
}

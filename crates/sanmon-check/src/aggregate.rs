//! Per-pair endpoint failover and result aggregation.
//!
//! For every (object class, host) pair the aggregator walks the host's
//! redundant endpoints in configured order. The first endpoint that
//! answers is authoritative; the pair is only UNKNOWN when every path
//! is down. Probe failures never abort the run.

use tracing::{debug, warn};

use sanmon_core::{AggregateResult, Component, Config, HostSpec, ObjectClassSpec, Status};
use sanmon_probe::Probe;

use crate::evaluate::evaluate;

/// Run every configured check, sequentially, and roll up the results.
///
/// Produces exactly one [`Component`] per (host, object class) pair,
/// so the aggregate always carries `hosts × classes` components.
pub async fn run_checks<P: Probe>(config: &Config, probe: &mut P) -> AggregateResult {
    let mut aggregate = AggregateResult::new();

    for class in &config.objects {
        for host in &config.hosts {
            let component = check_pair(class, host, probe).await;
            debug!(
                object_class = %component.object_class,
                host = %component.host,
                status = component.status.as_str(),
                "component evaluated"
            );
            aggregate.push(component);
        }
    }

    aggregate
}

async fn check_pair<P: Probe>(
    class: &ObjectClassSpec,
    host: &HostSpec,
    probe: &mut P,
) -> Component {
    let mut unreachable = Vec::new();

    for endpoint in &host.endpoints {
        match probe.collect(endpoint, &class.name).await {
            Ok(response) => {
                let records = evaluate(&response, class);

                let mut messages: Vec<String> = records
                    .iter()
                    .filter(|record| !record.is_healthy())
                    .map(|record| format!("{} health is {}", record.identifier, record.health))
                    .collect();

                let status = if messages.is_empty() {
                    messages.push(format!("all {} are healthy", class.name));
                    Status::Ok
                } else {
                    Status::Critical
                };

                // One responsive endpoint is authoritative; remaining
                // redundant paths are not consulted.
                return Component {
                    object_class: class.name.clone(),
                    host: host.name.clone(),
                    endpoint: Some(endpoint.clone()),
                    status,
                    messages,
                };
            }
            Err(e) => {
                warn!(
                    host = %host.name,
                    endpoint = %endpoint.label,
                    addr = %endpoint.address,
                    error = %e,
                    "endpoint unreachable, trying next"
                );
                unreachable.push(format!(
                    "Unable to contact {} ({})",
                    endpoint.label, endpoint.address
                ));
            }
        }
    }

    // Every redundant path failed.
    Component {
        object_class: class.name.clone(),
        host: host.name.clone(),
        endpoint: None,
        status: Status::Unknown,
        messages: unreachable,
    }
}

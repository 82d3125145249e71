//! Plugin-protocol formatting of the aggregate result.

use sanmon_core::AggregateResult;

/// Render the one-line plugin statement and its exit code.
///
/// Format: `<STATUS> -- on <host>: <messages>, on <host>: <messages>`
/// with components in evaluation order and each component's messages
/// joined with ", ".
pub fn render(aggregate: &AggregateResult) -> (String, i32) {
    let parts: Vec<String> = aggregate
        .components()
        .iter()
        .map(|component| format!("on {}: {}", component.host, component.messages.join(", ")))
        .collect();

    let message = format!("{} -- {}", aggregate.status().as_str(), parts.join(", "));
    (message, aggregate.status().exit_code())
}

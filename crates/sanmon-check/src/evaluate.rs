//! Health evaluation over a decoded telemetry response.

use tracing::warn;

use sanmon_core::{HealthRecord, ObjectClassSpec};
use sanmon_probe::ApiResponse;

/// Extract the health records the spec cares about from one response.
///
/// For each identifying attribute, in the spec's stable order, every
/// response element whose identifier value is in the expected set
/// yields one record, in response traversal order. Elements with
/// unexpected identifiers are ignored; expected identifiers absent from
/// the response yield no record (matching the array's historical check
/// behavior) and are only logged.
///
/// Deterministic and free of I/O: the same response and spec always
/// produce the same record sequence.
pub fn evaluate(response: &ApiResponse, spec: &ObjectClassSpec) -> Vec<HealthRecord> {
    let mut records = Vec::new();

    for identifier_set in &spec.identifiers {
        let mut seen = Vec::new();
        for (identifier, health) in response.records(&identifier_set.attribute) {
            if identifier_set.expected.contains(&identifier) {
                seen.push(identifier.clone());
                records.push(HealthRecord { identifier, health });
            }
        }

        for expected in &identifier_set.expected {
            if !seen.iter().any(|s| s == expected) {
                warn!(
                    object_class = %spec.name,
                    attribute = %identifier_set.attribute,
                    identifier = %expected,
                    "expected identifier missing from telemetry"
                );
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanmon_core::IdentifierSet;
    use std::collections::BTreeSet;

    const CONTROLLERS: &str = r#"<RESPONSE>
  <OBJECT basetype="controllers">
    <PROPERTY name="durable-id">controller_a</PROPERTY>
    <PROPERTY name="health">OK</PROPERTY>
  </OBJECT>
  <OBJECT basetype="controllers">
    <PROPERTY name="durable-id">controller_b</PROPERTY>
    <PROPERTY name="health">Degraded</PROPERTY>
  </OBJECT>
  <OBJECT basetype="controllers">
    <PROPERTY name="durable-id">controller_spare</PROPERTY>
    <PROPERTY name="health">Fault</PROPERTY>
  </OBJECT>
</RESPONSE>"#;

    fn spec(expected: &[&str]) -> ObjectClassSpec {
        ObjectClassSpec {
            name: "controllers".to_string(),
            identifiers: vec![IdentifierSet {
                attribute: "durable-id".to_string(),
                expected: expected.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
            }],
        }
    }

    fn response() -> ApiResponse {
        ApiResponse::parse(CONTROLLERS.as_bytes()).unwrap()
    }

    #[test]
    fn only_expected_identifiers_yield_records() {
        let records = evaluate(&response(), &spec(&["controller_a", "controller_b"]));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].identifier, "controller_a");
        assert_eq!(records[0].health, "OK");
        assert_eq!(records[1].identifier, "controller_b");
        assert_eq!(records[1].health, "Degraded");
    }

    #[test]
    fn unexpected_elements_are_not_an_error() {
        // controller_spare reports Fault but is not in the expected set.
        let records = evaluate(&response(), &spec(&["controller_a"]));
        assert_eq!(records.len(), 1);
        assert!(records.iter().all(|r| r.identifier == "controller_a"));
    }

    #[test]
    fn absent_expected_identifier_yields_no_record() {
        let records = evaluate(&response(), &spec(&["controller_z"]));
        assert!(records.is_empty());
    }

    #[test]
    fn evaluation_is_idempotent() {
        let spec = spec(&["controller_a", "controller_b"]);
        let response = response();
        assert_eq!(evaluate(&response, &spec), evaluate(&response, &spec));
    }

    #[test]
    fn records_follow_response_order() {
        let records = evaluate(&response(), &spec(&["controller_b", "controller_a"]));
        // Expected-set ordering does not reorder the output.
        assert_eq!(records[0].identifier, "controller_a");
        assert_eq!(records[1].identifier, "controller_b");
    }
}

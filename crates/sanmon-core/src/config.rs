//! YAML configuration parser and validation.
//!
//! The on-disk format mirrors the plugin's historical layout: a
//! credential hash, object classes mapping identifying attributes to
//! expected values, and hosts mapping to an ordered list of labelled
//! management endpoints (redundant paths to the same array).
//!
//! ```yaml
//! authentication:
//!   credential_hash: 539e12f63b693a9970a97b885e857f8b
//! objects:
//!   controllers:
//!     durable-id: [controller_a, controller_b]
//! hosts:
//!   array1:
//!     - ctrl-a: 10.0.0.1
//!     - ctrl-b: 10.0.0.2
//! ```
//!
//! Deserialization and validation are separate steps; both produce a
//! fatal [`ConfigError`] before any network I/O happens.

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_TIMEOUT_SECS: u64 = 2;
const MAX_TIMEOUT_SECS: u64 = 60;

/// One management address for a physical controller path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Short label from the configuration, e.g. "ctrl-a".
    pub label: String,
    /// host:port or bare IP of the management interface.
    pub address: String,
}

/// Expected values for one identifying attribute of an object class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierSet {
    /// Attribute name in the telemetry response, e.g. "durable-id".
    pub attribute: String,
    pub expected: BTreeSet<String>,
}

/// One object class to check, e.g. "controllers" or "volumes".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectClassSpec {
    pub name: String,
    pub identifiers: Vec<IdentifierSet>,
}

/// A logical array host with its ordered list of redundant endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSpec {
    pub name: String,
    pub endpoints: Vec<Endpoint>,
}

/// Validated run configuration.
///
/// Object classes and hosts are kept in name-sorted order so a run is
/// deterministic regardless of YAML map ordering.
#[derive(Debug, Clone)]
pub struct Config {
    pub credential_hash: String,
    pub timeout: Duration,
    pub objects: Vec<ObjectClassSpec>,
    pub hosts: Vec<HostSpec>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    authentication: RawAuth,
    objects: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    hosts: BTreeMap<String, Vec<BTreeMap<String, String>>>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawAuth {
    credential_hash: String,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_yaml::from_str(content)?;
        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> Result<Self, ConfigError> {
        if raw.authentication.credential_hash.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "authentication.credential_hash is empty".to_string(),
            ));
        }

        let timeout_secs = raw.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 || timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::Invalid(format!(
                "timeout_secs must be between 1 and {MAX_TIMEOUT_SECS}, got {timeout_secs}"
            )));
        }

        if raw.objects.is_empty() {
            return Err(ConfigError::Invalid(
                "no object classes configured".to_string(),
            ));
        }
        let mut objects = Vec::with_capacity(raw.objects.len());
        for (name, attributes) in raw.objects {
            if attributes.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "object class '{name}' has no identifying attributes"
                )));
            }
            let mut identifiers = Vec::with_capacity(attributes.len());
            for (attribute, values) in attributes {
                if values.is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "object class '{name}' attribute '{attribute}' has no expected values"
                    )));
                }
                identifiers.push(IdentifierSet {
                    attribute,
                    expected: values.into_iter().collect(),
                });
            }
            objects.push(ObjectClassSpec { name, identifiers });
        }

        if raw.hosts.is_empty() {
            return Err(ConfigError::Invalid("no hosts configured".to_string()));
        }
        let mut hosts = Vec::with_capacity(raw.hosts.len());
        for (name, entries) in raw.hosts {
            let mut endpoints = Vec::new();
            for entry in entries {
                // Each list item is a single {label: address} map.
                for (label, address) in entry {
                    if address.trim().is_empty() {
                        return Err(ConfigError::Invalid(format!(
                            "host '{name}' endpoint '{label}' has an empty address"
                        )));
                    }
                    endpoints.push(Endpoint { label, address });
                }
            }
            if endpoints.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "host '{name}' has no endpoints"
                )));
            }
            hosts.push(HostSpec { name, endpoints });
        }

        Ok(Config {
            credential_hash: raw.authentication.credential_hash,
            timeout: Duration::from_secs(timeout_secs),
            objects,
            hosts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
authentication:
  credential_hash: 539e12f63b693a9970a97b885e857f8b
objects:
  controllers:
    durable-id: [controller_a, controller_b]
hosts:
  array1:
    - ctrl-a: 10.0.0.1
    - ctrl-b: 10.0.0.2
"#;

    #[test]
    fn parses_minimal_config() {
        let config = Config::from_yaml(MINIMAL).unwrap();
        assert_eq!(config.credential_hash, "539e12f63b693a9970a97b885e857f8b");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.objects.len(), 1);
        assert_eq!(config.objects[0].name, "controllers");
        assert_eq!(config.objects[0].identifiers[0].attribute, "durable-id");
        assert!(
            config.objects[0].identifiers[0]
                .expected
                .contains("controller_a")
        );
        assert_eq!(config.hosts.len(), 1);
    }

    #[test]
    fn endpoint_order_is_preserved() {
        let config = Config::from_yaml(MINIMAL).unwrap();
        let endpoints = &config.hosts[0].endpoints;
        assert_eq!(endpoints[0].label, "ctrl-a");
        assert_eq!(endpoints[0].address, "10.0.0.1");
        assert_eq!(endpoints[1].label, "ctrl-b");
        assert_eq!(endpoints[1].address, "10.0.0.2");
    }

    #[test]
    fn timeout_is_configurable() {
        let yaml = format!("{MINIMAL}\ntimeout_secs: 5\n");
        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let yaml = format!("{MINIMAL}\ntimeout_secs: 0\n");
        let err = Config::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_hosts_is_rejected() {
        let yaml = r#"
authentication:
  credential_hash: abc
objects:
  controllers:
    durable-id: [controller_a]
hosts: {}
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("no hosts"));
    }

    #[test]
    fn empty_expected_values_are_rejected() {
        let yaml = r#"
authentication:
  credential_hash: abc
objects:
  controllers:
    durable-id: []
hosts:
  array1:
    - ctrl-a: 10.0.0.1
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("no expected values"));
    }

    #[test]
    fn empty_credential_hash_is_rejected() {
        let yaml = r#"
authentication:
  credential_hash: "  "
objects:
  controllers:
    durable-id: [controller_a]
hosts:
  array1:
    - ctrl-a: 10.0.0.1
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("credential_hash"));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = Config::from_yaml("not: [valid").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

//! Session login and per-endpoint token cache.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use sanmon_core::Endpoint;

use crate::error::ProbeError;
use crate::http;
use crate::xml::ApiResponse;

/// An authenticated session token bound to one endpoint.
///
/// Tokens are valid for the lifetime of the process; there is no
/// expiry or refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Logs in to management endpoints and caches the resulting tokens.
///
/// Constructed once per run and touched only by the single control
/// thread, so the cache is a plain map. At most one login round trip
/// happens per endpoint per run.
#[derive(Debug)]
pub struct SessionManager {
    credential_hash: String,
    timeout: Duration,
    cache: HashMap<String, Session>,
}

impl SessionManager {
    pub fn new(credential_hash: String, timeout: Duration) -> Self {
        Self {
            credential_hash,
            timeout,
            cache: HashMap::new(),
        }
    }

    /// Return the session for `endpoint`, logging in on cache miss.
    ///
    /// The login is `GET /api/login/<credential_hash>`; the token comes
    /// back as the `response` property of the XML body. A well-formed
    /// body without that property is a protocol failure.
    pub async fn login(&mut self, endpoint: &Endpoint) -> Result<Session, ProbeError> {
        if let Some(session) = self.cache.get(&endpoint.address) {
            debug!(addr = %endpoint.address, "session cache hit");
            return Ok(session.clone());
        }

        let path = format!("/api/login/{}", self.credential_hash);
        let body = http::get(&endpoint.address, &path, &[], self.timeout).await?;

        let response =
            ApiResponse::parse(&body).map_err(|e| ProbeError::Protocol {
                addr: endpoint.address.clone(),
                reason: format!("unparseable login response: {e}"),
            })?;
        let token = response
            .property("response")
            .ok_or_else(|| ProbeError::Protocol {
                addr: endpoint.address.clone(),
                reason: "login response carries no session token".to_string(),
            })?;

        let session = Session {
            token: token.to_string(),
        };
        self.cache
            .insert(endpoint.address.clone(), session.clone());
        debug!(addr = %endpoint.address, "session established");
        Ok(session)
    }

    /// Whether a session is already cached for this endpoint.
    pub fn is_cached(&self, endpoint: &Endpoint) -> bool {
        self.cache.contains_key(&endpoint.address)
    }
}

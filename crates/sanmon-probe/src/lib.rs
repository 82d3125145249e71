//! sanmon-probe — wire layer for the DotHill management API.
//!
//! Everything that touches the network lives here: session login with a
//! per-endpoint token cache, the authenticated telemetry fetch, and the
//! XML decoding boundary. The [`Probe`] trait is the seam the
//! aggregator drives; production code uses [`WireProbe`], tests swap in
//! a scripted stand-in.

pub mod error;
pub mod fetch;
mod http;
pub mod session;
pub mod xml;

pub use error::ProbeError;
pub use fetch::fetch_object;
pub use session::{Session, SessionManager};
pub use xml::ApiResponse;

use std::time::Duration;

use sanmon_core::Endpoint;

/// One login-fetch-decode exchange against a single endpoint.
#[allow(async_fn_in_trait)]
pub trait Probe {
    async fn collect(
        &mut self,
        endpoint: &Endpoint,
        object_class: &str,
    ) -> Result<ApiResponse, ProbeError>;
}

/// The real probe: session manager plus telemetry fetcher.
#[derive(Debug)]
pub struct WireProbe {
    sessions: SessionManager,
    timeout: Duration,
}

impl WireProbe {
    pub fn new(credential_hash: String, timeout: Duration) -> Self {
        Self {
            sessions: SessionManager::new(credential_hash, timeout),
            timeout,
        }
    }
}

impl Probe for WireProbe {
    async fn collect(
        &mut self,
        endpoint: &Endpoint,
        object_class: &str,
    ) -> Result<ApiResponse, ProbeError> {
        let session = self.sessions.login(endpoint).await?;
        fetch_object(endpoint, object_class, &session, self.timeout).await
    }
}

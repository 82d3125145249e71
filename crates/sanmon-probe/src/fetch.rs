//! Authenticated telemetry fetch for one object class.

use std::time::Duration;

use tracing::debug;

use sanmon_core::Endpoint;

use crate::error::ProbeError;
use crate::http;
use crate::session::Session;
use crate::xml::ApiResponse;

/// Fetch and decode `show/<object_class>` telemetry from one endpoint.
///
/// No retry happens here: failover across redundant endpoints is the
/// aggregator's job.
pub async fn fetch_object(
    endpoint: &Endpoint,
    object_class: &str,
    session: &Session,
    timeout: Duration,
) -> Result<ApiResponse, ProbeError> {
    let path = format!("/api/show/{object_class}");
    let headers = [("sessionKey", session.token()), ("dataType", "api")];
    let body = http::get(&endpoint.address, &path, &headers, timeout).await?;

    let response = ApiResponse::parse(&body).map_err(|e| ProbeError::Protocol {
        addr: endpoint.address.clone(),
        reason: format!("unparseable {object_class} response: {e}"),
    })?;
    debug!(addr = %endpoint.address, %object_class, "telemetry fetched");
    Ok(response)
}

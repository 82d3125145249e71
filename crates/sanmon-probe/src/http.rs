//! One-shot HTTP GET against a controller management endpoint.
//!
//! The DotHill management API is plain HTTP/1.1; every exchange is a
//! single GET bounded by an explicit timeout so one dead controller
//! cannot stall the whole run.

use std::time::Duration;

use bytes::Bytes;
use http_body_util::BodyExt;
use tracing::debug;

use crate::error::ProbeError;

/// Issue a GET for `path` against `addr`, returning the response body.
///
/// `headers` are attached verbatim. Connect, handshake, request and
/// body collection all share one `timeout`; a non-2xx status is a
/// protocol failure, not a transport one.
pub(crate) async fn get(
    addr: &str,
    path: &str,
    headers: &[(&str, &str)],
    timeout: Duration,
) -> Result<Bytes, ProbeError> {
    let exchange = async {
        let stream = tokio::net::TcpStream::connect(addr).await.map_err(|e| {
            ProbeError::Connection {
                addr: addr.to_string(),
                reason: e.to_string(),
            }
        })?;

        let io = hyper_util::rt::TokioIo::new(stream);
        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(|e| ProbeError::Connection {
                addr: addr.to_string(),
                reason: format!("handshake failed: {e}"),
            })?;

        // Drive the connection in the background.
        tokio::spawn(async move {
            let _ = conn.await;
        });

        let mut builder = http::Request::builder()
            .method("GET")
            .uri(format!("http://{addr}{path}"))
            .header("host", addr)
            .header("user-agent", "sanmon/0.1");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let req = builder
            .body(http_body_util::Empty::<Bytes>::new())
            .map_err(|e| ProbeError::Protocol {
                addr: addr.to_string(),
                reason: format!("failed to build request: {e}"),
            })?;

        let resp = sender
            .send_request(req)
            .await
            .map_err(|e| ProbeError::Connection {
                addr: addr.to_string(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(ProbeError::Protocol {
                addr: addr.to_string(),
                reason: format!("HTTP status {}", resp.status()),
            });
        }

        let body = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| ProbeError::Connection {
                addr: addr.to_string(),
                reason: format!("failed to read body: {e}"),
            })?
            .to_bytes();

        Ok(body)
    };

    match tokio::time::timeout(timeout, exchange).await {
        Ok(result) => result,
        Err(_) => {
            debug!(%addr, %path, "request timed out");
            Err(ProbeError::Timeout {
                addr: addr.to_string(),
                timeout,
            })
        }
    }
}

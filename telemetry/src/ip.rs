//! Caller IP address resolution.

use std::future::Future;
use std::net::IpAddr;
use std::time::Duration;

use serde::Deserialize;

use crate::TelemetryError;

/// Default public-IP lookup endpoint (ipify-compatible).
pub const DEFAULT_LOOKUP_URL: &str = "https://api.ipify.org?format=json";

/// Default timeout for IP lookup requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Source of the caller's network address.
pub trait IpResolver: Send + Sync {
    fn resolve_ip(&self) -> impl Future<Output = Result<String, TelemetryError>> + Send;
}

/// Looks up the public address of this host through an HTTP endpoint.
///
/// The endpoint contract: `GET <url>` returns `{"ip": "<address>"}`.
pub struct HttpIpResolver {
    http_client: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    ip: String,
}

impl HttpIpResolver {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            url: url.into(),
        }
    }
}

impl Default for HttpIpResolver {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKUP_URL)
    }
}

impl IpResolver for HttpIpResolver {
    async fn resolve_ip(&self) -> Result<String, TelemetryError> {
        let response = self.http_client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                TelemetryError::Unreachable(format!("request timed out: {e}"))
            } else if e.is_connect() {
                TelemetryError::Unreachable(format!("connection failed: {e}"))
            } else {
                TelemetryError::RequestFailed(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(TelemetryError::RequestFailed(format!(
                "HTTP status {}",
                response.status()
            )));
        }

        let body: LookupResponse = response.json().await.map_err(|e| {
            TelemetryError::InvalidResponse(format!("failed to parse lookup response: {e}"))
        })?;

        let ip: IpAddr = body
            .ip
            .trim()
            .parse()
            .map_err(|_| TelemetryError::InvalidResponse(format!("not an IP address: {}", body.ip)))?;
        Ok(ip.to_string())
    }
}

/// An address already known to the caller, e.g. the connection's peer address
/// or the client entry of an `X-Forwarded-For` header.
#[derive(Clone, Debug, Default)]
pub struct StaticIpResolver {
    ip: Option<IpAddr>,
}

impl StaticIpResolver {
    pub fn new(ip: Option<IpAddr>) -> Self {
        Self { ip }
    }

    /// Take the client (left-most) entry of an `X-Forwarded-For` value.
    pub fn from_forwarded_for(header: &str) -> Self {
        let ip = header
            .split(',')
            .next()
            .and_then(|first| first.trim().parse().ok());
        Self { ip }
    }
}

impl IpResolver for StaticIpResolver {
    async fn resolve_ip(&self) -> Result<String, TelemetryError> {
        self.ip
            .map(|ip| ip.to_string())
            .ok_or(TelemetryError::Missing("ip address"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum::{Json, Router};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn http_resolver_parses_lookup_response() {
        let url = serve(Router::new().route(
            "/",
            get(|| async { Json(serde_json::json!({ "ip": "198.51.100.23" })) }),
        ))
        .await;

        let resolver = HttpIpResolver::new(url);
        assert_eq!(resolver.resolve_ip().await.unwrap(), "198.51.100.23");
    }

    #[tokio::test]
    async fn http_resolver_rejects_garbage() {
        let url = serve(Router::new().route(
            "/",
            get(|| async { Json(serde_json::json!({ "ip": "not-an-ip" })) }),
        ))
        .await;

        let err = HttpIpResolver::new(url).resolve_ip().await.unwrap_err();
        assert!(matches!(err, TelemetryError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn http_resolver_reports_unreachable_host() {
        // Bind then drop to get a port nothing is listening on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let resolver = HttpIpResolver::with_timeout(format!("http://{addr}/"), Duration::from_secs(2));
        assert!(resolver.resolve_ip().await.is_err());
    }

    #[tokio::test]
    async fn forwarded_for_uses_client_entry() {
        let resolver = StaticIpResolver::from_forwarded_for("203.0.113.7, 10.0.0.1");
        assert_eq!(resolver.resolve_ip().await.unwrap(), "203.0.113.7");
    }

    #[tokio::test]
    async fn missing_static_ip_is_an_error() {
        let err = StaticIpResolver::from_forwarded_for("garbage").resolve_ip().await.unwrap_err();
        assert!(matches!(err, TelemetryError::Missing(_)));
    }
}

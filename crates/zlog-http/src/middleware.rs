//! Request/response logging middleware for axum routers.
//!
//! For every request the bound logger gets a `network_request` line before
//! the inner service runs and a `network_response` line after it returns.
//! Logging failures are reported through `tracing` and never turn into an
//! HTTP error: the request is forwarded and the response returned as usual.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, header},
    middleware::{self, Next},
    response::Response,
};
use tracing::warn;
use zlog_core::{Headers, Logger, NetworkRequest, NetworkResponse};

/// Wrap every route of `router` with [`log_network`] bound to `logger`.
pub fn attach<S>(router: Router<S>, logger: Arc<Logger>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(logger, log_network))
}

/// Middleware body; usable directly with `axum::middleware::from_fn_with_state`.
pub async fn log_network(
    State(logger): State<Arc<Logger>>,
    request: Request,
    next: Next,
) -> Response {
    let peer = request.extensions().get::<ConnectInfo<SocketAddr>>();
    let ip = client_ip(request.headers(), peer);

    let net_request = NetworkRequest::new(request.method().as_str(), request_url(&request))
        .with_headers(header_map(request.headers()));
    if let Err(e) = logger.network_request(&net_request, ip.as_deref()) {
        warn!(
            "failed to log request {} {}: {e}",
            net_request.method, net_request.url
        );
    }

    let response = next.run(request).await;

    let net_response = NetworkResponse::new(response.status().as_u16())
        .with_headers(header_map(response.headers()));
    if let Err(e) = logger.network_response(&net_response, ip.as_deref()) {
        warn!(
            "failed to log response {} for {} {}: {e}",
            net_response.status_code, net_request.method, net_request.url
        );
    }

    response
}

/// Absolute URL when the request carries enough to rebuild one, else the
/// path and query as received.
fn request_url(request: &Request) -> String {
    let uri = request.uri();
    if uri.scheme().is_some() {
        return uri.to_string();
    }
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok());
    match host {
        Some(host) => format!("http://{host}{uri}"),
        None => uri.to_string(),
    }
}

/// Client address: first `X-Forwarded-For` hop, then `X-Real-IP`, then the
/// socket peer when the server was started with connect info.
pub fn client_ip(
    headers: &HeaderMap,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    forwarded
        .or_else(real_ip)
        .map(str::to_owned)
        .or_else(|| connect_info.map(|ConnectInfo(addr)| addr.ip().to_string()))
}

/// Header map with non-UTF-8 values dropped; repeated names keep the last value.
fn header_map(headers: &HeaderMap) -> Headers {
    headers
        .iter()
        .filter_map(|(name, value)| {
            let value = value.to_str().ok()?;
            Some((name.as_str().to_owned(), value.to_owned()))
        })
        .collect()
}

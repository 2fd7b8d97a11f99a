//! Request identity and inspection.
//!
//! # Responsibilities
//! - Generate a UUID v4 `x-request-id` for requests that lack one
//! - Snapshot the client's own headers before middleware adds any
//! - Capture the parts of a request that handlers reflect back:
//!   method, full URL, query args, headers and client origin
//!
//! # Design Decisions
//! - Maps are `BTreeMap` so identical requests serialize identically
//! - Repeated query keys keep their last value
//! - Repeated headers are joined with ", "

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, FromRequestParts},
    http::{header, request::Parts, HeaderMap, HeaderValue, Method, Request, Uri},
    middleware::Next,
    response::Response,
};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the per-request correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Request id generator for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// The headers exactly as the client sent them.
#[derive(Debug, Clone)]
pub struct ClientHeaders(pub HeaderMap);

/// Middleware storing [`ClientHeaders`]; must run before `SetRequestIdLayer`
/// so a generated id never shows up in echoed headers.
pub async fn capture_client_headers(mut request: Request<Body>, next: Next) -> Response {
    let headers = request.headers().clone();
    request.extensions_mut().insert(ClientHeaders(headers));
    next.run(request).await
}

/// Everything an echo handler reflects about the incoming request.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    pub method: Method,
    pub path: String,
    pub url: String,
    pub args: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub origin: String,
    pub request_id: Option<String>,
}

impl RequestInfo {
    pub fn from_parts(parts: &Parts) -> Self {
        let client_headers = parts
            .extensions
            .get::<ClientHeaders>()
            .map(|ClientHeaders(headers)| headers)
            .unwrap_or(&parts.headers);

        Self {
            method: parts.method.clone(),
            path: parts.uri.path().to_string(),
            url: full_url(&parts.uri, client_headers),
            args: query_args(&parts.uri),
            headers: header_map(client_headers),
            origin: client_origin(parts),
            request_id: parts
                .headers
                .get(X_REQUEST_ID)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        }
    }

    /// Value of a header by lower-case name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

impl<S> FromRequestParts<S> for RequestInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

/// Flatten the query string into a map.
pub fn query_args(uri: &Uri) -> BTreeMap<String, String> {
    uri.query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

/// Flatten headers into a map, joining repeated values.
pub fn header_map(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        map.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    map
}

/// Reconstruct the absolute URL the client requested.
pub fn full_url(uri: &Uri, headers: &HeaderMap) -> String {
    if uri.scheme().is_some() && uri.authority().is_some() {
        return uri.to_string();
    }

    let scheme = first_value(headers, X_FORWARDED_PROTO).unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()))
        .unwrap_or("localhost");
    let path = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");

    format!("{scheme}://{host}{path}")
}

/// The client address: first `x-forwarded-for` hop, else the peer address.
pub fn client_origin(parts: &Parts) -> String {
    if let Some(forwarded) = first_value(&parts.headers, X_FORWARDED_FOR) {
        return forwarded.to_string();
    }
    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn first_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
